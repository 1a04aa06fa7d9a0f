//! Products

use crate::uuids::TypedUuid;

/// A product in the host catalogue. Only its identity is known to the ledger;
/// prices arrive with each cart or order line.
#[derive(Debug)]
pub struct Product;

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;
