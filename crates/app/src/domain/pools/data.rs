//! Pool Data

use pool_ledger::{pools::PoolUuid, products::ProductUuid, suppliers::SupplierUuid};
use rust_decimal::Decimal;

/// New Pool Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPool {
    pub uuid: PoolUuid,
    pub supplier: SupplierUuid,
    pub product: ProductUuid,

    /// Funding in minor units. The remaining balance starts at the same value.
    pub initial: i64,

    /// Percentage points, e.g. `10.00`.
    pub percentage: Decimal,
}

/// Pool Update Data
///
/// The (supplier, product) pair is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolUpdate {
    pub percentage: Decimal,
    pub active: bool,
}
