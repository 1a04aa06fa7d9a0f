//! Supplier Data

use pool_ledger::suppliers::{SupplierDetails, SupplierUuid};

/// New Supplier Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplier {
    /// UUID to assign to the supplier row.
    pub uuid: SupplierUuid,

    /// Name, contact details and active flag.
    pub details: SupplierDetails,
}
