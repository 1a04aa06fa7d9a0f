//! Report Records

use jiff::Timestamp;
use pool_ledger::{products::ProductUuid, suppliers::SupplierUuid};

use crate::domain::ledger::records::AppliedDiscountRecord;

/// Discounts applied for one (supplier, product) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub supplier_uuid: SupplierUuid,
    pub supplier_name: String,
    pub product_uuid: ProductUuid,

    /// Sum of the amounts taken out of the supplier's pools, in minor units.
    pub total_amount: i64,

    pub applications: i64,
    pub last_applied_at: Timestamp,
}

/// Dashboard Stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_suppliers: i64,

    /// Pools with any balance left
    pub funded_pools: i64,

    /// Sum of every pool balance, in minor units.
    pub total_remaining: i64,

    pub applied_today: i64,
}

/// An applied discount with its supplier's name.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub applied: AppliedDiscountRecord,
    pub supplier_name: String,
}
