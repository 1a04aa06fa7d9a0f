//! Applied Discount Records

use jiff::Timestamp;
use pool_ledger::{
    orders::OrderUuid, pools::PoolUuid, products::ProductUuid, suppliers::SupplierUuid,
    uuids::TypedUuid,
};
use rust_decimal::Decimal;

/// Applied Discount UUID
pub type AppliedDiscountUuid = TypedUuid<AppliedDiscountRecord>;

/// Applied Discount Record
///
/// Written once per discounted order line and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscountRecord {
    pub uuid: AppliedDiscountUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub supplier_uuid: SupplierUuid,
    pub pool_uuid: PoolUuid,

    /// Amount taken out of the pool, in minor units.
    pub amount: i64,

    /// Pool balance right after the debit, in minor units.
    pub remaining_amount: i64,

    /// Percentage points applied to each eligible unit.
    pub percentage: Decimal,

    pub quantity: u32,
    pub applied_at: Timestamp,
}
