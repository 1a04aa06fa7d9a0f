//! Pool Records

use jiff::Timestamp;
use pool_ledger::{
    discounts::percentage_from_points,
    pools::{DiscountPool, PoolCandidate, PoolError, PoolUuid},
    products::ProductUuid,
    suppliers::SupplierUuid,
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

/// Pool Record, joined with the funding supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRecord {
    pub uuid: PoolUuid,
    pub supplier_uuid: SupplierUuid,
    pub supplier_name: String,
    pub supplier_active: bool,
    pub product_uuid: ProductUuid,
    pub initial_amount: i64,
    pub remaining_amount: i64,
    pub percentage: Decimal,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PoolRecord {
    /// Rebuild the pool as selection sees it, with amounts in `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored row breaks a pool invariant.
    pub fn to_candidate(&self, currency: &'static Currency) -> Result<PoolCandidate<'static>, PoolError> {
        let pool = DiscountPool {
            uuid: self.uuid,
            supplier: self.supplier_uuid,
            product: self.product_uuid,
            initial: Money::from_minor(self.initial_amount, currency),
            remaining: Money::from_minor(self.remaining_amount, currency),
            percentage: percentage_from_points(self.percentage)?,
            active: self.active,
        };

        pool.validate()?;

        Ok(PoolCandidate {
            pool,
            supplier_name: self.supplier_name.clone(),
            supplier_active: self.supplier_active,
        })
    }
}
