//! Shared fixtures for ledger tests.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};

use crate::{
    pools::{DiscountPool, PoolCandidate, PoolError, PoolUuid},
    products::ProductUuid,
    suppliers::SupplierUuid,
};

/// An available USD pool with `remaining` minor units left out of twice as much.
pub(crate) fn candidate(
    remaining: i64,
    percentage_points: Decimal,
) -> Result<PoolCandidate<'static>, PoolError> {
    let mut pool = DiscountPool::new(
        PoolUuid::new(),
        SupplierUuid::new(),
        ProductUuid::new(),
        Money::from_minor(remaining.max(1) * 2, USD),
        percentage_points,
    )?;

    pool.remaining = Money::from_minor(remaining, USD);

    Ok(PoolCandidate {
        pool,
        supplier_name: "Destileria Norte".to_string(),
        supplier_active: true,
    })
}
