//! Test Helpers

use pool_ledger::{
    orders::{Order, OrderLine, OrderStatus, OrderUuid},
    pools::{DiscountPool, PoolCandidate, PoolError, PoolUuid},
    products::ProductUuid,
    suppliers::{Supplier, SupplierDetails, SupplierUuid},
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};

use crate::{
    domain::{
        pools::{PoolsService, PoolsServiceError, data::NewPool, records::PoolRecord},
        suppliers::{SuppliersService, SuppliersServiceError, data::NewSupplier},
    },
    test::TestContext,
};

pub(crate) async fn create_supplier(
    ctx: &TestContext,
    name: &str,
    email: Option<&str>,
) -> Result<Supplier, SuppliersServiceError> {
    ctx.suppliers
        .create_supplier(NewSupplier {
            uuid: SupplierUuid::new(),
            details: SupplierDetails {
                name: name.to_string(),
                email: email.map(str::to_string),
                phone: None,
                active: true,
            },
        })
        .await
}

pub(crate) async fn create_pool(
    ctx: &TestContext,
    supplier: SupplierUuid,
    product: ProductUuid,
    initial: i64,
    percentage: Decimal,
) -> Result<PoolRecord, PoolsServiceError> {
    ctx.pools
        .create_pool(NewPool {
            uuid: PoolUuid::new(),
            supplier,
            product,
            initial,
            percentage,
        })
        .await
}

/// An active USD pool for `product` holding `remaining` out of twice that.
pub(crate) fn pool_candidate(
    product: ProductUuid,
    remaining: i64,
    percentage: Decimal,
) -> Result<PoolCandidate<'static>, PoolError> {
    let mut pool = DiscountPool::new(
        PoolUuid::new(),
        SupplierUuid::new(),
        product,
        Money::from_minor(remaining.max(1) * 2, USD),
        percentage,
    )?;

    pool.remaining = Money::from_minor(remaining, USD);

    Ok(PoolCandidate {
        pool,
        supplier_name: "Andes Spirits".to_string(),
        supplier_active: true,
    })
}

pub(crate) fn order(status: OrderStatus, lines: &[(ProductUuid, u32, i64)]) -> Order<'static> {
    Order {
        uuid: OrderUuid::new(),
        status,
        lines: lines
            .iter()
            .map(|&(product, quantity, unit_price)| OrderLine {
                product,
                quantity,
                unit_price: Money::from_minor(unit_price, USD),
            })
            .collect(),
    }
}
