//! Integration tests for second-unit discounts funded by supplier pools.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use pool_ledger::prelude::*;

fn funded_pool(
    product: ProductUuid,
    remaining: i64,
    points: i64,
) -> TestResult<PoolCandidate<'static>> {
    let mut pool = DiscountPool::new(
        PoolUuid::new(),
        SupplierUuid::new(),
        product,
        Money::from_minor(remaining.max(1) * 2, USD),
        Decimal::from(points),
    )?;

    pool.remaining = Money::from_minor(remaining, USD);

    Ok(PoolCandidate {
        pool,
        supplier_name: "Licores del Valle".to_string(),
        supplier_active: true,
    })
}

fn cart_line(product: ProductUuid, quantity: u32, unit_price: i64) -> CartLine<'static> {
    CartLine {
        product,
        quantity,
        unit_price: Money::from_minor(unit_price, USD),
    }
}

#[test]
fn every_second_unit_is_eligible() {
    let eligible: Vec<u32> = (1..=6).map(eligible_units).collect();

    assert_eq!(eligible, vec![0, 1, 1, 2, 2, 3]);
}

#[test]
fn four_units_at_ten_percent_display_ninety_five() -> TestResult {
    let product = ProductUuid::new();
    let pools = [funded_pool(product, 100_000, 10)?];

    let preview = preview_line(cart_line(product, 4, 100_00), &pools)?;
    let selection = preview.discount.as_ref().ok_or("line should be discounted")?;

    assert_eq!(selection.discount.eligible_units, 2);
    assert_eq!(selection.discount.total_discount, Money::from_minor(20_00, USD));
    assert_eq!(preview.display_unit_price, Money::from_minor(95_00, USD));
    assert_eq!(preview.total, Money::from_minor(380_00, USD));

    Ok(())
}

#[test]
fn underfunded_pools_leave_the_price_unchanged() -> TestResult {
    let product = ProductUuid::new();
    let pools = [funded_pool(product, 19_99, 10)?];

    let preview = preview_line(cart_line(product, 4, 100_00), &pools)?;

    assert!(!preview.is_discounted());
    assert_eq!(preview.display_unit_price, Money::from_minor(100_00, USD));
    assert_eq!(preview.total, preview.subtotal);

    let order = Order {
        uuid: OrderUuid::new(),
        status: OrderStatus::Completed,
        lines: vec![OrderLine {
            product,
            quantity: 4,
            unit_price: Money::from_minor(100_00, USD),
        }],
    };

    let planned = order
        .lines
        .iter()
        .map(|line| plan_line(order.uuid, line, &pools))
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(planned, vec![None]);

    Ok(())
}

#[test]
fn commit_plan_debits_exactly_the_previewed_discount() -> TestResult {
    let product = ProductUuid::new();
    let pools = [funded_pool(product, 50_00, 25)?, funded_pool(product, 90_00, 5)?];

    let line = OrderLine {
        product,
        quantity: 3,
        unit_price: Money::from_minor(40_00, USD),
    };

    let preview = preview_line(cart_line(product, 3, 40_00), &pools)?;
    let commit = plan_line(OrderUuid::new(), &line, &pools)?.ok_or("line should be planned")?;
    let previewed = preview.discount.ok_or("line should be discounted")?;

    // The 90.00 pool ranks first and can fund 5% of one unit.
    assert_eq!(commit.debit.pool, previewed.pool);
    assert_eq!(commit.debit.amount, Money::from_minor(2_00, USD));
    assert_eq!(commit.debit.remaining, Money::from_minor(88_00, USD));
    assert_eq!(commit.record.remaining, commit.debit.remaining);
    assert_eq!(commit.record.percentage_points(), Decimal::new(500, 2));

    Ok(())
}

#[test]
fn cart_preview_totals_discounted_and_plain_lines() -> TestResult {
    let discounted = ProductUuid::new();
    let plain = ProductUuid::new();
    let pools = [funded_pool(discounted, 100_00, 20)?];

    let lines = vec![
        preview_line(cart_line(discounted, 2, 15_00), &pools)?,
        preview_line(cart_line(plain, 1, 8_50), &[])?,
    ];

    let cart = CartPreview::new(USD, lines);

    assert_eq!(cart.discounted_lines().count(), 1);
    assert_eq!(cart.subtotal()?, Money::from_minor(38_50, USD));
    assert_eq!(cart.total_saving()?, Money::from_minor(3_00, USD));
    assert_eq!(cart.total()?, Money::from_minor(35_50, USD));

    Ok(())
}
