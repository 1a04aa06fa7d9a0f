//! Commit Planning
//!
//! Works out what an order line takes out of which pool at order finalisation.
//! The plan is computed against live balances; applying it is up to the store.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::percentage_points,
    ledger::{LedgerError, selection::select_pool},
    orders::{OrderLine, OrderUuid},
    pools::{PoolCandidate, PoolUuid},
    products::ProductUuid,
    suppliers::SupplierUuid,
};

/// Balance change to write to a pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debit<'a> {
    /// Pool to debit
    pub pool: PoolUuid,

    /// Amount taken out
    pub amount: Money<'a, Currency>,

    /// Balance to store once the amount is taken out
    pub remaining: Money<'a, Currency>,
}

/// Audit record of a committed discount, before it is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppliedDiscount<'a> {
    /// Order the discount was applied to
    pub order: OrderUuid,

    /// Discounted product
    pub product: ProductUuid,

    /// Supplier funding the discount
    pub supplier: SupplierUuid,

    /// Pool debited
    pub pool: PoolUuid,

    /// Amount taken out of the pool
    pub amount: Money<'a, Currency>,

    /// Pool balance after the debit
    pub remaining: Money<'a, Currency>,

    /// Percentage applied to each eligible unit
    pub percentage: Percentage,

    /// Units on the order line
    pub quantity: u32,
}

impl NewAppliedDiscount<'_> {
    /// Percentage points, e.g. `10.00`.
    pub fn percentage_points(&self) -> rust_decimal::Decimal {
        percentage_points(&self.percentage)
    }
}

/// Debit and audit record for one order line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCommit<'a> {
    /// Balance change
    pub debit: Debit<'a>,

    /// Audit record to append
    pub record: NewAppliedDiscount<'a>,
}

/// Plan the commit of one order line against the product's live pools.
///
/// Returns `None` when the line is not eligible or no pool can fund it.
///
/// # Errors
///
/// Returns an error when pool selection fails.
pub fn plan_line<'a>(
    order: OrderUuid,
    line: &OrderLine<'a>,
    candidates: &[PoolCandidate<'a>],
) -> Result<Option<LineCommit<'a>>, LedgerError> {
    let Some(selection) = select_pool(candidates, &line.unit_price, line.quantity)? else {
        return Ok(None);
    };

    let amount = selection.discount.total_discount;

    Ok(Some(LineCommit {
        debit: Debit {
            pool: selection.pool,
            amount,
            remaining: selection.remaining_after,
        },
        record: NewAppliedDiscount {
            order,
            product: line.product,
            supplier: selection.supplier,
            pool: selection.pool,
            amount,
            remaining: selection.remaining_after,
            percentage: selection.percentage,
            quantity: line.quantity,
        },
    }))
}
