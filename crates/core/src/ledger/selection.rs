//! Pool Selection

use std::cmp::Reverse;

use decimal_percentage::Percentage;
use rusty_money::{Money, MoneyError, iso::Currency};

use crate::{
    discounts::{SecondUnitDiscount, eligible_units},
    ledger::LedgerError,
    pools::{PoolCandidate, PoolUuid},
    suppliers::SupplierUuid,
};

/// The pool chosen to fund a line, and what funding it costs.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSelection<'a> {
    /// Selected pool
    pub pool: PoolUuid,

    /// Supplier funding the pool
    pub supplier: SupplierUuid,

    /// Supplier display name
    pub supplier_name: String,

    /// Percentage taken off each eligible unit
    pub percentage: Percentage,

    /// Discount owed on the line
    pub discount: SecondUnitDiscount<'a>,

    /// Pool balance the selection was made against
    pub remaining_before: Money<'a, Currency>,

    /// Pool balance once the discount is taken out
    pub remaining_after: Money<'a, Currency>,
}

/// Available candidates, highest remaining balance first.
///
/// Ties are broken by pool uuid so repeated previews pick the same pool.
pub fn rank_candidates<'c, 'a>(candidates: &'c [PoolCandidate<'a>]) -> Vec<&'c PoolCandidate<'a>> {
    let mut ranked: Vec<&PoolCandidate<'a>> = candidates
        .iter()
        .filter(|candidate| candidate.is_available())
        .collect();

    ranked.sort_by_key(|candidate| {
        (
            Reverse(candidate.pool.remaining.to_minor_units()),
            candidate.pool.uuid,
        )
    });

    ranked
}

/// Pick the pool that funds the "every second unit" discount for `quantity` units of a product
/// at `unit_price`.
///
/// Candidates are tried in [`rank_candidates`] order and the first one whose balance covers the
/// whole line discount wins. Returns `None` when the line has fewer than two units, the discount
/// rounds to nothing, or no pool can fund it.
///
/// # Errors
///
/// Returns an error when a pool is held in a different currency from `unit_price`, or the
/// discount cannot be represented in minor units.
pub fn select_pool<'a>(
    candidates: &[PoolCandidate<'a>],
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Option<PoolSelection<'a>>, LedgerError> {
    if eligible_units(quantity) == 0 {
        return Ok(None);
    }

    for candidate in rank_candidates(candidates) {
        let pool = &candidate.pool;

        if pool.remaining.currency() != unit_price.currency() {
            return Err(LedgerError::Money(MoneyError::CurrencyMismatch {
                expected: pool.remaining.currency().iso_alpha_code,
                actual: unit_price.currency().iso_alpha_code,
            }));
        }

        let discount = SecondUnitDiscount::calculate(unit_price, &pool.percentage, quantity)?;

        if discount.takes_nothing() {
            continue;
        }

        if pool.has_funds(&discount.total_discount) {
            let remaining_after = pool.balance_after_debit(&discount.total_discount)?;

            return Ok(Some(PoolSelection {
                pool: pool.uuid,
                supplier: pool.supplier,
                supplier_name: candidate.supplier_name.clone(),
                percentage: pool.percentage,
                discount,
                remaining_before: pool.remaining,
                remaining_after,
            }));
        }
    }

    Ok(None)
}
