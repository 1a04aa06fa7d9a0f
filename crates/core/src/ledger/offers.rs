//! Product Offers
//!
//! What a product page advertises: every funded pool for the product, so a
//! shopper knows buying two or more units earns a discount.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    ledger::selection::rank_candidates,
    pools::{PoolCandidate, PoolUuid},
};

/// A funded discount on offer for a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOffer<'a> {
    /// Pool behind the offer
    pub pool: PoolUuid,

    /// Supplier funding the offer
    pub supplier_name: String,

    /// Percentage points taken off every second unit
    pub percentage_points: Decimal,

    /// Balance left in the pool
    pub available: Money<'a, Currency>,
}

/// Offers for a product, highest balance first.
pub fn product_offers<'a>(candidates: &[PoolCandidate<'a>]) -> Vec<ProductOffer<'a>> {
    rank_candidates(candidates)
        .into_iter()
        .map(|candidate| ProductOffer {
            pool: candidate.pool.uuid,
            supplier_name: candidate.supplier_name.clone(),
            percentage_points: candidate.pool.percentage_points(),
            available: candidate.pool.remaining,
        })
        .collect()
}
