//! Discount Pool Ledger
//!
//! Decides whether a line qualifies for the "every second unit" discount,
//! which pool funds it, and what the pool is debited when the order is
//! finalised. Everything here is pure: stores load candidates and apply the
//! resulting debits.

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{discounts::DiscountError, pools::PoolError};

pub mod commit;
pub mod offers;
pub mod preview;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;

/// Errors raised while pricing or committing a line.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// Discount arithmetic failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// A pool operation failed.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// Prices and pools were in different currencies.
    #[error(transparent)]
    Money(#[from] MoneyError),
}
