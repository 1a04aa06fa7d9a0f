//! Discount Pools
//!
//! A pool is a supplier-funded balance earmarked for discounting one product.
//! It holds the percentage taken off every second unit and the balance left to
//! fund it. Balances only go down through commits and only go up through a
//! manual replenishment.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    discounts::{DiscountError, percentage_from_points, percentage_points},
    products::ProductUuid,
    suppliers::SupplierUuid,
    uuids::TypedUuid,
};

/// Pool UUID
pub type PoolUuid = TypedUuid<DiscountPool<'static>>;

/// Errors raised while creating or changing a pool.
#[derive(Debug, Error, PartialEq)]
pub enum PoolError {
    /// Initial amount was zero or negative.
    #[error("initial amount must be greater than zero")]
    NonPositiveInitial,

    /// Replenishment amount was zero or negative.
    #[error("replenishment amount must be greater than zero")]
    NonPositiveAmount,

    /// Remaining balance went below zero.
    #[error("remaining balance cannot be negative")]
    NegativeRemaining,

    /// Remaining balance exceeded the initial amount.
    #[error("remaining balance cannot exceed the initial amount")]
    RemainingExceedsInitial,

    /// Amounts were given in different currencies.
    #[error("pool amounts must share one currency ({expected}, got {actual})")]
    CurrencyMismatch {
        /// Currency of the pool
        expected: &'static str,

        /// Currency of the offending amount
        actual: &'static str,
    },

    /// Percentage or arithmetic failure.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Discount Pool
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountPool<'a> {
    /// Pool identifier
    pub uuid: PoolUuid,

    /// Funding supplier
    pub supplier: SupplierUuid,

    /// Discounted product
    pub product: ProductUuid,

    /// Amount the pool was funded with
    pub initial: Money<'a, Currency>,

    /// Balance left to fund discounts
    pub remaining: Money<'a, Currency>,

    /// Percentage taken off each eligible unit
    pub percentage: Percentage,

    /// Inactive pools fund no discounts
    pub active: bool,
}

impl<'a> DiscountPool<'a> {
    /// Create a fresh, active pool whose remaining balance equals its initial amount.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NonPositiveInitial`]: `initial` is not greater than zero.
    /// - [`PoolError::Discount`]: `percentage_points` is outside `(0, 100]`.
    pub fn new(
        uuid: PoolUuid,
        supplier: SupplierUuid,
        product: ProductUuid,
        initial: Money<'a, Currency>,
        percentage_points: Decimal,
    ) -> Result<Self, PoolError> {
        if initial.to_minor_units() <= 0 {
            return Err(PoolError::NonPositiveInitial);
        }

        let percentage = percentage_from_points(percentage_points)?;

        Ok(Self {
            uuid,
            supplier,
            product,
            initial,
            remaining: initial,
            percentage,
            active: true,
        })
    }

    /// Check `0 <= remaining <= initial` and that both amounts share a currency.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), PoolError> {
        self.ensure_currency(&self.remaining)?;

        if self.remaining.to_minor_units() < 0 {
            return Err(PoolError::NegativeRemaining);
        }

        if self.remaining.to_minor_units() > self.initial.to_minor_units() {
            return Err(PoolError::RemainingExceedsInitial);
        }

        Ok(())
    }

    /// Percentage points, e.g. `10.00`.
    pub fn percentage_points(&self) -> Decimal {
        percentage_points(&self.percentage)
    }

    /// Whether the balance covers `amount` in full.
    pub fn has_funds(&self, amount: &Money<'a, Currency>) -> bool {
        self.remaining.currency() == amount.currency()
            && self.remaining.to_minor_units() >= amount.to_minor_units()
    }

    /// Whether there is any balance left at all.
    pub fn has_balance(&self) -> bool {
        self.remaining.to_minor_units() > 0
    }

    /// Balance after taking `amount` out, never below zero.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::CurrencyMismatch`] if `amount` is in another currency.
    pub fn balance_after_debit(
        &self,
        amount: &Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, PoolError> {
        self.ensure_currency(amount)?;

        let remaining = self
            .remaining
            .to_minor_units()
            .saturating_sub(amount.to_minor_units())
            .max(0);

        Ok(Money::from_minor(remaining, self.remaining.currency()))
    }

    /// Top the pool up by `amount`, raising the initial amount when the new balance would
    /// exceed it. Returns the new `(initial, remaining)` pair.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NonPositiveAmount`]: `amount` is not greater than zero.
    /// - [`PoolError::CurrencyMismatch`]: `amount` is in another currency.
    pub fn replenish(
        &self,
        amount: &Money<'a, Currency>,
    ) -> Result<(Money<'a, Currency>, Money<'a, Currency>), PoolError> {
        self.ensure_currency(amount)?;

        if amount.to_minor_units() <= 0 {
            return Err(PoolError::NonPositiveAmount);
        }

        let remaining = self
            .remaining
            .to_minor_units()
            .checked_add(amount.to_minor_units())
            .ok_or(DiscountError::AmountOverflow)?;

        let initial = self.initial.to_minor_units().max(remaining);
        let currency = self.remaining.currency();

        Ok((
            Money::from_minor(initial, currency),
            Money::from_minor(remaining, currency),
        ))
    }

    fn ensure_currency(&self, amount: &Money<'a, Currency>) -> Result<(), PoolError> {
        let expected = self.initial.currency();
        let actual = amount.currency();

        if expected == actual {
            Ok(())
        } else {
            Err(PoolError::CurrencyMismatch {
                expected: expected.iso_alpha_code,
                actual: actual.iso_alpha_code,
            })
        }
    }
}

/// A pool as seen by selection: the pool plus the state of its supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCandidate<'a> {
    /// The pool itself
    pub pool: DiscountPool<'a>,

    /// Supplier display name
    pub supplier_name: String,

    /// Whether the supplier is active
    pub supplier_active: bool,
}

impl PoolCandidate<'_> {
    /// Active pool, active supplier, and some balance left.
    pub fn is_available(&self) -> bool {
        self.pool.active && self.supplier_active && self.pool.has_balance()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{EUR, USD};
    use testresult::TestResult;

    use super::*;

    fn pool(initial: i64) -> Result<DiscountPool<'static>, PoolError> {
        DiscountPool::new(
            PoolUuid::new(),
            SupplierUuid::new(),
            ProductUuid::new(),
            Money::from_minor(initial, USD),
            Decimal::TEN,
        )
    }

    #[test]
    fn new_pool_starts_full_and_active() -> TestResult {
        let pool = pool(50_000)?;

        assert_eq!(pool.remaining, pool.initial);
        assert!(pool.active);
        assert_eq!(pool.percentage_points(), Decimal::TEN);
        pool.validate()?;

        Ok(())
    }

    #[test]
    fn new_pool_rejects_non_positive_initial() {
        assert_eq!(pool(0), Err(PoolError::NonPositiveInitial));
        assert_eq!(pool(-1), Err(PoolError::NonPositiveInitial));
    }

    #[test]
    fn new_pool_rejects_bad_percentage() {
        let result = DiscountPool::new(
            PoolUuid::new(),
            SupplierUuid::new(),
            ProductUuid::new(),
            Money::from_minor(100, USD),
            Decimal::new(101, 0),
        );

        assert!(matches!(result, Err(PoolError::Discount(_))));
    }

    #[test]
    fn validate_catches_broken_invariants() -> TestResult {
        let mut pool = pool(1_000)?;

        pool.remaining = Money::from_minor(1_001, USD);
        assert_eq!(pool.validate(), Err(PoolError::RemainingExceedsInitial));

        pool.remaining = Money::from_minor(-1, USD);
        assert_eq!(pool.validate(), Err(PoolError::NegativeRemaining));

        Ok(())
    }

    #[test]
    fn has_funds_is_inclusive() -> TestResult {
        let pool = pool(2_000)?;

        assert!(pool.has_funds(&Money::from_minor(2_000, USD)));
        assert!(!pool.has_funds(&Money::from_minor(2_001, USD)));
        assert!(!pool.has_funds(&Money::from_minor(10, EUR)));

        Ok(())
    }

    #[test]
    fn balance_after_debit_never_goes_negative() -> TestResult {
        let pool = pool(1_500)?;

        assert_eq!(
            pool.balance_after_debit(&Money::from_minor(500, USD))?,
            Money::from_minor(1_000, USD)
        );

        assert_eq!(
            pool.balance_after_debit(&Money::from_minor(9_999, USD))?,
            Money::from_minor(0, USD)
        );

        Ok(())
    }

    #[test]
    fn replenish_keeps_remaining_within_initial() -> TestResult {
        let mut pool = pool(1_000)?;
        pool.remaining = Money::from_minor(200, USD);

        let (initial, remaining) = pool.replenish(&Money::from_minor(300, USD))?;
        assert_eq!(initial, Money::from_minor(1_000, USD));
        assert_eq!(remaining, Money::from_minor(500, USD));

        let (initial, remaining) = pool.replenish(&Money::from_minor(1_300, USD))?;
        assert_eq!(initial, Money::from_minor(1_500, USD));
        assert_eq!(remaining, Money::from_minor(1_500, USD));

        Ok(())
    }

    #[test]
    fn replenish_rejects_non_positive_amounts() -> TestResult {
        let pool = pool(1_000)?;

        assert_eq!(
            pool.replenish(&Money::from_minor(0, USD)),
            Err(PoolError::NonPositiveAmount)
        );

        assert!(matches!(
            pool.replenish(&Money::from_minor(10, EUR)),
            Err(PoolError::CurrencyMismatch { .. })
        ));

        Ok(())
    }

    #[test]
    fn candidate_availability_requires_active_pool_supplier_and_balance() -> TestResult {
        let mut candidate = PoolCandidate {
            pool: pool(1_000)?,
            supplier_name: "Norte".to_string(),
            supplier_active: true,
        };

        assert!(candidate.is_available());

        candidate.supplier_active = false;
        assert!(!candidate.is_available());

        candidate.supplier_active = true;
        candidate.pool.active = false;
        assert!(!candidate.is_available());

        candidate.pool.active = true;
        candidate.pool.remaining = Money::from_minor(0, USD);
        assert!(!candidate.is_available());

        Ok(())
    }
}
