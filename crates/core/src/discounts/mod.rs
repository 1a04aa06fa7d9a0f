//! Discount utilities
//!
//! Percentage and minor-unit arithmetic shared by pool selection, pricing
//! previews and commits. All rounding is half away from zero at minor units.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A percentage was outside `(0, 100]`.
    #[error("percentage must be greater than 0 and at most 100, got {0}")]
    PercentOutOfRange(Decimal),

    /// Multiplying or dividing an amount left the `i64` minor unit range.
    #[error("amount overflowed while applying the discount")]
    AmountOverflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Number of units in a line that get the "every second unit" discount.
///
/// One unit in every two is discounted, so an odd trailing unit never is.
pub const fn eligible_units(quantity: u32) -> u32 {
    quantity / 2
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows or cannot be
/// represented in minor units.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

/// Build a [`Percentage`] from percentage points, e.g. `10.00` for ten percent.
///
/// # Errors
///
/// Returns [`DiscountError::PercentOutOfRange`] unless `0 < points <= 100`.
pub fn percentage_from_points(points: Decimal) -> Result<Percentage, DiscountError> {
    if points <= Decimal::ZERO || points > Decimal::ONE_HUNDRED {
        return Err(DiscountError::PercentOutOfRange(points));
    }

    Ok(Percentage::from(points / Decimal::ONE_HUNDRED))
}

/// Percentage points for storage and display, rounded to two decimal places.
pub fn percentage_points(percent: &Percentage) -> Decimal {
    ((*percent) * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Split an amount across `parts`, rounding the share half away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::AmountOverflow`] when `parts` is zero or the share does not fit.
pub fn share_of_minor(minor: i64, parts: u32) -> Result<i64, DiscountError> {
    if parts == 0 {
        return Err(DiscountError::AmountOverflow);
    }

    let minor = Decimal::from_i64(minor).ok_or(DiscountError::AmountOverflow)?;

    minor
        .checked_div(Decimal::from(parts))
        .ok_or(DiscountError::AmountOverflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::AmountOverflow)
}

/// Discount owed on a line under the "every second unit" rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondUnitDiscount<'a> {
    /// Units in the line that are discounted.
    pub eligible_units: u32,

    /// Discount on a single eligible unit.
    pub unit_discount: Money<'a, Currency>,

    /// Discount on the whole line (`unit_discount * eligible_units`).
    pub total_discount: Money<'a, Currency>,
}

impl<'a> SecondUnitDiscount<'a> {
    /// Calculate the discount for `quantity` units at `unit_price` with `percent` off every
    /// second unit.
    ///
    /// # Errors
    ///
    /// Returns an error when the percentage or line amount cannot be represented in minor units.
    pub fn calculate(
        unit_price: &Money<'a, Currency>,
        percent: &Percentage,
        quantity: u32,
    ) -> Result<Self, DiscountError> {
        let eligible_units = eligible_units(quantity);
        let unit_discount = percent_of_minor(percent, unit_price.to_minor_units())?;

        let total_discount = unit_discount
            .checked_mul(i64::from(eligible_units))
            .ok_or(DiscountError::AmountOverflow)?;

        Ok(Self {
            eligible_units,
            unit_discount: Money::from_minor(unit_discount, unit_price.currency()),
            total_discount: Money::from_minor(total_discount, unit_price.currency()),
        })
    }

    /// Whether this discount takes nothing off the line.
    ///
    /// A negative unit price yields a negative discount, which counts as nothing.
    pub fn takes_nothing(&self) -> bool {
        self.total_discount.to_minor_units() <= 0
    }
}
