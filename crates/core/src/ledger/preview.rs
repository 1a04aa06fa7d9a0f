//! Pricing Preview
//!
//! Previews run on every cart recalculation. They read pool balances but never
//! change them, so running one any number of times leaves the ledger as it was.

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::{
    discounts::{DiscountError, share_of_minor},
    ledger::{LedgerError, selection::{PoolSelection, select_pool}},
    pools::PoolCandidate,
    products::ProductUuid,
};

/// A cart line as handed over by the host on recalculation.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    /// Product in the cart
    pub product: ProductUuid,

    /// Units in the cart
    pub quantity: u32,

    /// Catalogue price of one unit
    pub unit_price: Money<'a, Currency>,
}

/// Previewed pricing for one cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePreview<'a> {
    /// The line as priced
    pub line: CartLine<'a>,

    /// Pool funding the discount, if any
    pub discount: Option<PoolSelection<'a>>,

    /// Per-unit price to display (`unit_price - total_discount / quantity`)
    pub display_unit_price: Money<'a, Currency>,

    /// Line total before the discount
    pub subtotal: Money<'a, Currency>,

    /// Line total after the discount
    pub total: Money<'a, Currency>,
}

impl<'a> LinePreview<'a> {
    /// Amount taken off the line.
    pub fn saving(&self) -> Money<'a, Currency> {
        self.discount.as_ref().map_or_else(
            || Money::from_minor(0, self.line.unit_price.currency()),
            |selection| selection.discount.total_discount,
        )
    }

    /// Whether a pool funds a discount on this line.
    pub fn is_discounted(&self) -> bool {
        self.discount.is_some()
    }
}

/// Price a cart line against the product's pools.
///
/// # Errors
///
/// Returns an error when pool selection fails or the line total cannot be represented.
pub fn preview_line<'a>(
    line: CartLine<'a>,
    candidates: &[PoolCandidate<'a>],
) -> Result<LinePreview<'a>, LedgerError> {
    let discount = select_pool(candidates, &line.unit_price, line.quantity)?;

    let currency = line.unit_price.currency();
    let unit_minor = line.unit_price.to_minor_units();

    let subtotal = unit_minor
        .checked_mul(i64::from(line.quantity))
        .ok_or(DiscountError::AmountOverflow)?;

    let (display_unit_price, total) = match &discount {
        Some(selection) => {
            let total_discount = selection.discount.total_discount.to_minor_units();
            let per_unit = share_of_minor(total_discount, line.quantity)?;

            (unit_minor - per_unit, subtotal - total_discount)
        }
        None => (unit_minor, subtotal),
    };

    Ok(LinePreview {
        discount,
        display_unit_price: Money::from_minor(display_unit_price, currency),
        subtotal: Money::from_minor(subtotal, currency),
        total: Money::from_minor(total, currency),
        line,
    })
}

/// Previewed pricing for a whole cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPreview<'a> {
    currency: &'a Currency,
    lines: Vec<LinePreview<'a>>,
}

impl<'a> CartPreview<'a> {
    /// Collect line previews for a cart priced in `currency`.
    pub fn new(currency: &'a Currency, lines: Vec<LinePreview<'a>>) -> Self {
        Self { currency, lines }
    }

    /// Line previews in cart order.
    pub fn lines(&self) -> &[LinePreview<'a>] {
        &self.lines
    }

    /// Lines that carry a discount.
    pub fn discounted_lines(&self) -> impl Iterator<Item = &LinePreview<'a>> {
        self.lines.iter().filter(|line| line.is_discounted())
    }

    /// Cart total before discounts.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::AmountOverflow`] if the sum does not fit in minor units, or
    /// [`DiscountError::Money`] if a line is priced in another currency.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, DiscountError> {
        self.sum(|line| line.subtotal.to_minor_units())
    }

    /// Cart total after discounts.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::AmountOverflow`] if the sum does not fit in minor units, or
    /// [`DiscountError::Money`] if a line is priced in another currency.
    pub fn total(&self) -> Result<Money<'a, Currency>, DiscountError> {
        self.sum(|line| line.total.to_minor_units())
    }

    /// Total funded by pools across the cart.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::AmountOverflow`] if the sum does not fit in minor units, or
    /// [`DiscountError::Money`] if a line is priced in another currency.
    pub fn total_saving(&self) -> Result<Money<'a, Currency>, DiscountError> {
        self.sum(|line| line.saving().to_minor_units())
    }

    fn sum(
        &self,
        amount: impl Fn(&LinePreview<'a>) -> i64,
    ) -> Result<Money<'a, Currency>, DiscountError> {
        let mut total = 0_i64;

        for line in &self.lines {
            let currency = line.line.unit_price.currency();

            if currency != self.currency {
                return Err(DiscountError::Money(MoneyError::CurrencyMismatch {
                    expected: self.currency.iso_alpha_code,
                    actual: currency.iso_alpha_code,
                }));
            }

            total = total
                .checked_add(amount(line))
                .ok_or(DiscountError::AmountOverflow)?;
        }

        Ok(Money::from_minor(total, self.currency))
    }
}
