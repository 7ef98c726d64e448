//! Pricing

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::discounts::{DiscountError, DiscountRule};

/// Errors that can occur while deriving a booking price.
#[derive(Debug, Error)]
pub enum PricingError {
    /// Base prices cannot be negative.
    #[error("base price {0} is negative")]
    NegativeBase(i64),

    /// A discount rule could not be evaluated.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The summed rule discounts could not be represented in minor units.
    #[error("combined discount overflowed")]
    Overflow,
}

/// Derived price breakdown for a booking.
///
/// `final_price` is always `base_price - discount_amount` and never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pricing {
    /// Price before discounts
    pub base_price: Money<'static, Currency>,

    /// Discount actually applied, capped at the base price
    pub discount_amount: Money<'static, Currency>,

    /// Amount to charge
    pub final_price: Money<'static, Currency>,
}

impl Pricing {
    /// Pricing with no discount applied.
    pub fn undiscounted(base_price: Money<'static, Currency>) -> Self {
        Self {
            base_price,
            discount_amount: Money::from_minor(0, base_price.currency()),
            final_price: base_price,
        }
    }
}

/// Derive the price breakdown for `base_price` under the given promotional rules.
///
/// Each rule is evaluated against the base price and the amounts are summed. A
/// combined discount larger than the base is capped, so the final price bottoms
/// out at zero and `discount_amount` reports what was really taken off.
///
/// # Errors
///
/// - [`PricingError::NegativeBase`]: the base price is below zero.
/// - [`PricingError::Discount`]: a rule could not be evaluated.
/// - [`PricingError::Overflow`]: the summed discounts do not fit in minor units.
pub fn derive_pricing(
    base_price: Money<'static, Currency>,
    rules: &[DiscountRule],
) -> Result<Pricing, PricingError> {
    let base_minor = base_price.to_minor_units();

    if base_minor < 0 {
        return Err(PricingError::NegativeBase(base_minor));
    }

    if rules.is_empty() {
        return Ok(Pricing::undiscounted(base_price));
    }

    let requested = rules.iter().try_fold(0_i64, |acc, rule| {
        let amount = rule.amount_off(&base_price)?.to_minor_units();

        acc.checked_add(amount).ok_or(PricingError::Overflow)
    })?;

    let discount_minor = requested.min(base_minor);

    Ok(Pricing {
        base_price,
        discount_amount: Money::from_minor(discount_minor, base_price.currency()),
        final_price: Money::from_minor(base_minor - discount_minor, base_price.currency()),
    })
}
