//! Discounts
//!
//! Promotional rules a host may pass to the pricing deriver. No rule is ever
//! inferred from the booking itself; without rules a booking is charged its
//! base price.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// A percentage rule was below zero.
    #[error("discount percentage is negative")]
    NegativePercentage,

    /// A discount amount was negative.
    #[error("discount amount {0} is negative")]
    NegativeAmount(i64),

    /// A fixed amount is in a different currency to the price it applies to (rule, price).
    #[error("discount is in {0}, but price is in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// A promotional rule.
#[derive(Debug, Copy, Clone)]
pub enum DiscountRule {
    /// Take a percentage off the base price (e.g. "10% off your first walk")
    PercentageOff(Percentage),

    /// Take a fixed amount off the base price (e.g. "₩2,000 off")
    AmountOff(Money<'static, Currency>),
}

impl DiscountRule {
    /// The amount this rule takes off `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if a percentage cannot be represented in minor units, a
    /// rule is negative, or a fixed amount is in another currency.
    pub fn amount_off(
        &self,
        base: &Money<'static, Currency>,
    ) -> Result<Money<'static, Currency>, DiscountError> {
        match self {
            DiscountRule::PercentageOff(percent) => {
                if (*percent) * Decimal::ONE < Decimal::ZERO {
                    return Err(DiscountError::NegativePercentage);
                }

                let minor = percent_of_minor(percent, base.to_minor_units())?;

                Ok(Money::from_minor(minor, base.currency()))
            }
            DiscountRule::AmountOff(amount) => {
                let minor = amount.to_minor_units();

                if minor < 0 {
                    return Err(DiscountError::NegativeAmount(minor));
                }

                if amount.currency() != base.currency() {
                    return Err(DiscountError::CurrencyMismatch(
                        amount.currency().iso_alpha_code,
                        base.currency().iso_alpha_code,
                    ));
                }

                Ok(*amount)
            }
        }
    }
}

/// Calculate the discount amount in minor units for a percentage of a minor unit amount.
///
/// Rounds half away from zero, so 10% of ₩15,005 is ₩1,501.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the calculation overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage crate doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use decimal_percentage::Percentage;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn percent_of_minor_rounds_half_away_from_zero() -> TestResult {
        let percent = Percentage::from(0.1);

        assert_eq!(percent_of_minor(&percent, 15_005)?, 1_501);
        assert_eq!(percent_of_minor(&percent, 15_004)?, 1_500);

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() -> TestResult {
        let percent = Percentage::try_from("100000000000000000000")?;
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(DiscountError::PercentConversion)));

        Ok(())
    }

    #[test]
    fn percentage_rule_uses_base_currency() -> TestResult {
        let base = Money::from_minor(20_000, iso::KRW);
        let rule = DiscountRule::PercentageOff(Percentage::from(0.25));

        assert_eq!(rule.amount_off(&base)?, Money::from_minor(5_000, iso::KRW));

        Ok(())
    }

    #[test]
    fn amount_rule_rejects_negative_amounts() {
        let base = Money::from_minor(20_000, iso::KRW);
        let rule = DiscountRule::AmountOff(Money::from_minor(-500, iso::KRW));

        assert!(matches!(
            rule.amount_off(&base),
            Err(DiscountError::NegativeAmount(-500))
        ));
    }

    #[test]
    fn amount_rule_rejects_other_currencies() {
        let base = Money::from_minor(20_000, iso::KRW);
        let rule = DiscountRule::AmountOff(Money::from_minor(500, iso::USD));

        assert!(matches!(
            rule.amount_off(&base),
            Err(DiscountError::CurrencyMismatch("USD", "KRW"))
        ));
    }

    #[test]
    fn percentage_rule_rejects_negative_percentages() {
        let base = Money::from_minor(20_000, iso::KRW);
        let rule = DiscountRule::PercentageOff(Percentage::from(-0.5));

        assert!(matches!(
            rule.amount_off(&base),
            Err(DiscountError::NegativePercentage)
        ));
    }
}
