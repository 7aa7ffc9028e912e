//! Future value of a fixed monthly contribution.
//!
//! Contributions are made at the end of each month (an ordinary annuity) and
//! compound monthly at `annual_rate_percent / 100 / 12`:
//!
//! ```text
//! future_value = m × ((1 + i)^n − 1) / i      when i ≠ 0
//! future_value = m × n                        when i = 0
//! ```
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pulse_core::calculations::project_growth;
//!
//! let projection = project_growth(dec!(1000), 10, dec!(10)).unwrap();
//!
//! assert_eq!(projection.future_value, dec!(204845));
//! assert_eq!(projection.total_contributed, dec!(120000));
//! assert_eq!(projection.growth_earned, dec!(84845));
//! ```

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::calculations::common::{MONTHS_PER_YEAR, require_non_negative, round_to_unit};
use crate::error::InvalidInput;

/// A compound growth projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub monthly_contribution: Decimal,
    pub years: u32,
    pub annual_rate_percent: Decimal,

    /// `total_contributed + growth_earned`.
    pub future_value: Decimal,

    pub total_contributed: Decimal,
    pub growth_earned: Decimal,
}

/// Projects the value of `monthly_contribution` saved every month for `years`.
///
/// # Errors
///
/// Returns [`InvalidInput`] if:
/// - `years` is zero
/// - `monthly_contribution` or `annual_rate_percent` is negative
/// - the projection overflows decimal arithmetic
pub fn project_growth(
    monthly_contribution: Decimal,
    years: u32,
    annual_rate_percent: Decimal,
) -> Result<GrowthProjection, InvalidInput> {
    if years < 1 {
        return Err(InvalidInput::TooSmall {
            field: "years",
            min: 1,
            value: years,
        });
    }
    require_non_negative("monthly_contribution", monthly_contribution)?;
    require_non_negative("annual_rate_percent", annual_rate_percent)?;

    let months = i64::from(years) * 12;
    let monthly_rate = annual_rate_percent / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR;

    let total_contributed = monthly_contribution
        .checked_mul(Decimal::from(months))
        .ok_or(InvalidInput::Overflow {
            field: "monthly_contribution",
        })?;

    let future_value = if monthly_rate.is_zero() {
        total_contributed
    } else {
        annuity_future_value(monthly_contribution, monthly_rate, months)?
    };

    let future_value = round_to_unit(future_value);
    let total_contributed = round_to_unit(total_contributed);

    Ok(GrowthProjection {
        monthly_contribution,
        years,
        annual_rate_percent,
        future_value,
        total_contributed,
        growth_earned: future_value - total_contributed,
    })
}

/// Unrounded future value of an ordinary annuity with a non-zero rate.
fn annuity_future_value(
    payment: Decimal,
    rate: Decimal,
    periods: i64,
) -> Result<Decimal, InvalidInput> {
    let overflow = InvalidInput::Overflow {
        field: "annual_rate_percent",
    };

    let compounded = (Decimal::ONE + rate)
        .checked_powi(periods)
        .ok_or_else(|| overflow.clone())?;
    let factor = (compounded - Decimal::ONE)
        .checked_div(rate)
        .ok_or_else(|| overflow.clone())?;
    payment.checked_mul(factor).ok_or(overflow)
}
