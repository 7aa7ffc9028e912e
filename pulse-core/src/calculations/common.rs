//! Common helpers shared by the calculation engines.
//!
//! Rounding lives here so that every engine rounds the same way, and only at
//! the point a value leaves the engine.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::InvalidInput;

/// Months in a year, used to convert between monthly and annual figures.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Rounds a decimal value to the nearest whole Rand, halves away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pulse_core::calculations::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(7725.58)), dec!(7726));
/// assert_eq!(round_to_unit(dec!(177.12)), dec!(177));
/// assert_eq!(round_to_unit(dec!(2.5)), dec!(3));
/// assert_eq!(round_to_unit(dec!(-2.5)), dec!(-3));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `value` unchanged if it is zero or positive.
///
/// # Errors
///
/// Returns [`InvalidInput::Negative`] naming `field` otherwise.
pub fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, InvalidInput> {
    if value < Decimal::ZERO {
        return Err(InvalidInput::Negative { field, value });
    }
    Ok(value)
}

/// Maps the result of a checked `Decimal` operation to
/// [`InvalidInput::Overflow`] naming `field`.
pub(crate) fn checked(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, InvalidInput> {
    value.ok_or(InvalidInput::Overflow { field })
}

/// Converts a floating-point amount into [`Decimal`] for use with the engines.
///
/// Callers holding `f64` values (for example from a JSON form) should go
/// through this so NaN and infinities are rejected rather than coerced.
///
/// # Errors
///
/// Returns [`InvalidInput::NonFinite`] for NaN or infinite values and
/// [`InvalidInput::Overflow`] for finite values outside the decimal range.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pulse_core::InvalidInput;
/// use pulse_core::calculations::common::decimal_from_f64;
///
/// assert_eq!(decimal_from_f64("salary", 35000.5), Ok(dec!(35000.5)));
/// assert_eq!(
///     decimal_from_f64("salary", f64::NAN),
///     Err(InvalidInput::NonFinite { field: "salary" })
/// );
/// ```
pub fn decimal_from_f64(
    field: &'static str,
    value: f64,
) -> Result<Decimal, InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput::NonFinite { field });
    }
    Decimal::from_f64(value).ok_or(InvalidInput::Overflow { field })
}
