//! Error types shared by every calculation engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// A caller-supplied value that the engines refuse to compute with.
///
/// Every engine checks its arguments before doing any arithmetic, so a
/// returned `InvalidInput` never comes with a partial result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidInput {
    /// A monetary amount, distance, price or rate was below zero.
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: Decimal },

    /// An integer count was below its minimum.
    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: u32,
        value: u32,
    },

    /// An integer count was above its maximum.
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        max: u32,
        value: u32,
    },

    /// A floating-point value was NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },

    /// The inputs are valid individually but overflow decimal arithmetic.
    #[error("{field} is too large to calculate with")]
    Overflow { field: &'static str },
}

/// Problems found while validating a [`crate::FinanceConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The bracket table has no rows.
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    /// The first bracket must start at zero income.
    #[error("first tax bracket must start at 0, got {0}")]
    FirstBracketNotZero(Decimal),

    /// A bracket other than the last one has no upper bound.
    #[error("tax bracket {0} is unbounded but is not the last bracket")]
    UnboundedInnerBracket(usize),

    /// The last bracket must be unbounded so every income has a bracket.
    #[error("last tax bracket must have no upper bound, got {0}")]
    BoundedLastBracket(Decimal),

    /// A bracket does not start where the previous one ended.
    #[error("tax bracket {index} starts at {min_income}, expected {expected}")]
    BracketGap {
        index: usize,
        min_income: Decimal,
        expected: Decimal,
    },

    /// A bracket's upper bound is not above its lower bound.
    #[error("tax bracket {index} is empty: {min_income}..{max_income}")]
    EmptyBracket {
        index: usize,
        min_income: Decimal,
        max_income: Decimal,
    },

    /// Bracket rates must strictly increase.
    #[error("tax bracket {index} rate {rate} does not exceed previous rate {previous}")]
    RateNotIncreasing {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },

    /// A rate expressed as a fraction fell outside `[0, 1]`.
    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },

    /// A configured amount was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The weeks-per-month factor must be positive.
    #[error("weeks per month must be positive, got {0}")]
    InvalidWeeksPerMonth(Decimal),
}
