use rust_decimal::Decimal;
use thiserror::Error;

use pulse_core::calculations::{BudgetItem, CommuteOption};

/// Error returned when a command-line value cannot be parsed as money.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseMoneyError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned for a malformed `NAME=AMOUNT` pair.
#[derive(Debug, Error)]
pub enum ParseLabelledAmountError {
    #[error("expected NAME=AMOUNT, got '{0}'")]
    MissingSeparator(String),

    #[error("name must not be empty in '{0}'")]
    EmptyName(String),

    #[error(transparent)]
    Amount(#[from] ParseMoneyError),
}

/// Trims whitespace, a leading `R` currency symbol, and comma or space
/// thousands separators.
fn normalize_money_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('R').unwrap_or(trimmed);
    trimmed.chars().filter(|c| *c != ',' && *c != ' ').collect()
}

/// Parses an amount such as `35000`, `R35,000` or `R 1 200.50`.
///
/// Only the format is checked here; sign rules belong to the engines.
pub fn parse_money(s: &str) -> Result<Decimal, ParseMoneyError> {
    let normalized = normalize_money_input(s);
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseMoneyError {
            input: s.to_string(),
            source: e,
        }
    })
}

fn split_labelled(s: &str) -> Result<(String, Decimal), ParseLabelledAmountError> {
    let (name, amount) = s
        .split_once('=')
        .ok_or_else(|| ParseLabelledAmountError::MissingSeparator(s.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseLabelledAmountError::EmptyName(s.to_string()));
    }
    Ok((name.to_string(), parse_money(amount)?))
}

/// Parses a budget category given as `NAME=AMOUNT`.
pub fn parse_budget_item(s: &str) -> Result<BudgetItem, ParseLabelledAmountError> {
    let (name, amount) = split_labelled(s)?;
    Ok(BudgetItem::new(name, amount))
}

/// Parses a commute option given as `LABEL=MONTHLY_COST`.
pub fn parse_commute_option(s: &str) -> Result<CommuteOption, ParseLabelledAmountError> {
    let (label, cost) = split_labelled(s)?;
    Ok(CommuteOption::new(label, cost))
}

/// Formats a Rand amount with thousands separators, e.g. `R 23,272`.
///
/// Amounts are shown to the nearest Rand.
pub fn format_rand(value: Decimal) -> String {
    let rounded = pulse_core::calculations::common::round_to_unit(value);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if rounded < Decimal::ZERO {
        format!("-R {grouped}")
    } else {
        format!("R {grouped}")
    }
}
