//! Budget allocation against monthly income.
//!
//! Each category's percentage answers "what share of income is this", so
//! percentages are rounded independently and need not add up to 100.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::{checked, require_non_negative, round_to_unit};
use crate::error::InvalidInput;

/// A named amount the caller wants to budget for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub name: String,
    pub amount: Decimal,
}

impl BudgetItem {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// A budget category with its share of income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    pub amount: Decimal,

    /// Whole-number percentage of total income.
    pub percentage_of_income: Decimal,
}

/// How the allocated total compares with income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationStatus {
    /// Income left over after every category.
    UnderAllocated { remaining: Decimal },
    FullyAllocated,
    /// Categories exceed income by `shortfall`.
    OverAllocated { shortfall: Decimal },
}

/// Converts category amounts into percentages of `total_income`, keeping
/// input order.
///
/// A `total_income` of zero or less gives every category 0%.
///
/// # Errors
///
/// Returns [`InvalidInput::Negative`] if any category amount is below zero,
/// or [`InvalidInput::Overflow`] if an amount is too large a multiple of
/// `total_income`.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pulse_core::calculations::{BudgetItem, allocate_percentages};
///
/// let categories = allocate_percentages(
///     &[BudgetItem::new("Rent", dec!(8000)), BudgetItem::new("Food", dec!(3000))],
///     dec!(25000),
/// )
/// .unwrap();
///
/// assert_eq!(categories[0].percentage_of_income, dec!(32));
/// assert_eq!(categories[1].percentage_of_income, dec!(12));
/// ```
pub fn allocate_percentages(
    categories: &[BudgetItem],
    total_income: Decimal,
) -> Result<Vec<BudgetCategory>, InvalidInput> {
    validate_amounts(categories)?;

    categories
        .iter()
        .map(|item| {
            Ok::<_, InvalidInput>(BudgetCategory {
                name: item.name.clone(),
                amount: item.amount,
                percentage_of_income: percentage_of(item.amount, total_income)?,
            })
        })
        .collect()
}

/// Income left after every category; negative when over-allocated.
///
/// # Errors
///
/// Returns [`InvalidInput::Negative`] if any category amount is below zero,
/// or [`InvalidInput::Overflow`] if the amounts add up past the decimal range.
pub fn remaining_after_allocation(
    total_income: Decimal,
    categories: &[BudgetItem],
) -> Result<Decimal, InvalidInput> {
    validate_amounts(categories)?;

    let allocated = categories.iter().try_fold(Decimal::ZERO, |sum, item| {
        checked("amount", sum.checked_add(item.amount))
    })?;
    let remaining = checked("total_income", total_income.checked_sub(allocated))?;
    if remaining < Decimal::ZERO {
        let shortfall = -remaining;
        warn!(
            total_income = %total_income,
            allocated = %allocated,
            shortfall = %shortfall,
            "Budget categories exceed income"
        );
    }
    Ok(remaining)
}

/// Compares the allocated total against income.
///
/// # Errors
///
/// Returns [`InvalidInput::Negative`] if any category amount is below zero.
pub fn allocation_status(
    total_income: Decimal,
    categories: &[BudgetItem],
) -> Result<AllocationStatus, InvalidInput> {
    let remaining = remaining_after_allocation(total_income, categories)?;

    Ok(if remaining > Decimal::ZERO {
        AllocationStatus::UnderAllocated { remaining }
    } else if remaining < Decimal::ZERO {
        AllocationStatus::OverAllocated {
            shortfall: -remaining,
        }
    } else {
        AllocationStatus::FullyAllocated
    })
}

fn validate_amounts(categories: &[BudgetItem]) -> Result<(), InvalidInput> {
    categories
        .iter()
        .try_for_each(|item| require_non_negative("amount", item.amount).map(|_| ()))
}

fn percentage_of(
    amount: Decimal,
    total_income: Decimal,
) -> Result<Decimal, InvalidInput> {
    if total_income <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    let percentage = amount
        .checked_div(total_income)
        .and_then(|share| share.checked_mul(Decimal::ONE_HUNDRED));
    Ok(round_to_unit(checked("amount", percentage)?))
}
