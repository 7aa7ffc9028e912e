use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One tier of a progressive income tax schedule, in annual Rand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    /// `None` for the open-ended top bracket.
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    /// Tax owed on exactly `min_income`.
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Annual tax on `annual_income`, assuming the income falls in this bracket.
    ///
    /// Returns `None` if the result overflows.
    pub fn tax_on(
        &self,
        annual_income: Decimal,
    ) -> Option<Decimal> {
        annual_income
            .checked_sub(self.min_income)?
            .checked_mul(self.tax_rate)?
            .checked_add(self.base_tax)
    }
}

/// A validated, ascending bracket table covering `[0, ∞)`.
///
/// The table can only be built through [`TaxTable::new`] (or deserialized,
/// which goes through the same checks), so lookups never miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct TaxTable {
    brackets: Vec<TaxBracket>,
}

impl TaxTable {
    /// Validates and wraps a bracket list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the list is empty, does not start at zero,
    /// has gaps or overlaps, has an unbounded bracket before the last one,
    /// has a bounded last bracket, or if rates are outside `[0, 1]` or do not
    /// strictly increase.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use pulse_core::{TaxBracket, TaxTable};
    ///
    /// let table = TaxTable::new(vec![
    ///     TaxBracket {
    ///         min_income: dec!(0),
    ///         max_income: Some(dec!(100000)),
    ///         tax_rate: dec!(0.10),
    ///         base_tax: dec!(0),
    ///     },
    ///     TaxBracket {
    ///         min_income: dec!(100000),
    ///         max_income: None,
    ///         tax_rate: dec!(0.20),
    ///         base_tax: dec!(10000),
    ///     },
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.brackets().len(), 2);
    /// ```
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ConfigError> {
        validate_brackets(&brackets)?;
        Ok(Self { brackets })
    }

    /// South African individual income tax tables for the 2024/25 year of
    /// assessment (1 March 2024 to 28 February 2025).
    pub fn sa_2024() -> Self {
        let rows = [
            (dec!(0), Some(dec!(237100)), dec!(0.18), dec!(0)),
            (dec!(237100), Some(dec!(370500)), dec!(0.26), dec!(42678)),
            (dec!(370500), Some(dec!(512800)), dec!(0.31), dec!(77362)),
            (dec!(512800), Some(dec!(673000)), dec!(0.36), dec!(121475)),
            (dec!(673000), Some(dec!(857900)), dec!(0.39), dec!(179147)),
            (dec!(857900), Some(dec!(1817000)), dec!(0.41), dec!(251258)),
            (dec!(1817000), None, dec!(0.45), dec!(644489)),
        ];

        Self {
            brackets: rows
                .into_iter()
                .map(|(min_income, max_income, tax_rate, base_tax)| TaxBracket {
                    min_income,
                    max_income,
                    tax_rate,
                    base_tax,
                })
                .collect(),
        }
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Finds the bracket for an annual income by upper threshold.
    ///
    /// An income exactly on a boundary belongs to the lower bracket; both
    /// brackets agree on the tax owed there.
    pub(crate) fn bracket_for(
        &self,
        annual_income: Decimal,
    ) -> &TaxBracket {
        let index = self
            .brackets
            .iter()
            .position(|b| b.max_income.is_none_or(|max| annual_income <= max))
            .unwrap_or(self.brackets.len() - 1);
        &self.brackets[index]
    }

    /// Unrounded annual tax on a non-negative annual income, or `None` on
    /// overflow.
    pub(crate) fn annual_tax(
        &self,
        annual_income: Decimal,
    ) -> Option<Decimal> {
        if annual_income <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }
        self.bracket_for(annual_income).tax_on(annual_income)
    }
}

impl Default for TaxTable {
    fn default() -> Self {
        Self::sa_2024()
    }
}

impl TryFrom<Vec<TaxBracket>> for TaxTable {
    type Error = ConfigError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<TaxTable> for Vec<TaxBracket> {
    fn from(table: TaxTable) -> Self {
        table.brackets
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), ConfigError> {
    let first = brackets.first().ok_or(ConfigError::NoTaxBrackets)?;
    if first.min_income != Decimal::ZERO {
        return Err(ConfigError::FirstBracketNotZero(first.min_income));
    }

    let last_index = brackets.len() - 1;
    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(ConfigError::InvalidRate {
                field: "tax_rate",
                value: bracket.tax_rate,
            });
        }
        if bracket.base_tax < Decimal::ZERO {
            return Err(ConfigError::NegativeAmount {
                field: "base_tax",
                value: bracket.base_tax,
            });
        }

        match bracket.max_income {
            Some(max_income) if index == last_index => {
                return Err(ConfigError::BoundedLastBracket(max_income));
            }
            Some(max_income) if max_income <= bracket.min_income => {
                return Err(ConfigError::EmptyBracket {
                    index,
                    min_income: bracket.min_income,
                    max_income,
                });
            }
            None if index != last_index => {
                return Err(ConfigError::UnboundedInnerBracket(index));
            }
            _ => {}
        }

        if index > 0 {
            let previous = &brackets[index - 1];
            // Inner brackets are bounded, checked on the previous iteration.
            let expected = previous.max_income.unwrap_or(previous.min_income);
            if bracket.min_income != expected {
                return Err(ConfigError::BracketGap {
                    index,
                    min_income: bracket.min_income,
                    expected,
                });
            }
            if bracket.tax_rate <= previous.tax_rate {
                return Err(ConfigError::RateNotIncreasing {
                    index,
                    rate: bracket.tax_rate,
                    previous: previous.tax_rate,
                });
            }
        }
    }

    Ok(())
}
