use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::TaxTable;
use crate::error::ConfigError;

/// Monthly payroll deductions applied alongside income tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollDeductionConfig {
    /// Employee UIF contribution as a fraction of gross salary.
    pub uif_rate: Decimal,

    /// Maximum monthly UIF contribution.
    ///
    /// R177.12 is 1% of the R17,712 monthly remuneration ceiling.
    pub uif_monthly_cap: Decimal,

    /// Flat monthly medical aid contribution, independent of salary.
    pub medical_aid_monthly: Decimal,

    /// Pension or provident fund contribution as a fraction of gross salary.
    pub retirement_rate: Decimal,
}

impl Default for PayrollDeductionConfig {
    fn default() -> Self {
        Self {
            uif_rate: dec!(0.01),
            uif_monthly_cap: dec!(177.12),
            medical_aid_monthly: dec!(1200),
            retirement_rate: dec!(0.075),
        }
    }
}

/// Limits on the deductible portion of retirement annuity contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetirementAnnuityLimits {
    /// Share of remuneration that may be deducted (27.5%).
    pub deductible_fraction: Decimal,

    /// Absolute annual deduction ceiling.
    pub annual_cap: Decimal,
}

impl Default for RetirementAnnuityLimits {
    fn default() -> Self {
        Self {
            deductible_fraction: dec!(0.275),
            annual_cap: dec!(350000),
        }
    }
}

/// Constants used by the commute cost calculations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommuteConfig {
    /// Average weeks per month.
    ///
    /// 4.33 is the usual rounded figure, slightly below 52 / 12 = 4.333...
    pub weeks_per_month: Decimal,
}

impl Default for CommuteConfig {
    fn default() -> Self {
        Self {
            weeks_per_month: dec!(4.33),
        }
    }
}

/// Every tunable constant the calculation engines read.
///
/// Engines only ever borrow a `FinanceConfig`; nothing mutates one after it
/// is built. Any section left out of a serialized config falls back to the
/// 2024/25 South African defaults.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use pulse_core::{FinanceConfig, PayrollDeductionConfig};
///
/// let config = FinanceConfig {
///     payroll: PayrollDeductionConfig {
///         medical_aid_monthly: dec!(1800),
///         ..PayrollDeductionConfig::default()
///     },
///     ..FinanceConfig::default()
/// };
///
/// assert_eq!(config.validate(), Ok(()));
/// assert_eq!(config.tax_year, 2024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinanceConfig {
    /// First calendar year of the year of assessment (2024 for 2024/25).
    pub tax_year: i32,
    pub brackets: TaxTable,
    pub payroll: PayrollDeductionConfig,
    pub retirement_annuity: RetirementAnnuityLimits,
    pub commute: CommuteConfig,
}

impl FinanceConfig {
    /// South African defaults for the 2024/25 year of assessment.
    pub fn sa_2024() -> Self {
        Self {
            tax_year: 2024,
            brackets: TaxTable::sa_2024(),
            payroll: PayrollDeductionConfig::default(),
            retirement_annuity: RetirementAnnuityLimits::default(),
            commute: CommuteConfig::default(),
        }
    }

    /// Validates every non-bracket value.
    ///
    /// The bracket table is validated when it is constructed, so it is not
    /// checked again here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - any rate or fraction is outside `[0, 1]`
    /// - any amount or cap is negative
    /// - `weeks_per_month` is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("uif_rate", self.payroll.uif_rate)?;
        check_fraction("retirement_rate", self.payroll.retirement_rate)?;
        check_fraction(
            "deductible_fraction",
            self.retirement_annuity.deductible_fraction,
        )?;
        check_amount("uif_monthly_cap", self.payroll.uif_monthly_cap)?;
        check_amount("medical_aid_monthly", self.payroll.medical_aid_monthly)?;
        check_amount("annual_cap", self.retirement_annuity.annual_cap)?;

        if self.commute.weeks_per_month <= Decimal::ZERO {
            return Err(ConfigError::InvalidWeeksPerMonth(
                self.commute.weeks_per_month,
            ));
        }
        Ok(())
    }
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self::sa_2024()
    }
}

fn check_fraction(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ConfigError::InvalidRate { field, value });
    }
    Ok(())
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), ConfigError> {
    if value < Decimal::ZERO {
        return Err(ConfigError::NegativeAmount { field, value });
    }
    Ok(())
}
