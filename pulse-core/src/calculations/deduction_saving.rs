//! Tax saved by a retirement annuity contribution.
//!
//! Contributions reduce taxable income up to the smaller of a share of
//! remuneration and an absolute annual cap. The saving is the deductible
//! amount taxed at the marginal rate: the rate of the bracket the annual
//! salary falls in, not the effective rate.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pulse_core::FinanceConfig;
//! use pulse_core::calculations::DeductionSavingCalculator;
//!
//! let config = FinanceConfig::default();
//! let calculator = DeductionSavingCalculator::new(&config).unwrap();
//!
//! let result = calculator.compute_deduction_saving(dec!(35000), dec!(2000)).unwrap();
//!
//! assert_eq!(result.marginal_rate_percent, dec!(31));
//! assert_eq!(result.monthly_saving, dec!(620));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{MONTHS_PER_YEAR, checked, require_non_negative, round_to_unit};
use crate::error::{ConfigError, InvalidInput};
use crate::{FinanceConfig, RetirementAnnuityLimits, TaxTable};

/// Result of a retirement contribution tax-saving calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSavingResult {
    pub gross_salary: Decimal,
    pub contribution: Decimal,

    /// Marginal rate as a percentage (31 for 31%).
    pub marginal_rate_percent: Decimal,

    /// Portion of the contribution that reduces taxable income.
    pub deductible_amount: Decimal,

    /// Monthly tax no longer payable because of the deduction.
    pub monthly_saving: Decimal,
}

/// Calculates the monthly tax saving from a retirement contribution.
#[derive(Debug, Clone)]
pub struct DeductionSavingCalculator<'a> {
    brackets: &'a TaxTable,
    limits: &'a RetirementAnnuityLimits,
}

impl<'a> DeductionSavingCalculator<'a> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`FinanceConfig::validate`].
    pub fn new(config: &'a FinanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            brackets: &config.brackets,
            limits: &config.retirement_annuity,
        })
    }

    /// Calculates the saving for a monthly `contribution` against a gross
    /// monthly salary.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Negative`] if either argument is below zero, or
    /// [`InvalidInput::Overflow`] if the salary is too large to place in a
    /// bracket.
    pub fn compute_deduction_saving(
        &self,
        gross_monthly_salary: Decimal,
        contribution: Decimal,
    ) -> Result<TaxSavingResult, InvalidInput> {
        let gross = require_non_negative("gross_monthly_salary", gross_monthly_salary)?;
        let contribution = require_non_negative("contribution", contribution)?;

        let marginal_rate = self.marginal_rate(gross)?;
        let deductible = contribution.min(self.monthly_cap(gross)?);
        let saving = checked("contribution", deductible.checked_mul(marginal_rate))?;

        debug!(
            gross = %gross,
            contribution = %contribution,
            deductible = %deductible,
            marginal_rate = %marginal_rate,
            "Calculated retirement contribution saving"
        );

        Ok(TaxSavingResult {
            gross_salary: round_to_unit(gross),
            contribution: round_to_unit(contribution),
            marginal_rate_percent: (marginal_rate * Decimal::ONE_HUNDRED).normalize(),
            deductible_amount: round_to_unit(deductible),
            monthly_saving: round_to_unit(saving),
        })
    }

    /// Rate of the bracket containing the annual salary.
    fn marginal_rate(
        &self,
        gross: Decimal,
    ) -> Result<Decimal, InvalidInput> {
        let annual_salary = checked(
            "gross_monthly_salary",
            gross.checked_mul(MONTHS_PER_YEAR),
        )?;
        Ok(self.brackets.bracket_for(annual_salary).tax_rate)
    }

    /// Most that may be deducted in a month.
    fn monthly_cap(
        &self,
        gross: Decimal,
    ) -> Result<Decimal, InvalidInput> {
        let income_limit = checked(
            "gross_monthly_salary",
            gross.checked_mul(self.limits.deductible_fraction),
        )?;
        let absolute_limit = self.limits.annual_cap / MONTHS_PER_YEAR;
        Ok(income_limit.min(absolute_limit))
    }
}
