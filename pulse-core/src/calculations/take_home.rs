//! Take-home pay calculation for South African salaried employees.
//!
//! Gross monthly salary is reduced by four deductions:
//!
//! | Deduction   | Formula |
//! |-------------|---------|
//! | Income tax  | annual tax on `gross × 12` from the bracket table, divided by 12 |
//! | UIF         | `min(gross × uif_rate, uif_monthly_cap)` |
//! | Medical aid | flat `medical_aid_monthly` |
//! | Retirement  | `gross × retirement_rate` |
//!
//! Every figure is rounded to the nearest Rand on output. The total is
//! rounded from the unrounded sum, so it can differ by a Rand from adding the
//! rounded parts.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pulse_core::FinanceConfig;
//! use pulse_core::calculations::TakeHomeCalculator;
//!
//! let config = FinanceConfig::default();
//! let calculator = TakeHomeCalculator::new(&config).unwrap();
//!
//! let result = calculator.compute_take_home(dec!(35000)).unwrap();
//!
//! assert_eq!(result.deductions.tax, dec!(7726));
//! assert_eq!(result.deductions.uif, dec!(177));
//! assert_eq!(result.take_home_pay, dec!(23272));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{MONTHS_PER_YEAR, checked, require_non_negative, round_to_unit};
use crate::error::{ConfigError, InvalidInput};
use crate::{FinanceConfig, PayrollDeductionConfig, TaxTable};

/// Monthly deductions taken from gross salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// PAYE income tax.
    pub tax: Decimal,
    pub uif: Decimal,
    pub medical_aid: Decimal,
    pub retirement: Decimal,
    pub total: Decimal,
}

/// Result of a take-home pay calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeHomeResult {
    pub gross_salary: Decimal,

    /// Gross salary less `deductions.total`.
    ///
    /// Negative when fixed deductions exceed a low salary.
    pub take_home_pay: Decimal,

    pub deductions: Deductions,
}

/// Converts gross monthly salary to take-home pay.
#[derive(Debug, Clone)]
pub struct TakeHomeCalculator<'a> {
    brackets: &'a TaxTable,
    payroll: &'a PayrollDeductionConfig,
}

impl<'a> TakeHomeCalculator<'a> {
    /// Creates a calculator over the brackets and payroll settings in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`FinanceConfig::validate`].
    pub fn new(config: &'a FinanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            brackets: &config.brackets,
            payroll: &config.payroll,
        })
    }

    /// Calculates take-home pay for a gross monthly salary.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::Negative`] if `gross_monthly_salary` is below
    /// zero, or [`InvalidInput::Overflow`] if it is too large to tax.
    pub fn compute_take_home(
        &self,
        gross_monthly_salary: Decimal,
    ) -> Result<TakeHomeResult, InvalidInput> {
        let gross = require_non_negative("gross_monthly_salary", gross_monthly_salary)?;

        let tax = self.monthly_tax(gross)?;
        let uif = self.uif(gross)?;
        let medical_aid = self.payroll.medical_aid_monthly;
        let retirement = self.retirement(gross)?;
        let total = checked(
            "gross_monthly_salary",
            tax.checked_add(uif)
                .and_then(|sum| sum.checked_add(medical_aid))
                .and_then(|sum| sum.checked_add(retirement)),
        )?;

        let gross_salary = round_to_unit(gross);
        let deductions = Deductions {
            tax: round_to_unit(tax),
            uif: round_to_unit(uif),
            medical_aid: round_to_unit(medical_aid),
            retirement: round_to_unit(retirement),
            total: round_to_unit(total),
        };
        let take_home_pay = gross_salary - deductions.total;

        if take_home_pay < Decimal::ZERO {
            warn!(
                gross_salary = %gross_salary,
                total_deductions = %deductions.total,
                take_home_pay = %take_home_pay,
                "Deductions exceed gross salary; take-home pay is negative"
            );
        }

        Ok(TakeHomeResult {
            gross_salary,
            take_home_pay,
            deductions,
        })
    }

    /// Unrounded monthly income tax.
    fn monthly_tax(
        &self,
        gross: Decimal,
    ) -> Result<Decimal, InvalidInput> {
        let annual_salary = checked(
            "gross_monthly_salary",
            gross.checked_mul(MONTHS_PER_YEAR),
        )?;
        let bracket = self.brackets.bracket_for(annual_salary);
        debug!(
            annual_salary = %annual_salary,
            min_income = %bracket.min_income,
            tax_rate = %bracket.tax_rate,
            "Selected tax bracket"
        );
        let annual_tax = checked(
            "gross_monthly_salary",
            self.brackets.annual_tax(annual_salary),
        )?;
        Ok(annual_tax / MONTHS_PER_YEAR)
    }

    /// UIF contribution, capped.
    fn uif(
        &self,
        gross: Decimal,
    ) -> Result<Decimal, InvalidInput> {
        let uif = checked(
            "gross_monthly_salary",
            gross.checked_mul(self.payroll.uif_rate),
        )?;
        Ok(uif.min(self.payroll.uif_monthly_cap))
    }

    /// Retirement fund contribution.
    fn retirement(
        &self,
        gross: Decimal,
    ) -> Result<Decimal, InvalidInput> {
        checked(
            "gross_monthly_salary",
            gross.checked_mul(self.payroll.retirement_rate),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // component tests
    // =========================================================================

    #[test]
    fn monthly_tax_in_31_percent_bracket() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        // (77362 + (420000 - 370500) * 0.31) / 12 = 92707 / 12
        let tax = calculator.monthly_tax(dec!(35000)).unwrap();

        assert_eq!(round_to_unit(tax), dec!(7726));
        assert!(tax > dec!(7725.58) && tax < dec!(7725.59));
    }

    #[test]
    fn monthly_tax_in_first_bracket() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        // 120000 * 0.18 / 12 = 1800
        assert_eq!(calculator.monthly_tax(dec!(10000)), Ok(dec!(1800)));
    }

    #[test]
    fn uif_below_cap_is_one_percent() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        assert_eq!(calculator.uif(dec!(12000)), Ok(dec!(120.00)));
    }

    #[test]
    fn uif_is_capped() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        assert_eq!(calculator.uif(dec!(35000)), Ok(dec!(177.12)));
    }

    #[test]
    fn retirement_uses_configured_rate() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        assert_eq!(calculator.retirement(dec!(35000)), Ok(dec!(2625.000)));
    }

    // =========================================================================
    // compute_take_home tests
    // =========================================================================

    #[test]
    fn compute_take_home_standard_case() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(dec!(35000)).unwrap();

        assert_eq!(
            result.deductions,
            Deductions {
                tax: dec!(7726),
                uif: dec!(177),
                medical_aid: dec!(1200),
                retirement: dec!(2625),
                // 7725.583 + 177.12 + 1200 + 2625 = 11727.703
                total: dec!(11728),
            }
        );
        assert_eq!(result.take_home_pay, dec!(23272));
        assert_eq!(result.gross_salary, dec!(35000));
    }

    #[test]
    fn compute_take_home_zero_salary_is_negative_not_error() {
        let _guard = init_test_tracing();
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(dec!(0)).unwrap();

        assert_eq!(result.deductions.tax, dec!(0));
        assert_eq!(result.deductions.uif, dec!(0));
        assert_eq!(result.deductions.total, dec!(1200));
        assert_eq!(result.take_home_pay, dec!(-1200));
    }

    #[test]
    fn compute_take_home_rejects_negative_salary() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(dec!(-1));

        assert_eq!(
            result,
            Err(InvalidInput::Negative {
                field: "gross_monthly_salary",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn compute_take_home_satisfies_total_invariant() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        for gross in [dec!(4500.50), dec!(18000), dec!(61234.75), dec!(250000)] {
            let result = calculator.compute_take_home(gross).unwrap();

            assert_eq!(
                result.take_home_pay,
                result.gross_salary - result.deductions.total
            );
        }
    }

    #[test]
    fn compute_take_home_reports_overflow() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(Decimal::MAX / dec!(10));

        assert_eq!(
            result,
            Err(InvalidInput::Overflow {
                field: "gross_monthly_salary",
            })
        );
    }

    #[test]
    fn compute_take_home_handles_largest_taxable_salary() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(Decimal::MAX / dec!(13)).unwrap();

        assert_eq!(
            result.take_home_pay,
            result.gross_salary - result.deductions.total
        );
    }

    #[test]
    fn compute_take_home_top_bracket() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(dec!(200000)).unwrap();

        // (644489 + (2400000 - 1817000) * 0.45) / 12 = 906839 / 12 = 75569.92
        assert_eq!(result.deductions.tax, dec!(75570));
    }

    #[test]
    fn compute_take_home_uses_overridden_config() {
        let config = FinanceConfig {
            payroll: PayrollDeductionConfig {
                medical_aid_monthly: dec!(0),
                retirement_rate: dec!(0),
                ..PayrollDeductionConfig::default()
            },
            ..FinanceConfig::default()
        };
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(dec!(10000)).unwrap();

        // tax 1800, UIF 100
        assert_eq!(result.deductions.total, dec!(1900));
        assert_eq!(result.take_home_pay, dec!(8100));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = FinanceConfig::default();
        config.payroll.uif_rate = dec!(2);

        let result = TakeHomeCalculator::new(&config);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidRate {
                field: "uif_rate",
                ..
            })
        ));
    }

    #[test]
    fn compute_take_home_is_repeatable() {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let first = calculator.compute_take_home(dec!(27500.25)).unwrap();
        let second = calculator.compute_take_home(dec!(27500.25)).unwrap();

        assert_eq!(first, second);
    }
}
