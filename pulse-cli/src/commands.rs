use anyhow::{Context, Result};
use tracing::debug;

use pulse_core::FinanceConfig;
use pulse_core::calculations::{
    CommuteCalculator, DeductionSavingCalculator, TakeHomeCalculator, allocate_percentages,
    allocation_status, compare_commute_cost, project_growth,
};
use pulse_data::{apply_bracket_file, load_config};

use crate::cli::{Cli, Command};
use crate::report;

/// Builds the configuration for a run: the built-in defaults, then the
/// `--config` file, then the `--brackets` table for the resulting tax year.
pub fn load_finance_config(cli: &Cli) -> Result<FinanceConfig> {
    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => FinanceConfig::default(),
    };

    match &cli.brackets {
        Some(path) => apply_bracket_file(config, path)
            .with_context(|| format!("Failed to load tax brackets: {}", path.display())),
        None => Ok(config),
    }
}

/// Runs the selected command and returns its report.
pub fn run(cli: &Cli) -> Result<String> {
    let config = load_finance_config(cli)?;
    debug!(command = ?cli.command, tax_year = config.tax_year, "Running command");

    let output = match &cli.command {
        Command::TakeHome { gross } => {
            let calculator = TakeHomeCalculator::new(&config)?;
            report::take_home(&calculator.compute_take_home(*gross)?)
        }
        Command::Growth {
            monthly,
            years,
            rate,
        } => report::growth(&project_growth(*monthly, *years, *rate)?),
        Command::RaSaving {
            gross,
            contribution,
        } => {
            let calculator = DeductionSavingCalculator::new(&config)?;
            report::deduction_saving(&calculator.compute_deduction_saving(*gross, *contribution)?)
        }
        Command::Budget { income, items } => {
            let categories = allocate_percentages(items, *income)?;
            let status = allocation_status(*income, items)?;
            report::budget(*income, &categories, &status)
        }
        Command::Fuel {
            km,
            consumption,
            price,
            days,
            share,
        } => {
            let calculator = CommuteCalculator::new(&config)?;
            let monthly_cost = calculator.monthly_fuel_cost(*km, *consumption, *days, *price)?;
            let per_person = share
                .map(|people| {
                    calculator
                        .per_person_cost(monthly_cost, people)
                        .map(|cost| (people, cost))
                })
                .transpose()?;
            report::fuel(monthly_cost, per_person)
        }
        Command::Compare { option_a, option_b } => {
            report::comparison(&compare_commute_cost(option_a.clone(), option_b.clone())?)
        }
        Command::Brackets => report::brackets(config.tax_year, &config.brackets),
    };

    Ok(output)
}
