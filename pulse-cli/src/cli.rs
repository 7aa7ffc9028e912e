use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use pulse_core::calculations::{BudgetItem, CommuteOption};

use crate::utils::{parse_budget_item, parse_commute_option, parse_money};

/// Personal finance calculators for South African salaries.
///
/// Amounts are monthly Rand and accept forms like `35000`, `R35,000` or
/// `R 1 200.50`. Built-in rates are for the 2024/25 tax year; use `--config`
/// and `--brackets` to change them.
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML file overriding built-in rates, caps and the tax year
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV file of tax brackets; the table for the configured tax year is used
    #[arg(short, long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Log filter such as "debug" (defaults to RUST_LOG, then "warn")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Take-home pay from a gross monthly salary
    TakeHome {
        /// Gross monthly salary
        #[arg(value_parser = parse_money, allow_negative_numbers = true)]
        gross: Decimal,
    },

    /// Future value of a fixed monthly contribution
    Growth {
        /// Amount invested every month
        #[arg(short, long, value_parser = parse_money, allow_negative_numbers = true)]
        monthly: Decimal,

        /// Investment period in whole years
        #[arg(short, long)]
        years: u32,

        /// Expected annual return as a percentage, e.g. 10 for 10%
        #[arg(short, long, value_parser = parse_money, allow_negative_numbers = true)]
        rate: Decimal,
    },

    /// Monthly tax saved by a retirement annuity contribution
    RaSaving {
        /// Gross monthly salary
        #[arg(value_parser = parse_money, allow_negative_numbers = true)]
        gross: Decimal,

        /// Monthly retirement annuity contribution
        #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
        contribution: Decimal,
    },

    /// Share of income taken by each budget category
    Budget {
        /// Total monthly income
        #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
        income: Decimal,

        /// A category as NAME=AMOUNT; repeat for each category
        #[arg(long = "item", value_name = "NAME=AMOUNT", value_parser = parse_budget_item)]
        items: Vec<BudgetItem>,
    },

    /// Monthly fuel cost of driving to work
    Fuel {
        /// One-way distance to work in km
        #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
        km: Decimal,

        /// Fuel consumption in litres per 100 km
        #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
        consumption: Decimal,

        /// Fuel price per litre
        #[arg(long, value_parser = parse_money, allow_negative_numbers = true)]
        price: Decimal,

        /// Work days per week
        #[arg(long, default_value_t = 5)]
        days: u32,

        /// Split the cost evenly between this many people
        #[arg(long)]
        share: Option<u32>,
    },

    /// Compare two commute options given as LABEL=MONTHLY_COST
    Compare {
        #[arg(value_name = "LABEL=COST", value_parser = parse_commute_option)]
        option_a: CommuteOption,

        #[arg(value_name = "LABEL=COST", value_parser = parse_commute_option)]
        option_b: CommuteOption,
    },

    /// Show the tax bracket table in use
    Brackets,
}
