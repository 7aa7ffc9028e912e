//! Commute cost estimates: monthly fuel, lift-club sharing and comparing two
//! ways of getting to work.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use pulse_core::FinanceConfig;
//! use pulse_core::calculations::{CommuteCalculator, CommuteChoice, CommuteOption, compare_commute_cost};
//!
//! let config = FinanceConfig::default();
//! let calculator = CommuteCalculator::new(&config).unwrap();
//!
//! // 25 km × 5 days × 4.33 weeks = 541.25 km; 43.3 l at R23.50
//! let fuel = calculator
//!     .monthly_fuel_cost(dec!(25), dec!(8), 5, dec!(23.50))
//!     .unwrap();
//! assert_eq!(fuel, dec!(1018));
//!
//! let comparison = compare_commute_cost(
//!     CommuteOption::new("Car", dec!(3500)),
//!     CommuteOption::new("Bus", dec!(2800)),
//! )
//! .unwrap();
//! assert_eq!(comparison.cheaper_option, CommuteChoice::B);
//! assert_eq!(comparison.monthly_savings_difference, dec!(700));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{checked, require_non_negative, round_to_unit};
use crate::error::{ConfigError, InvalidInput};
use crate::{CommuteConfig, FinanceConfig};

const DAYS_PER_WEEK: u32 = 7;

/// One way of commuting and its fully loaded monthly cost.
///
/// The cost is whatever the caller has already added up: fuel, fares,
/// insurance, tolls, parking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuteOption {
    pub label: String,
    pub monthly_cost: Decimal,
}

impl CommuteOption {
    pub fn new(
        label: impl Into<String>,
        monthly_cost: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            monthly_cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommuteChoice {
    A,
    B,
}

/// The result of comparing two commute options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuteCostComparison {
    pub option_a: CommuteOption,
    pub option_b: CommuteOption,

    /// The strictly cheaper option; `A` when both cost the same.
    pub cheaper_option: CommuteChoice,

    pub monthly_savings_difference: Decimal,
}

impl CommuteCostComparison {
    pub fn cheaper(&self) -> &CommuteOption {
        match self.cheaper_option {
            CommuteChoice::A => &self.option_a,
            CommuteChoice::B => &self.option_b,
        }
    }
}

/// Fuel and sharing costs for driving to work.
#[derive(Debug, Clone)]
pub struct CommuteCalculator<'a> {
    config: &'a CommuteConfig,
}

impl<'a> CommuteCalculator<'a> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`FinanceConfig::validate`].
    pub fn new(config: &'a FinanceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: &config.commute,
        })
    }

    /// Monthly fuel cost of a commute.
    ///
    /// Distance is `km_per_day_one_way × work_days_per_week × weeks_per_month`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if any amount is negative,
    /// `work_days_per_week` is more than 7, or the cost overflows.
    pub fn monthly_fuel_cost(
        &self,
        km_per_day_one_way: Decimal,
        litres_per_100km: Decimal,
        work_days_per_week: u32,
        fuel_price_per_litre: Decimal,
    ) -> Result<Decimal, InvalidInput> {
        require_non_negative("km_per_day_one_way", km_per_day_one_way)?;
        require_non_negative("litres_per_100km", litres_per_100km)?;
        require_non_negative("fuel_price_per_litre", fuel_price_per_litre)?;
        if work_days_per_week > DAYS_PER_WEEK {
            return Err(InvalidInput::TooLarge {
                field: "work_days_per_week",
                max: DAYS_PER_WEEK,
                value: work_days_per_week,
            });
        }

        let cost = km_per_day_one_way
            .checked_mul(Decimal::from(work_days_per_week))
            .and_then(|km| km.checked_mul(self.config.weeks_per_month))
            .and_then(|km| km.checked_div(Decimal::ONE_HUNDRED))
            .and_then(|hundreds| hundreds.checked_mul(litres_per_100km))
            .and_then(|litres| litres.checked_mul(fuel_price_per_litre));
        Ok(round_to_unit(checked("km_per_day_one_way", cost)?))
    }

    /// Each person's share of a cost split evenly.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `total_cost` is negative or
    /// `number_of_people` is zero.
    pub fn per_person_cost(
        &self,
        total_cost: Decimal,
        number_of_people: u32,
    ) -> Result<Decimal, InvalidInput> {
        require_non_negative("total_cost", total_cost)?;
        if number_of_people < 1 {
            return Err(InvalidInput::TooSmall {
                field: "number_of_people",
                min: 1,
                value: number_of_people,
            });
        }
        Ok(round_to_unit(total_cost / Decimal::from(number_of_people)))
    }
}

/// Picks the cheaper of two commute options.
///
/// # Errors
///
/// Returns [`InvalidInput::Negative`] if either monthly cost is below zero.
pub fn compare_commute_cost(
    option_a: CommuteOption,
    option_b: CommuteOption,
) -> Result<CommuteCostComparison, InvalidInput> {
    require_non_negative("option_a.monthly_cost", option_a.monthly_cost)?;
    require_non_negative("option_b.monthly_cost", option_b.monthly_cost)?;

    let cheaper_option = if option_b.monthly_cost < option_a.monthly_cost {
        CommuteChoice::B
    } else {
        CommuteChoice::A
    };
    let monthly_savings_difference =
        round_to_unit((option_a.monthly_cost - option_b.monthly_cost).abs());

    Ok(CommuteCostComparison {
        option_a,
        option_b,
        cheaper_option,
        monthly_savings_difference,
    })
}
