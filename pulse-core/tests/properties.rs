//! Property tests over the calculation engines using the default 2024/25
//! configuration.

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use pulse_core::FinanceConfig;
use pulse_core::calculations::common::round_to_unit;
use pulse_core::calculations::{
    BudgetItem, DeductionSavingCalculator, TakeHomeCalculator, allocate_percentages,
    project_growth,
};

/// Converts whole cents into Rand.
fn rand(cents: u64) -> Decimal {
    Decimal::new(cents as i64, 2)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_tax_never_decreases_with_income(
        lower_cents in 0u64..30_000_000,
        extra_cents in 1u64..10_000_000,
    ) {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let lower = calculator.compute_take_home(rand(lower_cents)).unwrap();
        let higher = calculator
            .compute_take_home(rand(lower_cents + extra_cents))
            .unwrap();

        prop_assert!(higher.deductions.tax >= lower.deductions.tax);
    }

    #[test]
    fn prop_take_home_is_gross_less_total(gross_cents in 0u64..50_000_000) {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let result = calculator.compute_take_home(rand(gross_cents)).unwrap();

        prop_assert_eq!(
            result.take_home_pay,
            result.gross_salary - result.deductions.total
        );
        prop_assert!(result.deductions.tax >= Decimal::ZERO);
        prop_assert!(result.deductions.uif >= Decimal::ZERO);
        prop_assert!(result.deductions.retirement >= Decimal::ZERO);
    }

    #[test]
    fn prop_take_home_is_repeatable(gross_cents in 0u64..50_000_000) {
        let config = FinanceConfig::default();
        let calculator = TakeHomeCalculator::new(&config).unwrap();

        let first = calculator.compute_take_home(rand(gross_cents));
        let second = calculator.compute_take_home(rand(gross_cents));

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_zero_rate_growth_equals_contributions(
        monthly in 0u32..100_000,
        years in 1u32..60,
    ) {
        let projection = project_growth(Decimal::from(monthly), years, dec!(0)).unwrap();

        prop_assert_eq!(
            projection.future_value,
            Decimal::from(monthly) * Decimal::from(years) * dec!(12)
        );
        prop_assert_eq!(projection.growth_earned, Decimal::ZERO);
    }

    #[test]
    fn prop_growth_is_never_negative(
        monthly_cents in 1u64..5_000_000,
        years in 1u32..40,
        rate_bp in 1u32..2_000,
    ) {
        let rate = Decimal::new(i64::from(rate_bp), 2);

        let projection = project_growth(rand(monthly_cents), years, rate).unwrap();

        prop_assert!(projection.growth_earned >= Decimal::ZERO);
        prop_assert!(projection.future_value >= projection.total_contributed);
        prop_assert_eq!(
            projection.future_value,
            projection.total_contributed + projection.growth_earned
        );
    }

    // The smallest case, R100 a month at 1% for a year, earns about R5.50.
    #[test]
    fn prop_material_growth_is_positive(
        monthly in 100u32..50_000,
        years in 1u32..40,
        rate_bp in 100u32..2_000,
    ) {
        let rate = Decimal::new(i64::from(rate_bp), 2);

        let projection = project_growth(Decimal::from(monthly), years, rate).unwrap();

        prop_assert!(projection.growth_earned > Decimal::ZERO);
    }

    #[test]
    fn prop_growth_is_repeatable(
        monthly in 0u32..50_000,
        years in 1u32..40,
        rate_bp in 0u32..2_000,
    ) {
        let rate = Decimal::new(i64::from(rate_bp), 2);

        let first = project_growth(Decimal::from(monthly), years, rate);
        let second = project_growth(Decimal::from(monthly), years, rate);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_deduction_never_exceeds_contribution(
        gross_cents in 0u64..50_000_000,
        contribution_cents in 0u64..5_000_000,
    ) {
        let config = FinanceConfig::default();
        let calculator = DeductionSavingCalculator::new(&config).unwrap();
        let contribution = rand(contribution_cents);

        let result = calculator
            .compute_deduction_saving(rand(gross_cents), contribution)
            .unwrap();

        prop_assert!(result.deductible_amount <= round_to_unit(contribution));
        prop_assert!(result.monthly_saving <= result.deductible_amount);
    }

    #[test]
    fn prop_allocation_preserves_order(
        amounts in proptest::collection::vec(0u32..50_000, 0..12),
        income in 1u32..200_000,
    ) {
        let items: Vec<BudgetItem> = amounts
            .iter()
            .enumerate()
            .map(|(index, amount)| BudgetItem::new(format!("category-{index}"), Decimal::from(*amount)))
            .collect();

        let result = allocate_percentages(&items, Decimal::from(income)).unwrap();

        prop_assert_eq!(result.len(), items.len());
        for (category, item) in result.iter().zip(&items) {
            prop_assert_eq!(&category.name, &item.name);
            prop_assert_eq!(category.amount, item.amount);
        }
    }
}

#[test]
fn default_brackets_agree_at_every_boundary() {
    let config = FinanceConfig::default();

    for pair in config.brackets.brackets().windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);

        assert_eq!(lower.tax_on(upper.min_income), upper.tax_on(upper.min_income));
    }
}

#[test]
fn tax_changes_by_at_most_a_rand_across_a_boundary() {
    let config = FinanceConfig::default();
    let calculator = TakeHomeCalculator::new(&config).unwrap();

    for bracket in config.brackets.brackets().iter().skip(1) {
        let below = (bracket.min_income - dec!(1)) / dec!(12);
        let above = (bracket.min_income + dec!(1)) / dec!(12);

        let tax_below = calculator.compute_take_home(below).unwrap().deductions.tax;
        let tax_above = calculator.compute_take_home(above).unwrap().deductions.tax;

        assert!(tax_above >= tax_below);
        assert!(tax_above - tax_below <= dec!(1));
    }
}
