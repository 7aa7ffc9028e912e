//! Plain-text rendering of calculation results.

use rust_decimal::Decimal;

use pulse_core::TaxTable;
use pulse_core::calculations::{
    AllocationStatus, BudgetCategory, CommuteCostComparison, GrowthProjection, TakeHomeResult,
    TaxSavingResult,
};

use crate::utils::format_rand;

/// Two-column label/value rows, right-aligning the values.
#[derive(Debug, Default)]
struct Rows {
    rows: Vec<(String, String)>,
}

impl Rows {
    fn push(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    fn money(
        &mut self,
        label: impl Into<String>,
        value: Decimal,
    ) -> &mut Self {
        self.push(label, format_rand(value))
    }

    fn render(&self) -> String {
        let label_width = self.rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let value_width = self.rows.iter().map(|(_, v)| v.len()).max().unwrap_or(0);

        self.rows
            .iter()
            .map(|(label, value)| format!("{label:<label_width$}  {value:>value_width$}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn percent(value: Decimal) -> String {
    format!("{}%", value.normalize())
}

pub fn take_home(result: &TakeHomeResult) -> String {
    Rows::default()
        .money("Gross salary", result.gross_salary)
        .money("  Income tax", result.deductions.tax)
        .money("  UIF", result.deductions.uif)
        .money("  Medical aid", result.deductions.medical_aid)
        .money("  Retirement", result.deductions.retirement)
        .money("Total deductions", result.deductions.total)
        .money("Take-home pay", result.take_home_pay)
        .render()
}

pub fn growth(projection: &GrowthProjection) -> String {
    Rows::default()
        .money("Monthly contribution", projection.monthly_contribution)
        .push("Years", projection.years.to_string())
        .push("Annual return", percent(projection.annual_rate_percent))
        .money("Total contributed", projection.total_contributed)
        .money("Growth earned", projection.growth_earned)
        .money("Future value", projection.future_value)
        .render()
}

pub fn deduction_saving(result: &TaxSavingResult) -> String {
    Rows::default()
        .money("Gross salary", result.gross_salary)
        .money("Contribution", result.contribution)
        .money("Deductible", result.deductible_amount)
        .push("Marginal rate", percent(result.marginal_rate_percent))
        .money("Monthly tax saving", result.monthly_saving)
        .render()
}

pub fn budget(
    total_income: Decimal,
    categories: &[BudgetCategory],
    status: &AllocationStatus,
) -> String {
    let mut rows = Rows::default();
    rows.money("Income", total_income);
    for category in categories {
        rows.push(
            format!("  {}", category.name),
            format!(
                "{} ({})",
                format_rand(category.amount),
                percent(category.percentage_of_income)
            ),
        );
    }
    match status {
        AllocationStatus::UnderAllocated { remaining } => rows.money("Unallocated", *remaining),
        AllocationStatus::FullyAllocated => rows.push("Unallocated", "none"),
        AllocationStatus::OverAllocated { shortfall } => rows.money("Over budget by", *shortfall),
    };
    rows.render()
}

pub fn fuel(
    monthly_cost: Decimal,
    per_person: Option<(u32, Decimal)>,
) -> String {
    let mut rows = Rows::default();
    rows.money("Monthly fuel", monthly_cost);
    if let Some((people, share)) = per_person {
        rows.money(format!("Per person ({people})"), share);
    }
    rows.render()
}

pub fn comparison(comparison: &CommuteCostComparison) -> String {
    let cheaper = comparison.cheaper();
    Rows::default()
        .money(
            comparison.option_a.label.as_str(),
            comparison.option_a.monthly_cost,
        )
        .money(
            comparison.option_b.label.as_str(),
            comparison.option_b.monthly_cost,
        )
        .push("Cheaper", cheaper.label.as_str())
        .money("Monthly saving", comparison.monthly_savings_difference)
        .render()
}

pub fn brackets(
    tax_year: i32,
    table: &TaxTable,
) -> String {
    let mut rows = Rows::default();
    rows.push("Tax year", format!("{}/{:02}", tax_year, (tax_year + 1) % 100));
    for bracket in table.brackets() {
        let range = match bracket.max_income {
            Some(max) => format!("{} - {}", format_rand(bracket.min_income), format_rand(max)),
            None => format!("{} and above", format_rand(bracket.min_income)),
        };
        rows.push(
            range,
            format!(
                "{} + {}",
                format_rand(bracket.base_tax),
                percent(bracket.tax_rate * Decimal::ONE_HUNDRED)
            ),
        );
    }
    rows.render()
}
