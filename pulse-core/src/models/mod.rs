mod finance_config;
mod tax_bracket;

pub use finance_config::{
    CommuteConfig, FinanceConfig, PayrollDeductionConfig, RetirementAnnuityLimits,
};
pub use tax_bracket::{TaxBracket, TaxTable};
