//! Personal finance calculations.
//!
//! Each engine is independent of the others. Engines that need tax tables or
//! rate constants borrow them from a [`crate::FinanceConfig`]; the rest are
//! free functions.

pub mod budget;
pub mod common;
pub mod commute;
pub mod deduction_saving;
pub mod growth;
pub mod take_home;

pub use budget::{
    AllocationStatus, BudgetCategory, BudgetItem, allocate_percentages, allocation_status,
    remaining_after_allocation,
};
pub use commute::{
    CommuteCalculator, CommuteChoice, CommuteCostComparison, CommuteOption, compare_commute_cost,
};
pub use deduction_saving::{DeductionSavingCalculator, TaxSavingResult};
pub use growth::{GrowthProjection, project_growth};
pub use take_home::{Deductions, TakeHomeCalculator, TakeHomeResult};
