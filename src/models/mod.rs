//! Core data models for the salary engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod breakdown;
mod region;
mod salary_input;
mod scenario;

pub(crate) use audit::AuditLog;
pub use audit::AuditStep;
pub use breakdown::{PensionDeductibility, SalaryBreakdown, TaxAssessment};
pub use region::Region;
pub use salary_input::{
    Bonus, BonusTaxation, ContractType, DEFAULT_PAY_PERIODS, DEFAULT_VACATION_DAYS,
    DEFAULT_WEEKLY_HOURS, MAX_AMOUNT, MAX_WEEKLY_HOURS, PAY_PERIODS_RANGE, SalaryInput,
};
pub use scenario::{GeneratedWealth, SweepRow, WealthWeights};
