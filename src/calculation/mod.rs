//! Calculation logic for the salary engine.
//!
//! This module contains the regional surtax table, national income tax,
//! employment tax credits, low-income relief, the tax engine that combines
//! them, the net-salary calculator, the gross-salary sweep and the
//! generated-wealth estimate.

mod brackets;
mod low_income_relief;
mod national_tax;
mod net_salary;
mod regional_surtax;
mod sweep;
mod tax_credits;
mod tax_engine;
mod wealth;

use rust_decimal::Decimal;

pub use brackets::{progressive_amount, single_rate_amount};
pub use low_income_relief::low_income_allowance;
pub use national_tax::{is_below_minimum, national_tax};
pub use net_salary::compute_breakdown;
pub use regional_surtax::{RegionalSurtaxTable, regional_surtax};
pub use sweep::sweep;
pub use tax_credits::{annual_employment_credit, employment_credit};
pub use tax_engine::{compute_tax, compute_tax_for_days};
pub use wealth::generated_wealth;

/// `rate_percent` percent of `value`.
pub(crate) fn percent_of(value: Decimal, rate_percent: Decimal) -> Decimal {
    value * rate_percent / Decimal::ONE_HUNDRED
}
