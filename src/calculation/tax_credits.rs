//! Employment income tax credit (detrazioni per lavoro dipendente).
//!
//! The credit is looked up in the configured formula tiers on an annual
//! basis, then pro-rated by the share of the year actually worked.

use rust_decimal::Decimal;

use crate::config::{EmploymentCreditConfig, evaluate_tiers};

/// Computes the annual employment tax credit, before pro-ration.
///
/// Incomes under the configured minimum earn no credit.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::annual_employment_credit;
/// use salary_engine::config::TaxRules;
/// use rust_decimal_macros::dec;
///
/// let rules = TaxRules::year_2026();
/// let config = rules.employment_credits();
/// assert_eq!(annual_employment_credit(dec!(12000), config), dec!(3155));
/// assert_eq!(annual_employment_credit(dec!(8000), config), dec!(0));
/// ```
pub fn annual_employment_credit(income: Decimal, config: &EmploymentCreditConfig) -> Decimal {
    if income < config.minimum_income {
        return Decimal::ZERO;
    }
    evaluate_tiers(&config.tiers, income).max(Decimal::ZERO)
}

/// Computes the employment tax credit pro-rated by days worked.
///
/// `days_worked = None` means the whole year. Callers are expected to
/// have checked `days_worked <= days_in_year`.
pub fn employment_credit(
    income: Decimal,
    days_worked: Option<u32>,
    days_in_year: u32,
    config: &EmploymentCreditConfig,
) -> Decimal {
    let annual = annual_employment_credit(income, config);
    match days_worked {
        Some(days) if days_in_year > 0 => {
            annual * Decimal::from(days) / Decimal::from(days_in_year)
        }
        _ => annual,
    }
}
