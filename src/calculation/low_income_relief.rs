//! Low-income allowance (agevolazioni) calculation.

use rust_decimal::Decimal;

use crate::config::{LowIncomeAllowanceConfig, LowIncomeRelief, evaluate_tiers};

/// Computes the low-income allowance for `income` under `relief`.
///
/// - [`LowIncomeRelief::Tiered`] evaluates the allowance tiers at every
///   income.
/// - [`LowIncomeRelief::FlatBelowMinimum`] grants `flat_rate × income`
///   only when income is under `minimum_taxable_income`.
///
/// Non-positive incomes get nothing under either policy.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::low_income_allowance;
/// use salary_engine::config::{LowIncomeRelief, TaxRules};
/// use rust_decimal_macros::dec;
///
/// let rules = TaxRules::year_2026();
/// let config = rules.low_income_allowances();
/// let minimum = rules.national_tax().minimum_taxable_income;
///
/// assert_eq!(
///     low_income_allowance(dec!(25000), LowIncomeRelief::Tiered, config, minimum),
///     dec!(1000)
/// );
/// assert_eq!(
///     low_income_allowance(dec!(25000), LowIncomeRelief::FlatBelowMinimum, config, minimum),
///     dec!(0)
/// );
/// ```
pub fn low_income_allowance(
    income: Decimal,
    relief: LowIncomeRelief,
    config: &LowIncomeAllowanceConfig,
    minimum_taxable_income: Decimal,
) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match relief {
        LowIncomeRelief::Tiered => evaluate_tiers(&config.tiers, income).max(Decimal::ZERO),
        LowIncomeRelief::FlatBelowMinimum if income < minimum_taxable_income => {
            income * config.flat_rate
        }
        LowIncomeRelief::FlatBelowMinimum => Decimal::ZERO,
    }
}
