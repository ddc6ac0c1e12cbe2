//! National income tax (IRPEF) calculation.

use rust_decimal::Decimal;

use crate::config::NationalTaxConfig;

use super::brackets::progressive_amount;

/// Computes progressive national income tax on `taxable_income`.
///
/// The full bracket structure is always applied; the minimum-income rule
/// is the tax engine's concern, see [`is_below_minimum`].
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::national_tax;
/// use salary_engine::config::TaxRules;
/// use rust_decimal_macros::dec;
///
/// let rules = TaxRules::year_2026();
/// assert_eq!(national_tax(dec!(40000), rules.national_tax()), dec!(10400));
/// ```
pub fn national_tax(taxable_income: Decimal, config: &NationalTaxConfig) -> Decimal {
    progressive_amount(taxable_income, &config.brackets)
}

/// Returns true when gross tax must be forced to zero.
pub fn is_below_minimum(taxable_income: Decimal, config: &NationalTaxConfig) -> bool {
    taxable_income < config.minimum_taxable_income
}
