//! The tax engine: from one taxable income to the tax actually withheld.
//!
//! Gross tax is the national tax plus the regional and municipal surtaxes,
//! forced to zero under the minimum taxable income. Employment credits and
//! low-income allowances are then subtracted, and the result is floored at
//! zero where the rule set's [`NetTaxFloor`] says so.

use rust_decimal::Decimal;

use crate::config::{NetTaxFloor, TaxRules};
use crate::models::TaxAssessment;

use super::national_tax::{is_below_minimum, national_tax};
use super::tax_credits::employment_credit;
use super::{low_income_allowance, percent_of};

/// Assesses tax on a full year's taxable income.
///
/// `municipal_rate` is a percentage (`0.8` means 0.8%).
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_tax;
/// use salary_engine::config::TaxRules;
/// use rust_decimal_macros::dec;
///
/// let rules = TaxRules::year_2026();
/// let tax = compute_tax(dec!(27243), "Lombardia", dec!(0.8), &rules);
///
/// assert_eq!(tax.national_tax, dec!(6265.89));
/// assert!(tax.net_tax > dec!(0));
/// assert!(tax.net_tax < tax.total_gross_tax);
/// ```
pub fn compute_tax(
    taxable_income: Decimal,
    region: &str,
    municipal_rate: Decimal,
    rules: &TaxRules,
) -> TaxAssessment {
    compute_tax_for_days(taxable_income, region, municipal_rate, None, rules)
}

/// Assesses tax with the employment credit pro-rated by `days_worked`.
///
/// `days_worked = None` means the whole year.
pub fn compute_tax_for_days(
    taxable_income: Decimal,
    region: &str,
    municipal_rate: Decimal,
    days_worked: Option<u32>,
    rules: &TaxRules,
) -> TaxAssessment {
    let income = taxable_income.max(Decimal::ZERO);
    let policy = rules.policy();

    let national = national_tax(income, rules.national_tax());
    let regional = rules.regions().surtax(region, income, policy.surtax);
    let municipal = percent_of(income, municipal_rate);

    let below_minimum = is_below_minimum(income, rules.national_tax());
    let total_gross_tax = if below_minimum {
        Decimal::ZERO
    } else {
        national + regional + municipal
    };

    let tax_credits = employment_credit(
        income,
        days_worked,
        rules.working_time().days_in_year,
        rules.employment_credits(),
    );
    let allowances = low_income_allowance(
        income,
        policy.low_income_relief,
        rules.low_income_allowances(),
        rules.national_tax().minimum_taxable_income,
    );

    let after_credits = (total_gross_tax - tax_credits).max(Decimal::ZERO);
    let after_allowances = after_credits - allowances;
    let net_tax = after_allowances.max(Decimal::ZERO);
    let relief_payout = match policy.net_tax_floor {
        NetTaxFloor::AfterCredits => (-after_allowances).max(Decimal::ZERO),
        NetTaxFloor::AfterAllowances => Decimal::ZERO,
    };

    TaxAssessment {
        taxable_income: income,
        national_tax: national,
        regional_surtax: regional,
        municipal_surtax: municipal,
        total_gross_tax,
        tax_credits,
        allowances,
        net_tax,
        relief_payout,
        below_minimum,
    }
}
