//! Calculation result models.
//!
//! This module contains the [`SalaryBreakdown`] type and its associated
//! structures capturing every intermediate and final figure of a net-salary
//! calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;

/// The tax engine's view of one taxable income.
///
/// `net_tax` is never negative. When allowances exceed the tax left after
/// credits and the rules pay that excess out, the excess is reported in
/// `relief_payout` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAssessment {
    /// The income the assessment was computed on.
    pub taxable_income: Decimal,
    /// Progressive national income tax (IRPEF), before the minimum-income rule.
    pub national_tax: Decimal,
    /// Regional surtax (addizionale regionale).
    pub regional_surtax: Decimal,
    /// Municipal surtax (addizionale comunale).
    pub municipal_surtax: Decimal,
    /// National tax plus both surtaxes, or zero below the minimum taxable income.
    pub total_gross_tax: Decimal,
    /// Employment income tax credit (detrazioni), pro-rated by days worked.
    pub tax_credits: Decimal,
    /// Low-income allowance (agevolazioni).
    pub allowances: Decimal,
    /// Tax actually withheld.
    pub net_tax: Decimal,
    /// Allowance excess paid to the employee on top of net pay.
    pub relief_payout: Decimal,
    /// True when taxable income is under the minimum and gross tax was forced to zero.
    pub below_minimum: bool,
}

/// How the pension-fund contribution compares to the yearly deductible limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionDeductibility {
    /// Voluntary plus employer contribution.
    pub total_contribution: Decimal,
    /// Yearly deductible limit.
    pub deductible_limit: Decimal,
    /// Headroom still deductible this year (zero when over the limit).
    pub remaining: Decimal,
    /// Amount above the limit (zero when within it).
    pub excess: Decimal,
}

impl PensionDeductibility {
    /// Returns true when the whole contribution is deductible.
    pub fn within_limit(&self) -> bool {
        self.excess.is_zero()
    }
}

/// The complete result of a net-salary calculation.
///
/// Produced fresh by [`compute_breakdown`](crate::calculation::compute_breakdown)
/// for every input; it has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Contractual gross annual salary.
    pub gross_annual_salary: Decimal,
    /// Gross salary plus any ordinary-mode bonus.
    pub effective_gross: Decimal,
    /// Social-security rate applied (fraction, e.g. 0.0919).
    pub social_security_rate: Decimal,
    /// Employee social-security contribution (contributi INPS).
    pub social_security_contribution: Decimal,
    /// Severance accrual for the year (TFR).
    pub severance_accrual: Decimal,
    /// Contributory base for the pension fund (gross minus social security).
    pub pension_base: Decimal,
    /// Voluntary pension-fund contribution, deducted before tax.
    pub pension_voluntary_contribution: Decimal,
    /// Employer pension-fund contribution.
    pub pension_employer_contribution: Decimal,
    /// Voluntary plus employer contribution.
    pub pension_fund_total: Decimal,
    /// Deductibility of the pension contribution against the yearly limit.
    pub pension_deductibility: PensionDeductibility,
    /// Health insurance cost deducted before tax.
    pub health_insurance_deduction: Decimal,
    /// Net value of a flat-taxed bonus (zero in ordinary mode or without bonus).
    pub bonus_net: Decimal,
    /// Taxable income (imponibile fiscale), never negative.
    pub taxable_income: Decimal,
    /// Tax figures for `taxable_income`.
    pub tax: TaxAssessment,
    /// Annual net pay in the payslip.
    pub net_salary: Decimal,
    /// Annual meal-voucher value.
    pub meal_vouchers_annual: Decimal,
    /// Meal-voucher value per calendar month.
    pub meal_vouchers_monthly: Decimal,
    /// Tax-exempt welfare allowance.
    pub welfare_allowance: Decimal,
    /// Net pay plus meal vouchers and welfare.
    pub net_salary_with_benefits: Decimal,
    /// Net pay per installment.
    pub net_monthly: Decimal,
    /// Hours worked in a year after vacation.
    pub annual_worked_hours: Decimal,
    /// Net pay per worked hour.
    pub net_hourly: Decimal,
    /// Every step taken to reach these figures.
    pub audit_trace: Vec<AuditStep>,
}

impl SalaryBreakdown {
    /// The tax figure shown to users as "total taxes": gross tax before
    /// credits and allowances.
    pub fn total_taxes(&self) -> Decimal {
        self.tax.total_gross_tax
    }
}
