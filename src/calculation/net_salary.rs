//! Net salary calculation.
//!
//! [`compute_breakdown`] runs every step from contractual gross to net
//! hourly pay in a fixed order, each step feeding the next, and records an
//! audit step for each.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::debug;

use crate::config::TaxRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditLog, BonusTaxation, ContractType, PensionDeductibility, Region, SalaryBreakdown,
    SalaryInput,
};

use super::percent_of;
use super::tax_engine::compute_tax_for_days;

const CALENDAR_MONTHS: u32 = 12;

/// Computes the full salary breakdown for one input.
///
/// The calculation is all-or-nothing: either every figure is produced or
/// an error is returned.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if the input fails
///   [`SalaryInput::validate`], or `days_worked` exceeds the rule set's
///   days in a year.
/// - [`EngineError::DegenerateDivision`] if vacation leaves no working days
///   or weekly hours are zero, so no hourly figure can be produced.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_breakdown;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::SalaryInput;
/// use rust_decimal_macros::dec;
///
/// let mut input = SalaryInput::new(dec!(30000), "Lombardia");
/// input.municipal_surcharge_rate = dec!(0.8);
///
/// let breakdown = compute_breakdown(&input, &TaxRules::year_2026()).unwrap();
/// assert_eq!(breakdown.taxable_income, dec!(27243));
/// assert!(breakdown.net_salary > dec!(0));
/// assert!(breakdown.net_salary < breakdown.taxable_income);
/// ```
pub fn compute_breakdown(input: &SalaryInput, rules: &TaxRules) -> EngineResult<SalaryBreakdown> {
    input.validate()?;

    let days_in_year = rules.working_time().days_in_year;
    if let Some(days) = input.days_worked {
        if days > days_in_year {
            return Err(EngineError::invalid_input(
                "days_worked",
                format!("must not exceed {}, got {}", days_in_year, days),
            ));
        }
    }

    let mut audit = AuditLog::default();
    let gross = input.gross_annual_salary;

    // Social security
    let social_security_rate = match input.contract_type {
        ContractType::Apprenticeship => rules.social_security().apprenticeship_rate,
        ContractType::Permanent | ContractType::FixedTerm => rules.social_security().standard_rate,
    };
    let social_security_contribution = gross * social_security_rate;
    audit.record(
        "social_security",
        "Social Security Contribution",
        "L. 335/1995",
        json!({
            "gross_annual_salary": gross.to_string(),
            "contract_type": input.contract_type,
        }),
        json!({
            "rate": social_security_rate.to_string(),
            "contribution": social_security_contribution.to_string(),
        }),
        format!(
            "{} x {} = {}",
            gross, social_security_rate, social_security_contribution
        ),
    );

    // Severance accrual
    let severance = rules.severance();
    let severance_accrual = gross / severance.divisor - gross * severance.contribution_rate;
    audit.record(
        "severance_accrual",
        "Severance Accrual (TFR)",
        "art. 2120 c.c.",
        json!({
            "gross_annual_salary": gross.to_string(),
            "divisor": severance.divisor.to_string(),
            "contribution_rate": severance.contribution_rate.to_string(),
        }),
        json!({ "severance_accrual": severance_accrual.to_string() }),
        format!(
            "{} / {} - {} x {} = {}",
            gross, severance.divisor, gross, severance.contribution_rate, severance_accrual
        ),
    );

    // Pension fund
    let pension_base = gross - social_security_contribution;
    let pension_voluntary_contribution = match (
        input.pension_fund_voluntary_amount,
        input.pension_fund_voluntary_rate,
    ) {
        (Some(amount), _) => amount,
        (None, Some(rate)) => percent_of(pension_base, rate),
        (None, None) => Decimal::ZERO,
    };
    let pension_employer_contribution =
        percent_of(pension_base, input.pension_fund_employer_rate);
    let pension_fund_total = pension_voluntary_contribution + pension_employer_contribution;
    let deductible_limit = rules.pension_fund().deductible_limit;
    let pension_deductibility = PensionDeductibility {
        total_contribution: pension_fund_total,
        deductible_limit,
        remaining: (deductible_limit - pension_fund_total).max(Decimal::ZERO),
        excess: (pension_fund_total - deductible_limit).max(Decimal::ZERO),
    };
    audit.record(
        "pension_fund",
        "Supplementary Pension Fund",
        "D.Lgs. 252/2005",
        json!({
            "pension_base": pension_base.to_string(),
            "voluntary_amount": input.pension_fund_voluntary_amount.map(|a| a.to_string()),
            "voluntary_rate": input.pension_fund_voluntary_rate.map(|r| r.to_string()),
            "employer_rate": input.pension_fund_employer_rate.to_string(),
        }),
        json!({
            "voluntary_contribution": pension_voluntary_contribution.to_string(),
            "employer_contribution": pension_employer_contribution.to_string(),
            "total": pension_fund_total.to_string(),
            "deductible_limit": deductible_limit.to_string(),
            "within_limit": pension_deductibility.within_limit(),
        }),
        if pension_deductibility.within_limit() {
            format!(
                "Total contribution {} is within the {} deductible limit ({} remaining)",
                pension_fund_total, deductible_limit, pension_deductibility.remaining
            )
        } else {
            format!(
                "Total contribution {} exceeds the {} deductible limit by {}",
                pension_fund_total, deductible_limit, pension_deductibility.excess
            )
        },
    );

    // Health insurance
    let health_insurance_deduction = percent_of(gross, input.health_insurance_rate);
    audit.record(
        "health_insurance",
        "Health Insurance Deduction",
        "art. 51 c. 2 TUIR",
        json!({
            "gross_annual_salary": gross.to_string(),
            "rate_percent": input.health_insurance_rate.to_string(),
        }),
        json!({ "deduction": health_insurance_deduction.to_string() }),
        format!(
            "{}% of {} = {}",
            input.health_insurance_rate, gross, health_insurance_deduction
        ),
    );

    // Bonus
    let (effective_gross, bonus_net) = match &input.bonus {
        Some(bonus) => match bonus.taxation {
            BonusTaxation::Ordinary => (gross + bonus.amount, Decimal::ZERO),
            BonusTaxation::Flat => (
                gross,
                bonus.amount - percent_of(bonus.amount, bonus.flat_rate),
            ),
        },
        None => (gross, Decimal::ZERO),
    };
    if let Some(bonus) = &input.bonus {
        audit.record(
            "bonus",
            "Performance Bonus",
            "L. 208/2015 c. 182",
            json!({
                "amount": bonus.amount.to_string(),
                "taxation": bonus.taxation,
                "flat_rate_percent": bonus.flat_rate.to_string(),
            }),
            json!({
                "effective_gross": effective_gross.to_string(),
                "bonus_net": bonus_net.to_string(),
            }),
            match bonus.taxation {
                BonusTaxation::Ordinary => format!(
                    "Bonus {} added to gross and taxed at ordinary rates",
                    bonus.amount
                ),
                BonusTaxation::Flat => format!(
                    "Bonus {} taxed separately at {}%, {} added to net pay",
                    bonus.amount, bonus.flat_rate, bonus_net
                ),
            },
        );
    }

    // Taxable income
    let taxable_income = (effective_gross
        - social_security_contribution
        - pension_voluntary_contribution
        - health_insurance_deduction)
        .max(Decimal::ZERO);
    audit.record(
        "taxable_income",
        "Taxable Income",
        "art. 51 TUIR",
        json!({
            "effective_gross": effective_gross.to_string(),
            "social_security": social_security_contribution.to_string(),
            "pension_voluntary": pension_voluntary_contribution.to_string(),
            "health_insurance": health_insurance_deduction.to_string(),
        }),
        json!({ "taxable_income": taxable_income.to_string() }),
        format!(
            "max(0, {} - {} - {} - {}) = {}",
            effective_gross,
            social_security_contribution,
            pension_voluntary_contribution,
            health_insurance_deduction,
            taxable_income
        ),
    );
    debug!(
        gross = %gross,
        taxable_income = %taxable_income,
        "Computed taxable income"
    );

    // Tax
    let tax = compute_tax_for_days(
        taxable_income,
        &input.region,
        input.municipal_surcharge_rate,
        input.days_worked,
        rules,
    );
    let policy = rules.policy();
    audit.record(
        "gross_tax",
        "National and Local Income Tax",
        "art. 11 TUIR; D.Lgs. 446/1997 art. 50; D.Lgs. 360/1998",
        json!({
            "taxable_income": taxable_income.to_string(),
            "region": input.region,
            "region_recognized": Region::from_name(&input.region).is_some(),
            "surtax_policy": policy.surtax,
            "municipal_rate_percent": input.municipal_surcharge_rate.to_string(),
        }),
        json!({
            "national_tax": tax.national_tax.to_string(),
            "regional_surtax": tax.regional_surtax.to_string(),
            "municipal_surtax": tax.municipal_surtax.to_string(),
            "total_gross_tax": tax.total_gross_tax.to_string(),
            "below_minimum": tax.below_minimum,
        }),
        if tax.below_minimum {
            format!(
                "Taxable income {} is below the {} minimum, gross tax forced to 0",
                taxable_income,
                rules.national_tax().minimum_taxable_income
            )
        } else {
            format!(
                "{} + {} + {} = {}",
                tax.national_tax, tax.regional_surtax, tax.municipal_surtax, tax.total_gross_tax
            )
        },
    );
    audit.record(
        "net_tax",
        "Tax Credits and Allowances",
        "art. 13 TUIR",
        json!({
            "total_gross_tax": tax.total_gross_tax.to_string(),
            "days_worked": input.days_worked,
            "low_income_relief": policy.low_income_relief,
            "net_tax_floor": policy.net_tax_floor,
        }),
        json!({
            "tax_credits": tax.tax_credits.to_string(),
            "allowances": tax.allowances.to_string(),
            "net_tax": tax.net_tax.to_string(),
            "relief_payout": tax.relief_payout.to_string(),
        }),
        format!(
            "max(0, {} - {}) - {} gives net tax {} and payout {}",
            tax.total_gross_tax, tax.tax_credits, tax.allowances, tax.net_tax, tax.relief_payout
        ),
    );

    // Net pay
    let net_salary = taxable_income - tax.net_tax + tax.relief_payout + bonus_net;
    let meal_vouchers_annual =
        input.meal_voucher_daily_amount * Decimal::from(input.meal_voucher_days);
    let meal_vouchers_monthly = meal_vouchers_annual / Decimal::from(CALENDAR_MONTHS);
    let net_salary_with_benefits = net_salary + meal_vouchers_annual + input.welfare_allowance;
    let net_monthly = net_salary / Decimal::from(input.pay_periods_per_year);
    audit.record(
        "net_salary",
        "Net Salary",
        "art. 51 c. 2 lett. c TUIR",
        json!({
            "taxable_income": taxable_income.to_string(),
            "net_tax": tax.net_tax.to_string(),
            "relief_payout": tax.relief_payout.to_string(),
            "bonus_net": bonus_net.to_string(),
            "meal_vouchers_annual": meal_vouchers_annual.to_string(),
            "welfare_allowance": input.welfare_allowance.to_string(),
            "pay_periods_per_year": input.pay_periods_per_year,
        }),
        json!({
            "net_salary": net_salary.to_string(),
            "net_salary_with_benefits": net_salary_with_benefits.to_string(),
            "net_monthly": net_monthly.to_string(),
        }),
        format!(
            "{} - {} + {} + {} = {} over {} installments",
            taxable_income,
            tax.net_tax,
            tax.relief_payout,
            bonus_net,
            net_salary,
            input.pay_periods_per_year
        ),
    );

    // Hourly normalisation
    let working_time = rules.working_time();
    let effective_working_days =
        i64::from(working_time.standard_working_days) - i64::from(input.vacation_days_taken);
    if effective_working_days <= 0 {
        return Err(EngineError::DegenerateDivision {
            quantity: "effective_working_days".to_string(),
            message: format!(
                "{} standard days minus {} vacation days leaves {}",
                working_time.standard_working_days,
                input.vacation_days_taken,
                effective_working_days
            ),
        });
    }
    if input.weekly_hours <= Decimal::ZERO {
        return Err(EngineError::DegenerateDivision {
            quantity: "weekly_hours".to_string(),
            message: format!("weekly hours must be positive, got {}", input.weekly_hours),
        });
    }
    let daily_hours = input.weekly_hours / Decimal::from(working_time.working_days_per_week);
    let annual_worked_hours = Decimal::from(effective_working_days) * daily_hours;
    let net_hourly = net_salary / annual_worked_hours;
    audit.record(
        "hourly_rate",
        "Net Hourly Rate",
        "D.Lgs. 66/2003",
        json!({
            "standard_working_days": working_time.standard_working_days,
            "vacation_days_taken": input.vacation_days_taken,
            "weekly_hours": input.weekly_hours.to_string(),
            "working_days_per_week": working_time.working_days_per_week,
        }),
        json!({
            "annual_worked_hours": annual_worked_hours.to_string(),
            "net_hourly": net_hourly.to_string(),
        }),
        format!(
            "{} days x {} hours = {} hours, {} / {} = {}",
            effective_working_days,
            daily_hours,
            annual_worked_hours,
            net_salary,
            annual_worked_hours,
            net_hourly
        ),
    );

    debug!(
        gross = %gross,
        net_salary = %net_salary,
        net_tax = %tax.net_tax,
        "Computed salary breakdown"
    );

    Ok(SalaryBreakdown {
        gross_annual_salary: gross,
        effective_gross,
        social_security_rate,
        social_security_contribution,
        severance_accrual,
        pension_base,
        pension_voluntary_contribution,
        pension_employer_contribution,
        pension_fund_total,
        pension_deductibility,
        health_insurance_deduction,
        bonus_net,
        taxable_income,
        tax,
        net_salary,
        meal_vouchers_annual,
        meal_vouchers_monthly,
        welfare_allowance: input.welfare_allowance,
        net_salary_with_benefits,
        net_monthly,
        annual_worked_hours,
        net_hourly,
        audit_trace: audit.into_steps(),
    })
}
