//! Request types for the salary engine API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! and `/sweep` endpoints and the query string for `/surtax`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    Bonus, ContractType, DEFAULT_PAY_PERIODS, DEFAULT_VACATION_DAYS, DEFAULT_WEEKLY_HOURS,
    SalaryInput, WealthWeights,
};

/// Salary input fields as accepted over the wire.
///
/// Only `gross_annual_salary` and `region` are required; everything else
/// falls back to the same defaults as [`SalaryInput::new`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryInputRequest {
    /// Gross annual salary.
    pub gross_annual_salary: Decimal,
    /// Region name, e.g. "Lombardia".
    pub region: String,
    /// Municipal surtax rate as a percentage.
    #[serde(default)]
    pub municipal_surcharge_rate: Decimal,
    /// Installments per year.
    #[serde(default = "default_pay_periods")]
    pub pay_periods_per_year: u32,
    /// Contract type.
    #[serde(default)]
    pub contract_type: ContractType,
    /// Face value of one meal voucher.
    #[serde(default)]
    pub meal_voucher_daily_amount: Decimal,
    /// Days with a meal voucher.
    #[serde(default)]
    pub meal_voucher_days: u32,
    /// Health insurance cost as a percentage of gross.
    #[serde(default)]
    pub health_insurance_rate: Decimal,
    /// Voluntary pension contribution as an amount.
    #[serde(default)]
    pub pension_fund_voluntary_amount: Option<Decimal>,
    /// Voluntary pension contribution as a percentage.
    #[serde(default)]
    pub pension_fund_voluntary_rate: Option<Decimal>,
    /// Employer pension contribution as a percentage.
    #[serde(default)]
    pub pension_fund_employer_rate: Decimal,
    /// Optional performance bonus.
    #[serde(default)]
    pub bonus: Option<Bonus>,
    /// Tax-exempt welfare allowance.
    #[serde(default)]
    pub welfare_allowance: Decimal,
    /// Days of employment in the year.
    #[serde(default)]
    pub days_worked: Option<u32>,
    /// Contractual weekly hours.
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: Decimal,
    /// Vacation days taken.
    #[serde(default = "default_vacation_days")]
    pub vacation_days_taken: u32,
}

fn default_pay_periods() -> u32 {
    DEFAULT_PAY_PERIODS
}

fn default_weekly_hours() -> Decimal {
    Decimal::from(DEFAULT_WEEKLY_HOURS)
}

fn default_vacation_days() -> u32 {
    DEFAULT_VACATION_DAYS
}

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The salary to calculate.
    #[serde(flatten)]
    pub input: SalaryInputRequest,
    /// When present, a generated-wealth estimate is included in the response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wealth_weights: Option<WealthWeights>,
}

/// Request body for the `/sweep` endpoint.
///
/// `input.gross_annual_salary` is replaced by each row's gross.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    /// Template for every row.
    pub input: SalaryInputRequest,
    /// Gross salary of the first row.
    pub start: Decimal,
    /// Gross increment between rows.
    pub step: Decimal,
    /// Number of rows requested.
    pub count: usize,
}

/// Query string for the `/surtax` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurtaxQuery {
    /// Region name.
    pub region: String,
    /// Taxable income.
    pub income: Decimal,
}

impl From<SalaryInputRequest> for SalaryInput {
    fn from(req: SalaryInputRequest) -> Self {
        SalaryInput {
            gross_annual_salary: req.gross_annual_salary,
            region: req.region,
            municipal_surcharge_rate: req.municipal_surcharge_rate,
            pay_periods_per_year: req.pay_periods_per_year,
            contract_type: req.contract_type,
            meal_voucher_daily_amount: req.meal_voucher_daily_amount,
            meal_voucher_days: req.meal_voucher_days,
            health_insurance_rate: req.health_insurance_rate,
            pension_fund_voluntary_amount: req.pension_fund_voluntary_amount,
            pension_fund_voluntary_rate: req.pension_fund_voluntary_rate,
            pension_fund_employer_rate: req.pension_fund_employer_rate,
            bonus: req.bonus,
            welfare_allowance: req.welfare_allowance,
            days_worked: req.days_worked,
            weekly_hours: req.weekly_hours,
            vacation_days_taken: req.vacation_days_taken,
        }
    }
}

impl From<SalaryInput> for SalaryInputRequest {
    fn from(input: SalaryInput) -> Self {
        SalaryInputRequest {
            gross_annual_salary: input.gross_annual_salary,
            region: input.region,
            municipal_surcharge_rate: input.municipal_surcharge_rate,
            pay_periods_per_year: input.pay_periods_per_year,
            contract_type: input.contract_type,
            meal_voucher_daily_amount: input.meal_voucher_daily_amount,
            meal_voucher_days: input.meal_voucher_days,
            health_insurance_rate: input.health_insurance_rate,
            pension_fund_voluntary_amount: input.pension_fund_voluntary_amount,
            pension_fund_voluntary_rate: input.pension_fund_voluntary_rate,
            pension_fund_employer_rate: input.pension_fund_employer_rate,
            bonus: input.bonus,
            welfare_allowance: input.welfare_allowance,
            days_worked: input.days_worked,
            weekly_hours: input.weekly_hours,
            vacation_days_taken: input.vacation_days_taken,
        }
    }
}
