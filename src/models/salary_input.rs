//! Salary input model and related types.
//!
//! A [`SalaryInput`] is everything the calculator needs to turn a gross
//! annual salary into a net figure. It is built fresh for every
//! calculation and never mutated by the engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Installments per year when none are given (twelve months plus tredicesima).
pub const DEFAULT_PAY_PERIODS: u32 = 13;

/// Contractual weekly hours for a full-time employee.
pub const DEFAULT_WEEKLY_HOURS: u32 = 40;

/// Vacation and leave days taken per year when none are given.
pub const DEFAULT_VACATION_DAYS: u32 = 26;

/// Accepted installments per year: twelve months plus up to three extra salaries.
pub const PAY_PERIODS_RANGE: std::ops::RangeInclusive<u32> = 12..=15;

/// Largest accepted monetary amount. Keeps every intermediate figure well
/// inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// Hours in a week, the ceiling for contractual weekly hours.
pub const MAX_WEEKLY_HOURS: Decimal = dec!(168);

/// The kind of employment contract.
///
/// Only apprenticeships change the social-security rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Open-ended employment (contratto a tempo indeterminato).
    #[default]
    Permanent,
    /// Apprenticeship (apprendistato), reduced social-security rate.
    Apprenticeship,
    /// Fixed-term employment (contratto a tempo determinato).
    FixedTerm,
}

/// How a performance bonus is taxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusTaxation {
    /// Taxed separately at its own flat rate and added to net pay.
    Flat,
    /// Added to gross salary and taxed at ordinary income-tax rates.
    Ordinary,
}

/// A performance bonus (premio di risultato).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// Annual bonus amount.
    pub amount: Decimal,
    /// The taxation regime applied to the bonus.
    pub taxation: BonusTaxation,
    /// Flat tax rate as a percentage (e.g. `5` for 5%). Ignored in ordinary mode.
    #[serde(default)]
    pub flat_rate: Decimal,
}

/// All inputs for a single net-salary calculation.
///
/// Rates are expressed as percentages: `municipal_surcharge_rate = 0.8`
/// means 0.8%.
///
/// # Example
///
/// ```
/// use salary_engine::models::{ContractType, SalaryInput};
/// use rust_decimal_macros::dec;
///
/// let input = SalaryInput::new(dec!(30000), "Lombardia");
/// assert_eq!(input.pay_periods_per_year, 13);
/// assert_eq!(input.contract_type, ContractType::Permanent);
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Contractual gross annual salary (RAL).
    pub gross_annual_salary: Decimal,
    /// Region of residence. Unrecognised names carry no regional surtax.
    pub region: String,
    /// Municipal surtax rate as a percentage.
    pub municipal_surcharge_rate: Decimal,
    /// Number of installments the net annual salary is paid in, 12 to 15.
    pub pay_periods_per_year: u32,
    /// Contract type.
    pub contract_type: ContractType,
    /// Face value of one meal voucher.
    pub meal_voucher_daily_amount: Decimal,
    /// Days per year on which a meal voucher is granted.
    pub meal_voucher_days: u32,
    /// Health insurance cost as a percentage of gross, deducted pre-tax.
    pub health_insurance_rate: Decimal,
    /// Voluntary pension-fund contribution as an absolute annual amount.
    pub pension_fund_voluntary_amount: Option<Decimal>,
    /// Voluntary pension-fund contribution as a percentage of the pension base.
    pub pension_fund_voluntary_rate: Option<Decimal>,
    /// Employer pension-fund contribution as a percentage of the pension base.
    pub pension_fund_employer_rate: Decimal,
    /// Optional performance bonus.
    pub bonus: Option<Bonus>,
    /// Tax-exempt welfare allowance added on top of net pay.
    pub welfare_allowance: Decimal,
    /// Days of employment in the year, used to pro-rate tax credits.
    pub days_worked: Option<u32>,
    /// Contractual weekly hours.
    pub weekly_hours: Decimal,
    /// Vacation and leave days taken per year.
    pub vacation_days_taken: u32,
}

impl SalaryInput {
    /// Creates an input for a full-time permanent employee with no benefits.
    ///
    /// Defaults: 13 pay periods, 40 weekly hours, 26 vacation days, no
    /// municipal surtax, no vouchers, no pension fund, no bonus.
    pub fn new(gross_annual_salary: Decimal, region: impl Into<String>) -> Self {
        Self {
            gross_annual_salary,
            region: region.into(),
            municipal_surcharge_rate: Decimal::ZERO,
            pay_periods_per_year: DEFAULT_PAY_PERIODS,
            contract_type: ContractType::Permanent,
            meal_voucher_daily_amount: Decimal::ZERO,
            meal_voucher_days: 0,
            health_insurance_rate: Decimal::ZERO,
            pension_fund_voluntary_amount: None,
            pension_fund_voluntary_rate: None,
            pension_fund_employer_rate: Decimal::ZERO,
            bonus: None,
            welfare_allowance: Decimal::ZERO,
            days_worked: None,
            weekly_hours: Decimal::from(DEFAULT_WEEKLY_HOURS),
            vacation_days_taken: DEFAULT_VACATION_DAYS,
        }
    }

    /// Returns a copy of this input with a different gross salary.
    pub fn with_gross(&self, gross_annual_salary: Decimal) -> Self {
        Self {
            gross_annual_salary,
            ..self.clone()
        }
    }

    /// Checks the input for values the calculator refuses to coerce.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] when:
    /// - the gross salary is not positive
    /// - any amount or rate is negative
    /// - an amount exceeds [`MAX_AMOUNT`], a rate exceeds 100% or weekly
    ///   hours exceed [`MAX_WEEKLY_HOURS`]
    /// - the pay-period count is outside [`PAY_PERIODS_RANGE`]
    /// - both a fixed and a percentage voluntary pension contribution are given
    pub fn validate(&self) -> EngineResult<()> {
        if self.gross_annual_salary <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "gross_annual_salary",
                format!("must be positive, got {}", self.gross_annual_salary),
            ));
        }

        if !PAY_PERIODS_RANGE.contains(&self.pay_periods_per_year) {
            return Err(EngineError::invalid_input(
                "pay_periods_per_year",
                format!(
                    "must be between {} and {}, got {}",
                    PAY_PERIODS_RANGE.start(),
                    PAY_PERIODS_RANGE.end(),
                    self.pay_periods_per_year
                ),
            ));
        }

        if self.pension_fund_voluntary_amount.is_some()
            && self.pension_fund_voluntary_rate.is_some()
        {
            return Err(EngineError::invalid_input(
                "pension_fund_voluntary",
                "supply either a fixed amount or a percentage, not both",
            ));
        }

        let amounts = [
            ("gross_annual_salary", Some(self.gross_annual_salary)),
            ("meal_voucher_daily_amount", Some(self.meal_voucher_daily_amount)),
            ("pension_fund_voluntary_amount", self.pension_fund_voluntary_amount),
            ("welfare_allowance", Some(self.welfare_allowance)),
            ("bonus.amount", self.bonus.as_ref().map(|b| b.amount)),
        ];
        let rates = [
            ("municipal_surcharge_rate", Some(self.municipal_surcharge_rate)),
            ("health_insurance_rate", Some(self.health_insurance_rate)),
            ("pension_fund_voluntary_rate", self.pension_fund_voluntary_rate),
            ("pension_fund_employer_rate", Some(self.pension_fund_employer_rate)),
            ("bonus.flat_rate", self.bonus.as_ref().map(|b| b.flat_rate)),
        ];
        let hours = [("weekly_hours", Some(self.weekly_hours))];

        let bounded = amounts
            .into_iter()
            .map(|(field, value)| (field, value, MAX_AMOUNT, ""))
            .chain(
                rates
                    .into_iter()
                    .map(|(field, value)| (field, value, Decimal::ONE_HUNDRED, "%")),
            )
            .chain(
                hours
                    .into_iter()
                    .map(|(field, value)| (field, value, MAX_WEEKLY_HOURS, "")),
            );
        for (field, value, max, unit) in bounded {
            let Some(value) = value else { continue };
            if value < Decimal::ZERO {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not be negative, got {}", value),
                ));
            }
            if value > max {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must not exceed {}{}, got {}", max, unit, value),
                ));
            }
        }

        Ok(())
    }
}
