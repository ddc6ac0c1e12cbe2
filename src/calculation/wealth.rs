//! Generated wealth: what a salary package is worth once non-cash
//! benefits are discounted.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{GeneratedWealth, SalaryBreakdown, WealthWeights};

const CALENDAR_MONTHS: u32 = 12;

/// Weighs each component of a breakdown into a single wealth figure.
///
/// Net salary counts in full; meal vouchers, welfare and deferred pay
/// (pension fund plus severance accrual) are discounted by `weights`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`](crate::error::EngineError::InvalidInput)
/// if any weight lies outside `[0, 1]`.
pub fn generated_wealth(
    breakdown: &SalaryBreakdown,
    weights: &WealthWeights,
) -> EngineResult<GeneratedWealth> {
    weights.validate()?;

    let meal_vouchers = breakdown.meal_vouchers_annual * weights.meal_vouchers;
    let welfare = breakdown.welfare_allowance * weights.welfare;
    let deferred =
        (breakdown.pension_fund_total + breakdown.severance_accrual) * weights.deferred;
    let annual = breakdown.net_salary + meal_vouchers + welfare + deferred;

    // compute_breakdown only succeeds with positive worked hours
    let hourly = if breakdown.annual_worked_hours > Decimal::ZERO {
        annual / breakdown.annual_worked_hours
    } else {
        Decimal::ZERO
    };

    Ok(GeneratedWealth {
        net_salary: breakdown.net_salary,
        meal_vouchers,
        welfare,
        deferred,
        annual,
        monthly: annual / Decimal::from(CALENDAR_MONTHS),
        hourly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::compute_breakdown;
    use crate::config::TaxRules;
    use crate::error::EngineError;
    use crate::models::SalaryInput;
    use rust_decimal_macros::dec;

    fn breakdown() -> SalaryBreakdown {
        let mut input = SalaryInput::new(dec!(30000), "Lombardia");
        input.meal_voucher_daily_amount = dec!(8);
        input.meal_voucher_days = 220;
        input.welfare_allowance = dec!(1000);
        input.pension_fund_employer_rate = dec!(1);
        compute_breakdown(&input, &TaxRules::year_2026()).unwrap()
    }

    #[test]
    fn test_default_weights() {
        let breakdown = breakdown();
        let wealth = generated_wealth(&breakdown, &WealthWeights::default()).unwrap();

        assert_eq!(wealth.meal_vouchers, dec!(1672));
        assert_eq!(wealth.welfare, dec!(950));
        assert_eq!(
            wealth.deferred,
            (breakdown.pension_fund_total + breakdown.severance_accrual) * dec!(0.85)
        );
        assert_eq!(
            wealth.annual,
            breakdown.net_salary + dec!(1672) + dec!(950) + wealth.deferred
        );
        assert_eq!(wealth.monthly, wealth.annual / dec!(12));
        assert_eq!(wealth.hourly, wealth.annual / breakdown.annual_worked_hours);
    }

    #[test]
    fn test_zero_weights_leave_net_salary() {
        let breakdown = breakdown();
        let weights = WealthWeights {
            meal_vouchers: Decimal::ZERO,
            welfare: Decimal::ZERO,
            deferred: Decimal::ZERO,
        };
        let wealth = generated_wealth(&breakdown, &weights).unwrap();
        assert_eq!(wealth.annual, breakdown.net_salary);
    }

    #[test]
    fn test_out_of_range_weight_is_rejected() {
        let weights = WealthWeights {
            deferred: dec!(1.5),
            ..WealthWeights::default()
        };
        assert!(matches!(
            generated_wealth(&breakdown(), &weights),
            Err(EngineError::InvalidInput { .. })
        ));
    }
}
