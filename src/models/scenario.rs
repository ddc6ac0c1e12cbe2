//! Scenario sweep and generated-wealth models.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::SalaryBreakdown;

/// One row of a gross-salary sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRow {
    /// Gross annual salary for this row.
    pub gross_annual_salary: Decimal,
    /// Net pay per installment.
    pub net_per_period: Decimal,
    /// Net salary change since the previous surviving row; `None` on the first row.
    pub marginal_net: Option<Decimal>,
    /// The full breakdown for this gross salary.
    pub breakdown: SalaryBreakdown,
}

/// How much one euro of each non-cash benefit is worth to the employee.
///
/// Each weight must lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WealthWeights {
    /// Value of one euro in meal vouchers.
    pub meal_vouchers: Decimal,
    /// Value of one euro of welfare allowance.
    pub welfare: Decimal,
    /// Value of one euro deferred into the pension fund or severance accrual.
    pub deferred: Decimal,
}

impl Default for WealthWeights {
    fn default() -> Self {
        Self {
            meal_vouchers: dec!(0.95),
            welfare: dec!(0.95),
            deferred: dec!(0.85),
        }
    }
}

impl WealthWeights {
    /// Rejects weights outside `[0, 1]`.
    pub fn validate(&self) -> EngineResult<()> {
        let weights = [
            ("wealth_weights.meal_vouchers", self.meal_vouchers),
            ("wealth_weights.welfare", self.welfare),
            ("wealth_weights.deferred", self.deferred),
        ];
        for (field, weight) in weights {
            if weight < Decimal::ZERO || weight > Decimal::ONE {
                return Err(EngineError::invalid_input(
                    field,
                    format!("must be between 0 and 1, got {}", weight),
                ));
            }
        }
        Ok(())
    }
}

/// What a job is worth once non-cash benefits are discounted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedWealth {
    /// Net pay counted at full value.
    pub net_salary: Decimal,
    /// Discounted meal vouchers.
    pub meal_vouchers: Decimal,
    /// Discounted welfare allowance.
    pub welfare: Decimal,
    /// Discounted pension fund plus severance accrual.
    pub deferred: Decimal,
    /// Sum of the four components.
    pub annual: Decimal,
    /// Annual figure over twelve calendar months.
    pub monthly: Decimal,
    /// Annual figure per worked hour.
    pub hourly: Decimal,
}
