//! Scenario sweep across a range of gross salaries.
//!
//! Rows are independent, so they are computed in parallel. Marginal
//! differences are taken afterwards, in gross order, over the rows that
//! survived.

use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryInput, SweepRow};

use super::compute_breakdown;

/// Computes breakdowns for `gross = start + i × step`, `i` in `0..count`.
///
/// Rows whose breakdown fails are skipped rather than aborting the
/// sweep. `marginal_net` is the net salary change since the previous
/// surviving row, and `None` on the first.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] if `step` is not positive, since
/// the rows would not be strictly increasing in gross.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::sweep;
/// use salary_engine::config::TaxRules;
/// use salary_engine::models::SalaryInput;
/// use rust_decimal_macros::dec;
///
/// let template = SalaryInput::new(dec!(1), "Veneto");
/// let rows = sweep(&template, dec!(20000), dec!(5000), 4, &TaxRules::year_2026()).unwrap();
///
/// assert_eq!(rows.len(), 4);
/// assert_eq!(rows[3].gross_annual_salary, dec!(35000));
/// assert!(rows[0].marginal_net.is_none());
/// assert!(rows[1].marginal_net.is_some());
/// ```
pub fn sweep(
    template: &SalaryInput,
    start: Decimal,
    step: Decimal,
    count: usize,
    rules: &TaxRules,
) -> EngineResult<Vec<SweepRow>> {
    if step <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "step",
            format!("must be positive, got {}", step),
        ));
    }

    let breakdowns: Vec<_> = (0..count)
        .into_par_iter()
        .filter_map(|i| {
            let Some(gross) = step
                .checked_mul(Decimal::from(i))
                .and_then(|offset| start.checked_add(offset))
            else {
                debug!(row = i, "Skipping sweep row, gross overflows");
                return None;
            };
            match compute_breakdown(&template.with_gross(gross), rules) {
                Ok(breakdown) => Some(breakdown),
                Err(error) => {
                    debug!(gross = %gross, error = %error, "Skipping sweep row");
                    None
                }
            }
        })
        .collect();

    let mut previous_net: Option<Decimal> = None;
    let rows = breakdowns
        .into_iter()
        .map(|breakdown| {
            let marginal_net = previous_net.map(|previous| breakdown.net_salary - previous);
            previous_net = Some(breakdown.net_salary);
            SweepRow {
                gross_annual_salary: breakdown.gross_annual_salary,
                net_per_period: breakdown.net_monthly,
                marginal_net,
                breakdown,
            }
        })
        .collect();

    Ok(rows)
}
