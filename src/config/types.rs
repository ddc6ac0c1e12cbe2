//! Configuration types for net-salary calculation.
//!
//! This module contains the strongly-typed rule structures that are
//! deserialized from YAML files or built from the presets in
//! [`presets`](super::presets).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::RegionalSurtaxTable;
use crate::error::{EngineError, EngineResult};

/// How a regional surtax schedule is applied to an income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurtaxPolicy {
    /// The whole income is taxed at the rate of the bracket it falls in.
    SingleRate,
    /// Each slice of income is taxed at its own bracket's rate.
    Progressive,
}

/// Which low-income relief applies on top of the employment tax credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowIncomeRelief {
    /// The full allowance tier table applies at every income.
    Tiered,
    /// Only a flat percentage of income, and only under the minimum taxable income.
    FlatBelowMinimum,
}

/// Where net tax is floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetTaxFloor {
    /// Gross tax minus credits is floored; allowances beyond that are paid out.
    AfterCredits,
    /// The final figure is floored; allowances beyond the tax due are lost.
    AfterAllowances,
}

/// The named switches that distinguish one rule revision from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    /// Regional surtax policy.
    pub surtax: SurtaxPolicy,
    /// Low-income relief policy.
    pub low_income_relief: LowIncomeRelief,
    /// Net tax floor policy.
    pub net_tax_floor: NetTaxFloor,
}

/// Identifying information about a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesMetadata {
    /// The tax year the rules describe.
    pub tax_year: i32,
    /// Human-readable name.
    pub name: String,
    /// Where the figures come from.
    pub source: String,
}

/// A tax bracket. `upper_bound` is inclusive; `None` means open ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Inclusive upper bound of the bracket.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Rate as a fraction (e.g. `0.23`).
    pub rate: Decimal,
}

impl Bracket {
    /// Returns true if `income` falls at or below this bracket's upper bound.
    pub fn covers(&self, income: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| income <= bound)
    }
}

/// National income tax rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalTaxConfig {
    /// Progressive brackets in ascending order.
    pub brackets: Vec<Bracket>,
    /// Below this taxable income the total gross tax is forced to zero.
    pub minimum_taxable_income: Decimal,
}

/// Social-security withholding rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityConfig {
    /// Rate for permanent and fixed-term contracts.
    pub standard_rate: Decimal,
    /// Rate for apprenticeships.
    pub apprenticeship_rate: Decimal,
}

/// Severance accrual (TFR) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceConfig {
    /// Gross salary is divided by this to get the yearly accrual.
    pub divisor: Decimal,
    /// Share of gross withheld for the guarantee fund.
    pub contribution_rate: Decimal,
}

/// A linearly tapering component: `amount × (ceiling − income) / span`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taper {
    /// Value at `ceiling − span`.
    pub amount: Decimal,
    /// Income at which the component reaches zero.
    pub ceiling: Decimal,
    /// Width of the taper.
    pub span: Decimal,
}

/// One tier of a credit or allowance formula.
///
/// Evaluates to `income × rate + fixed + taper` for incomes up to and
/// including `upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaTier {
    /// Inclusive upper bound; `None` means open ended.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Proportional component as a fraction of income.
    #[serde(default)]
    pub rate: Decimal,
    /// Fixed component.
    #[serde(default)]
    pub fixed: Decimal,
    /// Optional tapering component.
    #[serde(default)]
    pub taper: Option<Taper>,
}

impl FormulaTier {
    /// Returns true if `income` falls at or below this tier's upper bound.
    pub fn covers(&self, income: Decimal) -> bool {
        self.upper_bound.is_none_or(|bound| income <= bound)
    }

    /// Evaluates the tier formula at `income`.
    pub fn evaluate(&self, income: Decimal) -> Decimal {
        let tapered = self
            .taper
            .map(|t| t.amount * (t.ceiling - income) / t.span)
            .unwrap_or(Decimal::ZERO);
        income * self.rate + self.fixed + tapered
    }
}

/// Finds the tier covering `income` and evaluates it.
pub(crate) fn evaluate_tiers(tiers: &[FormulaTier], income: Decimal) -> Decimal {
    tiers
        .iter()
        .find(|tier| tier.covers(income))
        .map(|tier| tier.evaluate(income))
        .unwrap_or(Decimal::ZERO)
}

/// Employment income tax credit rules (detrazioni per lavoro dipendente).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentCreditConfig {
    /// Below this income no credit is granted.
    pub minimum_income: Decimal,
    /// Formula tiers in ascending order.
    pub tiers: Vec<FormulaTier>,
}

/// Low-income allowance rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowIncomeAllowanceConfig {
    /// Formula tiers used by [`LowIncomeRelief::Tiered`].
    pub tiers: Vec<FormulaTier>,
    /// Rate used by [`LowIncomeRelief::FlatBelowMinimum`].
    pub flat_rate: Decimal,
}

/// Supplementary pension fund rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionFundConfig {
    /// Yearly amount deductible from taxable income.
    pub deductible_limit: Decimal,
}

/// Calendar constants for per-day and per-hour figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingTimeConfig {
    /// Working days in a standard year before vacation.
    pub standard_working_days: u32,
    /// Working days in a week.
    pub working_days_per_week: u32,
    /// Calendar days used to pro-rate tax credits.
    pub days_in_year: u32,
}

/// The `rules.yaml` file: everything except the regional schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesFile {
    /// Rule set metadata.
    pub metadata: RulesMetadata,
    /// Policy switches.
    pub policy: TaxPolicy,
    /// National income tax.
    pub national_tax: NationalTaxConfig,
    /// Social security.
    pub social_security: SocialSecurityConfig,
    /// Severance accrual.
    pub severance: SeveranceConfig,
    /// Employment tax credit.
    pub employment_credits: EmploymentCreditConfig,
    /// Low-income allowance.
    pub low_income_allowances: LowIncomeAllowanceConfig,
    /// Pension fund.
    pub pension_fund: PensionFundConfig,
    /// Working time.
    pub working_time: WorkingTimeConfig,
}

/// A complete, validated rule set for one tax year.
///
/// Built from a [`RulesFile`] plus a [`RegionalSurtaxTable`], or taken from
/// a preset such as [`TaxRules::year_2026`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxRules {
    pub(super) rules: RulesFile,
    pub(super) regions: RegionalSurtaxTable,
}

impl TaxRules {
    /// Combines a rules file and a regional table, validating both.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if any bracket or tier list is
    /// empty, out of order, or lacks an open-ended last entry.
    pub fn new(rules: RulesFile, regions: RegionalSurtaxTable) -> EngineResult<Self> {
        validate_brackets("national_tax.brackets", &rules.national_tax.brackets)?;
        validate_tiers(
            "employment_credits.tiers",
            &rules.employment_credits.tiers,
        )?;
        validate_tiers(
            "low_income_allowances.tiers",
            &rules.low_income_allowances.tiers,
        )?;
        for (region, schedule) in regions.schedules() {
            validate_brackets(&format!("regions.{}", region.name()), schedule)?;
        }
        if rules.working_time.working_days_per_week == 0 {
            return Err(EngineError::InvalidConfig {
                message: "working_time.working_days_per_week must be positive".to_string(),
            });
        }
        if rules.working_time.days_in_year == 0 {
            return Err(EngineError::InvalidConfig {
                message: "working_time.days_in_year must be positive".to_string(),
            });
        }
        if rules.severance.divisor <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                message: "severance.divisor must be positive".to_string(),
            });
        }

        Ok(Self { rules, regions })
    }

    /// Returns the same rules with different policy switches.
    pub fn with_policy(mut self, policy: TaxPolicy) -> Self {
        self.rules.policy = policy;
        self
    }

    /// Returns the rule set metadata.
    pub fn metadata(&self) -> &RulesMetadata {
        &self.rules.metadata
    }

    /// Returns the policy switches.
    pub fn policy(&self) -> TaxPolicy {
        self.rules.policy
    }

    /// Returns the national tax rules.
    pub fn national_tax(&self) -> &NationalTaxConfig {
        &self.rules.national_tax
    }

    /// Returns the social-security rates.
    pub fn social_security(&self) -> &SocialSecurityConfig {
        &self.rules.social_security
    }

    /// Returns the severance accrual parameters.
    pub fn severance(&self) -> &SeveranceConfig {
        &self.rules.severance
    }

    /// Returns the employment tax credit rules.
    pub fn employment_credits(&self) -> &EmploymentCreditConfig {
        &self.rules.employment_credits
    }

    /// Returns the low-income allowance rules.
    pub fn low_income_allowances(&self) -> &LowIncomeAllowanceConfig {
        &self.rules.low_income_allowances
    }

    /// Returns the pension fund rules.
    pub fn pension_fund(&self) -> &PensionFundConfig {
        &self.rules.pension_fund
    }

    /// Returns the working-time constants.
    pub fn working_time(&self) -> &WorkingTimeConfig {
        &self.rules.working_time
    }

    /// Returns the regional surtax table.
    pub fn regions(&self) -> &RegionalSurtaxTable {
        &self.regions
    }
}

fn validate_brackets(name: &str, brackets: &[Bracket]) -> EngineResult<()> {
    let bounds: Vec<Option<Decimal>> = brackets.iter().map(|b| b.upper_bound).collect();
    validate_bounds(name, &bounds)?;
    if brackets.iter().any(|b| b.rate < Decimal::ZERO) {
        return Err(EngineError::InvalidConfig {
            message: format!("{} contains a negative rate", name),
        });
    }
    Ok(())
}

fn validate_tiers(name: &str, tiers: &[FormulaTier]) -> EngineResult<()> {
    let bounds: Vec<Option<Decimal>> = tiers.iter().map(|t| t.upper_bound).collect();
    validate_bounds(name, &bounds)?;
    if tiers
        .iter()
        .filter_map(|t| t.taper)
        .any(|taper| taper.span <= Decimal::ZERO)
    {
        return Err(EngineError::InvalidConfig {
            message: format!("{} contains a taper with a non-positive span", name),
        });
    }
    Ok(())
}

fn validate_bounds(name: &str, bounds: &[Option<Decimal>]) -> EngineResult<()> {
    let Some((last, rest)) = bounds.split_last() else {
        return Err(EngineError::InvalidConfig {
            message: format!("{} is empty", name),
        });
    };

    if last.is_some() {
        return Err(EngineError::InvalidConfig {
            message: format!("{} must end with an open-ended entry", name),
        });
    }

    let mut previous: Option<Decimal> = None;
    for bound in rest {
        let Some(bound) = *bound else {
            return Err(EngineError::InvalidConfig {
                message: format!("{} has an open-ended entry before the last one", name),
            });
        };
        if previous.is_some_and(|p| bound <= p) {
            return Err(EngineError::InvalidConfig {
                message: format!("{} upper bounds must be strictly ascending", name),
            });
        }
        previous = Some(bound);
    }

    Ok(())
}
