//! Built-in rule sets.
//!
//! The shipped `config/it2026` and `config/it2025` directories hold the same
//! figures; the loader tests keep the two in sync.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculation::RegionalSurtaxTable;

use super::types::{
    Bracket, EmploymentCreditConfig, FormulaTier, LowIncomeAllowanceConfig, LowIncomeRelief,
    NationalTaxConfig, NetTaxFloor, PensionFundConfig, RulesFile, RulesMetadata,
    SeveranceConfig, SocialSecurityConfig, SurtaxPolicy, Taper, TaxPolicy, TaxRules,
    WorkingTimeConfig,
};

impl TaxRules {
    /// 2026 rules: 33% middle bracket, single-rate regional surtax, tiered
    /// low-income allowances, and allowance excess paid out.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::{SurtaxPolicy, TaxRules};
    /// use rust_decimal_macros::dec;
    ///
    /// let rules = TaxRules::year_2026();
    /// assert_eq!(rules.metadata().tax_year, 2026);
    /// assert_eq!(rules.policy().surtax, SurtaxPolicy::SingleRate);
    /// assert_eq!(rules.national_tax().brackets[1].rate, dec!(0.33));
    /// ```
    pub fn year_2026() -> Self {
        let rules = RulesFile {
            metadata: RulesMetadata {
                tax_year: 2026,
                name: "IRPEF 2026".to_string(),
                source: "Legge di Bilancio 2026".to_string(),
            },
            policy: TaxPolicy {
                surtax: SurtaxPolicy::SingleRate,
                low_income_relief: LowIncomeRelief::Tiered,
                net_tax_floor: NetTaxFloor::AfterCredits,
            },
            national_tax: national_tax(dec!(0.33)),
            ..common_rules()
        };
        build(rules)
    }

    /// 2025 rules: 35% middle bracket, progressive regional surtax, a flat
    /// relief below the minimum taxable income, and net tax floored after
    /// allowances.
    pub fn year_2025() -> Self {
        let rules = RulesFile {
            metadata: RulesMetadata {
                tax_year: 2025,
                name: "IRPEF 2025".to_string(),
                source: "Legge di Bilancio 2025".to_string(),
            },
            policy: TaxPolicy {
                surtax: SurtaxPolicy::Progressive,
                low_income_relief: LowIncomeRelief::FlatBelowMinimum,
                net_tax_floor: NetTaxFloor::AfterAllowances,
            },
            national_tax: national_tax(dec!(0.35)),
            ..common_rules()
        };
        build(rules)
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::year_2026()
    }
}

// Preset data is checked by `test_presets_pass_validation`.
fn build(rules: RulesFile) -> TaxRules {
    TaxRules {
        rules,
        regions: RegionalSurtaxTable::builtin().clone(),
    }
}

fn national_tax(middle_rate: Decimal) -> NationalTaxConfig {
    NationalTaxConfig {
        brackets: vec![
            Bracket {
                upper_bound: Some(dec!(28000)),
                rate: dec!(0.23),
            },
            Bracket {
                upper_bound: Some(dec!(50000)),
                rate: middle_rate,
            },
            Bracket {
                upper_bound: None,
                rate: dec!(0.43),
            },
        ],
        minimum_taxable_income: dec!(8500),
    }
}

fn tier(upper_bound: Option<Decimal>) -> FormulaTier {
    FormulaTier {
        upper_bound,
        rate: Decimal::ZERO,
        fixed: Decimal::ZERO,
        taper: None,
    }
}

fn common_rules() -> RulesFile {
    RulesFile {
        metadata: RulesMetadata {
            tax_year: 0,
            name: String::new(),
            source: String::new(),
        },
        policy: TaxPolicy {
            surtax: SurtaxPolicy::SingleRate,
            low_income_relief: LowIncomeRelief::Tiered,
            net_tax_floor: NetTaxFloor::AfterCredits,
        },
        national_tax: national_tax(dec!(0.33)),
        social_security: SocialSecurityConfig {
            standard_rate: dec!(0.0919),
            apprenticeship_rate: dec!(0.0584),
        },
        severance: SeveranceConfig {
            divisor: dec!(13.5),
            contribution_rate: dec!(0.005),
        },
        employment_credits: EmploymentCreditConfig {
            minimum_income: dec!(8500),
            tiers: vec![
                // 1955 base credit plus the 1200 supplementary treatment
                FormulaTier {
                    fixed: dec!(3155),
                    ..tier(Some(dec!(15000)))
                },
                FormulaTier {
                    fixed: dec!(1910),
                    taper: Some(Taper {
                        amount: dec!(1190),
                        ceiling: dec!(28000),
                        span: dec!(13000),
                    }),
                    ..tier(Some(dec!(28000)))
                },
                FormulaTier {
                    taper: Some(Taper {
                        amount: dec!(1910),
                        ceiling: dec!(50000),
                        span: dec!(22000),
                    }),
                    ..tier(Some(dec!(50000)))
                },
                tier(None),
            ],
        },
        low_income_allowances: LowIncomeAllowanceConfig {
            tiers: vec![
                FormulaTier {
                    rate: dec!(0.071),
                    ..tier(Some(dec!(8500)))
                },
                FormulaTier {
                    rate: dec!(0.053),
                    ..tier(Some(dec!(15000)))
                },
                FormulaTier {
                    rate: dec!(0.048),
                    ..tier(Some(dec!(20000)))
                },
                FormulaTier {
                    fixed: dec!(1000),
                    ..tier(Some(dec!(32000)))
                },
                FormulaTier {
                    taper: Some(Taper {
                        amount: dec!(1000),
                        ceiling: dec!(40000),
                        span: dec!(8000),
                    }),
                    ..tier(Some(dec!(40000)))
                },
                tier(None),
            ],
            flat_rate: dec!(0.071),
        },
        pension_fund: PensionFundConfig {
            deductible_limit: dec!(5300),
        },
        working_time: WorkingTimeConfig {
            standard_working_days: 253,
            working_days_per_week: 5,
            days_in_year: 365,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_pass_validation() {
        for rules in [TaxRules::year_2026(), TaxRules::year_2025()] {
            let file = RulesFile {
                metadata: rules.metadata().clone(),
                policy: rules.policy(),
                national_tax: rules.national_tax().clone(),
                social_security: rules.social_security().clone(),
                severance: rules.severance().clone(),
                employment_credits: rules.employment_credits().clone(),
                low_income_allowances: rules.low_income_allowances().clone(),
                pension_fund: rules.pension_fund().clone(),
                working_time: rules.working_time().clone(),
            };
            assert!(TaxRules::new(file, rules.regions().clone()).is_ok());
        }
    }

    #[test]
    fn test_presets_differ_only_in_year_specific_fields() {
        let y2026 = TaxRules::year_2026();
        let y2025 = TaxRules::year_2025();

        assert_eq!(y2026.national_tax().brackets[1].rate, dec!(0.33));
        assert_eq!(y2025.national_tax().brackets[1].rate, dec!(0.35));
        assert_eq!(y2026.policy().surtax, SurtaxPolicy::SingleRate);
        assert_eq!(y2025.policy().surtax, SurtaxPolicy::Progressive);
        assert_eq!(y2026.employment_credits(), y2025.employment_credits());
        assert_eq!(y2026.regions(), y2025.regions());
    }

    #[test]
    fn test_default_is_2026() {
        assert_eq!(TaxRules::default().metadata().tax_year, 2026);
    }
}
