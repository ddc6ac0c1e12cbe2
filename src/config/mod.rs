//! Configuration loading and management for the salary engine.
//!
//! This module provides the tax-year rule sets the calculator runs on,
//! either from the built-in presets or loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/it2026").unwrap();
//! println!("Loaded rules: {}", config.rules().metadata().name);
//! ```

mod loader;
mod presets;
mod types;

pub use loader::ConfigLoader;
pub(crate) use types::evaluate_tiers;
pub use types::{
    Bracket, EmploymentCreditConfig, FormulaTier, LowIncomeAllowanceConfig, LowIncomeRelief,
    NationalTaxConfig, NetTaxFloor, PensionFundConfig, RulesFile, RulesMetadata,
    SeveranceConfig, SocialSecurityConfig, SurtaxPolicy, Taper, TaxPolicy, TaxRules,
    WorkingTimeConfig,
};
