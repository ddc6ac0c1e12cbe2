//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax rules
//! from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::calculation::RegionalSurtaxTable;
use crate::error::{EngineError, EngineResult};
use crate::models::Region;

use super::types::{Bracket, RulesFile, TaxRules};

/// The `regions.yaml` file.
#[derive(Debug, Clone, Deserialize)]
struct RegionsFile {
    regions: BTreeMap<Region, Vec<Bracket>>,
}

/// Loads and provides access to a tax-year rule set.
///
/// # Directory Structure
///
/// ```text
/// config/it2026/
/// ├── rules.yaml    # Policy switches, national tax, contributions, credits
/// └── regions.yaml  # Regional surtax schedules
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/it2026").unwrap();
/// println!("Loaded rules: {}", loader.rules().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    rules: TaxRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/it2026")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The resulting rule set fails validation
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/it2026")?;
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let rules_file = Self::load_yaml::<RulesFile>(&path.join("rules.yaml"))?;
        let regions_file = Self::load_yaml::<RegionsFile>(&path.join("regions.yaml"))?;

        let regions = RegionalSurtaxTable::new(regions_file.regions);
        let rules = TaxRules::new(rules_file, regions)?;

        debug!(
            path = %path.display(),
            tax_year = rules.metadata().tax_year,
            regions = rules.regions().len(),
            "Loaded tax rules"
        );

        Ok(Self { rules })
    }

    /// Wraps an already-built rule set, e.g. a preset.
    pub fn from_rules(rules: TaxRules) -> Self {
        Self { rules }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded rule set.
    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Consumes the loader, returning the rule set.
    pub fn into_rules(self) -> TaxRules {
        self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LowIncomeRelief, NetTaxFloor, SurtaxPolicy};
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn config_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("config").join(name)
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "salary-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_2026_configuration() {
        let result = ConfigLoader::load(config_path("it2026"));
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.rules().metadata().tax_year, 2026);
        assert_eq!(loader.rules().policy().surtax, SurtaxPolicy::SingleRate);
    }

    #[test]
    fn test_load_2025_configuration() {
        let loader = ConfigLoader::load(config_path("it2025")).unwrap();
        let rules = loader.rules();

        assert_eq!(rules.metadata().tax_year, 2025);
        assert_eq!(rules.policy().surtax, SurtaxPolicy::Progressive);
        assert_eq!(
            rules.policy().low_income_relief,
            LowIncomeRelief::FlatBelowMinimum
        );
        assert_eq!(rules.policy().net_tax_floor, NetTaxFloor::AfterAllowances);
        assert_eq!(rules.national_tax().brackets[1].rate, dec!(0.35));
    }

    #[test]
    fn test_shipped_2026_files_match_preset() {
        let loader = ConfigLoader::load(config_path("it2026")).unwrap();
        assert_eq!(loader.rules(), &TaxRules::year_2026());
    }

    #[test]
    fn test_shipped_2025_files_match_preset() {
        let loader = ConfigLoader::load(config_path("it2025")).unwrap();
        assert_eq!(loader.rules(), &TaxRules::year_2025());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("rules.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_yaml_returns_parse_error() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("rules.yaml"), "metadata: [unclosed").unwrap();
        fs::write(dir.join("regions.yaml"), "regions: {}").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.contains("rules.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_unordered_regional_schedule() {
        let dir = scratch_dir("unordered");
        let rules_yaml = fs::read_to_string(config_path("it2026").join("rules.yaml")).unwrap();
        fs::write(dir.join("rules.yaml"), rules_yaml).unwrap();
        fs::write(
            dir.join("regions.yaml"),
            r#"
regions:
  lazio:
    - { upper_bound: "28000", rate: "0.0333" }
    - { upper_bound: "15000", rate: "0.0173" }
    - { rate: "0.0333" }
"#,
        )
        .unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_from_rules_wraps_preset() {
        let loader = ConfigLoader::from_rules(TaxRules::year_2025());
        assert_eq!(loader.into_rules().metadata().tax_year, 2025);
    }
}
