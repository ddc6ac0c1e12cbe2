//! Application state for the salary engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, TaxRules};

/// Shared application state.
///
/// Holds the loaded tax rules behind an `Arc`; they are read-only for the
/// lifetime of the server.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tax-year configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the tax rules requests are computed with.
    pub fn rules(&self) -> &TaxRules {
        self.config.rules()
    }
}

impl From<TaxRules> for AppState {
    fn from(rules: TaxRules) -> Self {
        Self::new(ConfigLoader::from_rules(rules))
    }
}
