//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax rules or
//! computing a salary breakdown.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// An unrecognised region is deliberately absent: it is defined behaviour
/// (zero regional surtax), not a failure.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rule set parsed correctly but is not usable (e.g. brackets out of order).
    #[error("Invalid tax rules: {message}")]
    InvalidConfig {
        /// What is wrong with the rule set.
        message: String,
    },

    /// A salary input was rejected before any computation took place.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending input field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A normalisation would divide by zero or by a negative quantity.
    #[error("Cannot normalise by {quantity}: {message}")]
    DegenerateDivision {
        /// The divisor that degenerated (e.g. "annual_worked_hours").
        quantity: String,
        /// A description of how the divisor was derived.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
