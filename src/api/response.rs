//! Response types for the salary engine API.
//!
//! This module defines the success envelopes, the error response
//! structures, and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SurtaxPolicy;
use crate::error::EngineError;
use crate::models::{GeneratedWealth, SalaryBreakdown, SweepRow};

/// Response body for `/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// Tax year of the rule set used.
    pub tax_year: i32,
    /// The salary breakdown.
    pub breakdown: SalaryBreakdown,
    /// Generated wealth, when weights were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_wealth: Option<GeneratedWealth>,
}

/// Response body for `/sweep`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResponse {
    /// Unique identifier for this sweep.
    pub calculation_id: Uuid,
    /// When the sweep was performed.
    pub timestamp: DateTime<Utc>,
    /// The engine version that produced the result.
    pub engine_version: String,
    /// Tax year of the rule set used.
    pub tax_year: i32,
    /// Number of rows requested.
    pub requested: usize,
    /// Number of rows skipped because their calculation failed.
    pub skipped: usize,
    /// The surviving rows in ascending gross order.
    pub rows: Vec<SweepRow>,
}

/// Response body for `/surtax`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurtaxResponse {
    /// The region name as given.
    pub region: String,
    /// Whether the name matched a known region.
    pub recognized: bool,
    /// Taxable income the surtax was computed on.
    pub income: Decimal,
    /// Policy the schedule was applied with.
    pub policy: SurtaxPolicy,
    /// The regional surtax.
    pub amount: Decimal,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid tax rules", message),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input field '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::DegenerateDivision { quantity, message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "DEGENERATE_DIVISION",
                    format!("Cannot normalise by {}", quantity),
                    message,
                ),
            },
        }
    }
}
