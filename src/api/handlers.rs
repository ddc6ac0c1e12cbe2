//! HTTP request handlers for the salary engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_breakdown, generated_wealth, sweep};
use crate::error::EngineError;
use crate::models::{Region, SalaryInput};

use super::request::{CalculationRequest, SurtaxQuery, SweepRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, SurtaxResponse, SweepResponse,
};
use super::state::AppState;

/// Largest sweep a single request may ask for.
pub const MAX_SWEEP_ROWS: usize = 500;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/sweep", post(sweep_handler))
        .route("/surtax", get(surtax_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a salary input and returns its breakdown, plus a
/// generated-wealth estimate when weights are supplied.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(json_rejection_error(rejection, correlation_id))
                .into_response();
        }
    };

    let input: SalaryInput = request.input.into();
    let rules = state.rules();

    let start_time = Instant::now();
    let result = compute_breakdown(&input, rules).and_then(|breakdown| {
        let wealth = request
            .wealth_weights
            .map(|weights| generated_wealth(&breakdown, &weights))
            .transpose()?;
        Ok((breakdown, wealth))
    });

    match result {
        Ok((breakdown, generated_wealth)) => {
            info!(
                correlation_id = %correlation_id,
                region = %input.region,
                gross = %input.gross_annual_salary,
                net_salary = %breakdown.net_salary,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                CalculationResponse {
                    calculation_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    tax_year: rules.metadata().tax_year,
                    breakdown,
                    generated_wealth,
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /sweep endpoint.
///
/// Runs the calculator across a range of gross salaries.
async fn sweep_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing sweep request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(json_rejection_error(rejection, correlation_id))
                .into_response();
        }
    };

    if request.count > MAX_SWEEP_ROWS {
        warn!(
            correlation_id = %correlation_id,
            count = request.count,
            "Sweep too large"
        );
        return ApiErrorResponse::bad_request(ApiError::validation_error(format!(
            "count must not exceed {}, got {}",
            MAX_SWEEP_ROWS, request.count
        )))
        .into_response();
    }

    let template: SalaryInput = request.input.into();
    let tax_year = state.rules().metadata().tax_year;
    let (start, step, count) = (request.start, request.step, request.count);

    // The sweep fans out on rayon; keep it off the async worker threads
    let start_time = Instant::now();
    let result = tokio::task::spawn_blocking(move || {
        sweep(&template, start, step, count, state.rules())
    })
    .await;

    let result = match result {
        Ok(result) => result,
        Err(join_error) => {
            warn!(
                correlation_id = %correlation_id,
                error = %join_error,
                "Sweep task failed"
            );
            return json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Sweep task did not complete"),
            );
        }
    };

    match result {
        Ok(rows) => {
            let skipped = request.count - rows.len();
            info!(
                correlation_id = %correlation_id,
                requested = request.count,
                skipped,
                duration_us = start_time.elapsed().as_micros(),
                "Sweep completed successfully"
            );
            json_response(
                StatusCode::OK,
                SweepResponse {
                    calculation_id: Uuid::new_v4(),
                    timestamp: Utc::now(),
                    engine_version: env!("CARGO_PKG_VERSION").to_string(),
                    tax_year,
                    requested: request.count,
                    skipped,
                    rows,
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for GET /surtax endpoint.
///
/// Looks up the regional surtax for one region and income under the
/// loaded rules' policy. Unknown regions answer zero, not an error.
async fn surtax_handler(
    State(state): State<AppState>,
    query: Result<Query<SurtaxQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid surtax query"
            );
            return ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            ))
            .into_response();
        }
    };

    let rules = state.rules();
    let policy = rules.policy().surtax;
    let recognized = Region::from_name(&query.region).is_some();
    let amount = rules.regions().surtax(&query.region, query.income, policy);

    info!(
        correlation_id = %correlation_id,
        region = %query.region,
        recognized,
        amount = %amount,
        "Surtax lookup"
    );

    json_response(
        StatusCode::OK,
        SurtaxResponse {
            region: query.region,
            recognized,
            income: query.income,
            policy,
            amount,
        },
    )
}

/// Maps a JSON body rejection to an API error.
fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxRules;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use rust_decimal_macros::dec;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        create_router(AppState::from(TaxRules::year_2026()))
    }

    async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let body = r#"{ "gross_annual_salary": 30000, "region": "Lombardia", "municipal_surcharge_rate": 0.8 }"#;
        let (status, body) = post_json(create_test_router(), "/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.tax_year, 2026);
        assert_eq!(result.breakdown.taxable_income, dec!(27243));
        assert!(result.generated_wealth.is_none());
    }

    #[tokio::test]
    async fn test_calculate_with_weights_includes_wealth() {
        let body = r#"{
            "gross_annual_salary": 30000,
            "region": "Lombardia",
            "wealth_weights": { "meal_vouchers": 0.95, "welfare": 0.95, "deferred": 0.85 }
        }"#;
        let (status, body) = post_json(create_test_router(), "/calculate", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: CalculationResponse = serde_json::from_slice(&body).unwrap();
        let wealth = result.generated_wealth.unwrap();
        assert!(wealth.annual > result.breakdown.net_salary);
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let (status, body) =
            post_json(create_test_router(), "/calculate", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_sweep_runs_on_blocking_pool() {
        let body = r#"{ "input": { "gross_annual_salary": 1, "region": "Veneto" }, "start": 20000, "step": 1000, "count": 20 }"#;
        let (status, body) = post_json(create_test_router(), "/sweep", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        let result: SweepResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.tax_year, 2026);
        assert_eq!(result.rows.len(), 20);
        assert_eq!(result.skipped, 0);
    }

    #[tokio::test]
    async fn test_sweep_with_overflowing_step_skips_rows() {
        let body = format!(
            r#"{{ "input": {{ "gross_annual_salary": 1, "region": "Veneto" }}, "start": 10000, "step": "{}", "count": 10 }}"#,
            rust_decimal::Decimal::MAX / dec!(4)
        );
        let (status, body) = post_json(create_test_router(), "/sweep", body).await;

        assert_eq!(status, StatusCode::OK);
        let result: SweepResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.skipped, 9);
    }

    #[tokio::test]
    async fn test_calculate_oversized_amount_returns_invalid_input() {
        let body = format!(
            r#"{{ "gross_annual_salary": 30000, "region": "Lombardia", "meal_voucher_daily_amount": "{}", "meal_voucher_days": 220 }}"#,
            rust_decimal::Decimal::MAX / dec!(100)
        );
        let (status, body) = post_json(create_test_router(), "/calculate", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert_eq!(error.details.as_deref(), Some("meal_voucher_daily_amount"));
    }

    #[tokio::test]
    async fn test_sweep_over_limit_returns_400() {
        let body = format!(
            r#"{{ "input": {{ "gross_annual_salary": 1, "region": "Veneto" }}, "start": 10000, "step": 100, "count": {} }}"#,
            MAX_SWEEP_ROWS + 1
        );
        let (status, body) = post_json(create_test_router(), "/sweep", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }
}
