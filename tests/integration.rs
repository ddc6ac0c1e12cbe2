//! Integration tests for the salary engine.
//!
//! This test suite covers:
//! - The Lombardia 30000 reference scenario
//! - Low-income apprenticeship
//! - Unrecognised regions
//! - Gross-salary sweeps
//! - Rule-set selection (2026 vs 2025)
//! - Error cases over HTTP

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use salary_engine::api::{AppState, create_router};
use salary_engine::calculation::{compute_breakdown, regional_surtax, sweep};
use salary_engine::config::{ConfigLoader, SurtaxPolicy, TaxRules};
use salary_engine::models::{ContractType, Region, SalaryInput};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state(dir: &str) -> AppState {
    let path = format!("{}/config/{}", env!("CARGO_MANIFEST_DIR"), dir);
    let config = ConfigLoader::load(path).expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state("it2026"))
}

fn decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected a decimal string, got {}", value))
        .parse()
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[tokio::test]
async fn test_lombardia_30000_over_http() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        json!({
            "gross_annual_salary": 30000,
            "region": "Lombardia",
            "contract_type": "permanent",
            "pay_periods_per_year": 13,
            "municipal_surcharge_rate": 0.8
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tax_year"], 2026);

    let breakdown = &body["breakdown"];
    let taxable = decimal(&breakdown["taxable_income"]);
    let net = decimal(&breakdown["net_salary"]);

    assert_eq!(taxable, dec!(27243));
    assert_eq!(decimal(&breakdown["tax"]["national_tax"]), dec!(6265.89));
    assert!(net > Decimal::ZERO);
    assert!(net < taxable);
    assert_eq!(decimal(&breakdown["net_monthly"]), net / dec!(13));
    assert!(!breakdown["audit_trace"].as_array().unwrap().is_empty());
}

#[test]
fn test_lombardia_30000_under_both_rule_sets() {
    let mut input = SalaryInput::new(dec!(30000), "Lombardia");
    input.municipal_surcharge_rate = dec!(0.8);

    for rules in [TaxRules::year_2026(), TaxRules::year_2025()] {
        let breakdown = compute_breakdown(&input, &rules).unwrap();
        assert_eq!(breakdown.taxable_income, dec!(27243));
        assert_eq!(breakdown.tax.national_tax, dec!(6265.89));
        assert!(breakdown.net_salary > Decimal::ZERO);
        assert!(breakdown.net_salary < breakdown.taxable_income);
    }
}

#[test]
fn test_low_income_apprentice_is_not_taxed() {
    let mut input = SalaryInput::new(dec!(5000), "Campania");
    input.contract_type = ContractType::Apprenticeship;

    for rules in [TaxRules::year_2026(), TaxRules::year_2025()] {
        let breakdown = compute_breakdown(&input, &rules).unwrap();
        assert!(breakdown.taxable_income < dec!(8500));
        assert_eq!(breakdown.tax.total_gross_tax, Decimal::ZERO);
        assert!(breakdown.net_salary >= breakdown.taxable_income);
        assert_eq!(
            breakdown.net_salary,
            breakdown.taxable_income + breakdown.tax.relief_payout
        );
    }
}

#[test]
fn test_unrecognised_region_has_zero_surtax_without_error() {
    for income in [dec!(0), dec!(9000), dec!(30000), dec!(120000)] {
        for policy in [SurtaxPolicy::SingleRate, SurtaxPolicy::Progressive] {
            assert_eq!(regional_surtax("Neverland", income, policy), Decimal::ZERO);
        }
    }

    let input = SalaryInput::new(dec!(30000), "Neverland");
    let breakdown = compute_breakdown(&input, &TaxRules::year_2026()).unwrap();
    assert_eq!(breakdown.tax.regional_surtax, Decimal::ZERO);
}

#[test]
fn test_every_region_recognised_by_official_name() {
    for region in Region::ALL {
        assert_eq!(Region::from_name(region.name()), Some(region));
        assert!(regional_surtax(region.name(), dec!(30000), SurtaxPolicy::Progressive) > dec!(0));
    }
}

#[test]
fn test_sweep_of_fifty_rows() {
    let template = SalaryInput::new(dec!(1), "Lombardia");
    let rows = sweep(&template, dec!(10000), dec!(1000), 50, &TaxRules::year_2026()).unwrap();

    assert!(rows.len() <= 50);
    assert!(rows.len() >= 49);
    assert!(
        rows.windows(2)
            .all(|pair| pair[0].gross_annual_salary < pair[1].gross_annual_salary)
    );
    assert!(rows[0].marginal_net.is_none());
    assert!(rows[1..].iter().all(|row| row.marginal_net.is_some()));
}

// =============================================================================
// HTTP endpoints
// =============================================================================

#[tokio::test]
async fn test_sweep_endpoint() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/sweep",
        json!({
            "input": { "gross_annual_salary": 1, "region": "Veneto" },
            "start": 10000,
            "step": 1000,
            "count": 50
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requested"], 50);
    let rows = body["rows"].as_array().unwrap();
    let skipped = body["skipped"].as_u64().unwrap() as usize;
    assert_eq!(rows.len() + skipped, 50);
    assert_eq!(decimal(&rows[0]["gross_annual_salary"]), dec!(10000));
    assert!(rows[0]["marginal_net"].is_null());
}

#[tokio::test]
async fn test_sweep_rejects_non_positive_step() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/sweep",
        json!({
            "input": { "gross_annual_salary": 1, "region": "Veneto" },
            "start": 10000,
            "step": 0,
            "count": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_surtax_endpoint_known_region() {
    let (status, body) = get(
        create_router_for_test(),
        "/surtax?region=Lombardia&income=20000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recognized"], true);
    assert_eq!(body["policy"], "single_rate");
    assert_eq!(decimal(&body["amount"]), dec!(316));
}

#[tokio::test]
async fn test_surtax_endpoint_unknown_region() {
    let (status, body) = get(
        create_router_for_test(),
        "/surtax?region=Neverland&income=20000",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recognized"], false);
    assert_eq!(decimal(&body["amount"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_surtax_endpoint_uses_loaded_policy() {
    let router = create_router(create_test_state("it2025"));
    let (status, body) = get(router, "/surtax?region=Lazio&income=20000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["policy"], "progressive");
    assert_eq!(decimal(&body["amount"]), dec!(426));
}

#[tokio::test]
async fn test_surtax_endpoint_missing_income() {
    let (status, body) = get(create_router_for_test(), "/surtax?region=Lazio").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_missing_gross_returns_validation_error() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        json!({ "region": "Lombardia" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_both_pension_forms_return_invalid_input() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        json!({
            "gross_annual_salary": 30000,
            "region": "Lombardia",
            "pension_fund_voluntary_amount": 1000,
            "pension_fund_voluntary_rate": 2
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["details"], "pension_fund_voluntary");
}

#[tokio::test]
async fn test_zero_weekly_hours_returns_degenerate_division() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        json!({
            "gross_annual_salary": 30000,
            "region": "Lombardia",
            "weekly_hours": 0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "DEGENERATE_DIVISION");
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate")
        .body(Body::from(
            json!({ "gross_annual_salary": 30000, "region": "Lazio" }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_invalid_wealth_weights_return_invalid_input() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        json!({
            "gross_annual_salary": 30000,
            "region": "Lombardia",
            "wealth_weights": { "meal_vouchers": 2, "welfare": 0.9, "deferred": 0.8 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_pay_periods_outside_range_return_invalid_input() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/calculate",
        json!({
            "gross_annual_salary": 30000,
            "region": "Lombardia",
            "pay_periods_per_year": 16
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["details"], "pay_periods_per_year");
}
