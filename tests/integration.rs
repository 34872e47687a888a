//! Integration tests for the EOR Quote Engine HTTP API.
//!
//! This test suite covers:
//! - Health and rate table coverage
//! - Country listings and role band hints
//! - Synchronous provider quotes in each provider's shape
//! - Async contracts and their ready transition
//! - Provider comparisons and the manual review queue
//! - Rate table reloads
//! - Error cases

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use eor_quote_engine::api::{AppState, create_router};
use eor_quote_engine::config::{DirectoryRateSource, EngineSettings, StaticRateSource};
use eor_quote_engine::engine::QuoteEngine;
use eor_quote_engine::scheduler::ManualScheduler;

// =============================================================================
// Test Helpers
// =============================================================================

const DATA_DIR: &str = "./data/providers";

fn test_settings() -> EngineSettings {
    EngineSettings {
        rng_seed: Some(7),
        ..EngineSettings::default()
    }
}

fn create_test_router(settings: EngineSettings) -> (Router, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let engine = QuoteEngine::with_scheduler(
        Arc::new(DirectoryRateSource::new(DATA_DIR)),
        settings,
        scheduler.clone(),
    );
    (create_router(AppState::new(engine)), scheduler)
}

fn create_router_for_test() -> Router {
    create_test_router(test_settings()).0
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn decimal_field(value: &Value) -> Decimal {
    match value {
        Value::String(s) => decimal(s),
        Value::Number(n) => decimal(&n.to_string()),
        other => panic!("Expected decimal, got {:?}", other),
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn post_raw(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

fn compare_body(country: &str, salary: u32, role: &str) -> Value {
    json!({
        "country": country,
        "salary": salary.to_string(),
        "currency": "USD",
        "role": role
    })
}

// =============================================================================
// Health and Countries
// =============================================================================

#[tokio::test]
async fn test_health_reports_loaded_tables() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["degraded"], false);
    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 3);
    // secondaries cover exactly the primary's countries
    let counts: Vec<u64> = providers
        .iter()
        .map(|p| p["countries"].as_u64().unwrap())
        .collect();
    assert!(counts.iter().all(|&c| c == counts[0] && c > 0));
}

#[tokio::test]
async fn test_health_degraded_without_seed_data() {
    let engine = QuoteEngine::with_scheduler(
        Arc::new(StaticRateSource::new(vec![])),
        test_settings(),
        Arc::new(ManualScheduler::new()),
    );
    let router = create_router(AppState::new(engine));

    let (status, body) = send(&router, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], true);

    let (_, countries) = send(&router, "GET", "/providers/remote/countries", None).await;
    assert_eq!(countries["countries"], json!(["US"]));
}

#[tokio::test]
async fn test_list_countries() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/providers/oyster/countries", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "oyster");
    let countries: Vec<&str> = body["countries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert!(countries.contains(&"US"));
    assert!(countries.contains(&"GB"));
}

#[tokio::test]
async fn test_country_detail_includes_role_bands() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/providers/deel/countries/us", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["country_code"], "US");
    assert_eq!(body["currency_code"], "USD");
    let bands = body["role_bands"].as_array().unwrap();
    assert!(bands.iter().any(|b| b["title"] == "Software Engineer"));
}

#[tokio::test]
async fn test_unknown_country_detail_is_404() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/providers/deel/countries/ZZ", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COUNTRY_NOT_FOUND");
}

// =============================================================================
// Synchronous Quotes
// =============================================================================

#[tokio::test]
async fn test_primary_quote_is_exact_without_jitter() {
    let mut settings = test_settings();
    settings.rate_jitter_percent = Decimal::ZERO;
    let (router, _) = create_test_router(settings);
    let (status, body) = send(
        &router,
        "POST",
        "/providers/deel/quotes",
        Some(json!({"country": "US", "salary": "100000", "role": "Software Engineer"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 100000 + 7650 + 20000 + 6000 + 12500
    assert_eq!(decimal_field(&body["salary"]), decimal("100000"));
    assert_eq!(decimal_field(&body["employer_costs"]["tax"]), decimal("7650"));
    assert_eq!(decimal_field(&body["total_cost"]), decimal("146150"));
}

#[tokio::test]
async fn test_primary_quote_keeps_caller_salary_under_jitter() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/providers/deel/quotes",
        Some(json!({"country": "US", "salary": "100000", "role": "Software Engineer"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["salary"]), decimal("100000"));
    // tax 7650 ± 3%
    let tax = decimal_field(&body["employer_costs"]["tax"]);
    assert!(tax >= decimal("7420.50") && tax <= decimal("7879.50"), "{}", tax);
}

#[tokio::test]
async fn test_remote_quote_uses_camel_case() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/providers/remote/quotes",
        Some(json!({"country": "GB", "salary": 60000})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryCode"], "GB");
    assert_eq!(decimal_field(&body["grossSalary"]), decimal("60000"));
    assert!(decimal_field(&body["totalEmploymentCost"]) > decimal("60000"));
}

#[tokio::test]
async fn test_oyster_quote_has_line_items() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/providers/oyster/quotes",
        Some(json!({"country": "DE", "salary": "70000"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let quote = &body["quote"];
    let breakdown = quote["breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 4);

    let lines: Decimal = breakdown.iter().map(|l| decimal_field(&l["amount"])).sum();
    let total = decimal_field(&quote["total"]);
    let salary = decimal_field(&quote["annual_salary"]);
    assert!((salary + lines - total).abs() <= decimal("0.02"));
}

// =============================================================================
// Async Contracts
// =============================================================================

#[tokio::test]
async fn test_async_contract_lifecycle() {
    let (router, scheduler) = create_test_router(test_settings());

    let (status, body) = send(
        &router,
        "POST",
        "/providers/remote/quotes",
        Some(json!({"country": "US", "salary": "95000", "async": true})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "pending");
    assert!(body.get("quote").is_none());

    let contract_uri = format!(
        "/providers/remote/contracts/{}",
        body["contract_id"].as_str().unwrap()
    );

    scheduler.advance(Duration::from_millis(1999));
    let (status, body) = send(&router, "GET", &contract_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");

    scheduler.advance(Duration::from_millis(1));
    let (status, body) = send(&router, "GET", &contract_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert!(body["quote"]["totalEmploymentCost"].is_string());
    assert!(body["ready_at"].is_string());
}

#[tokio::test]
async fn test_contract_is_scoped_to_provider() {
    let router = create_router_for_test();
    let (_, body) = send(
        &router,
        "POST",
        "/providers/deel/quotes",
        Some(json!({"country": "US", "salary": "95000", "async": true})),
    )
    .await;

    let uri = format!(
        "/providers/oyster/contracts/{}",
        body["contract_id"].as_str().unwrap()
    );
    let (status, body) = send(&router, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CONTRACT_NOT_FOUND");
}

#[tokio::test]
async fn test_async_unknown_country_is_404() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/providers/remote/quotes",
        Some(json!({"country": "ZZ", "salary": "95000", "async": true})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COUNTRY_NOT_FOUND");
}

// =============================================================================
// Comparison and Review
// =============================================================================

#[tokio::test]
async fn test_compare_stores_record() {
    let router = create_router_for_test();
    let (status, record) = send(
        &router,
        "POST",
        "/quotes/compare",
        Some(compare_body("US", 120000, "Senior Software Engineer")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["provider_costs"].as_array().unwrap().len(), 3);
    assert_eq!(record["validation"]["service_type"], "full-time-employee");
    assert_eq!(decimal_field(&record["validation"]["margin_percent"]), decimal("20"));

    let expected_status = if record["requires_manual_review"] == true {
        "pending"
    } else {
        "approved"
    };
    assert_eq!(record["status"], expected_status);

    // the chosen provider follows the spread rule
    let tces: Vec<Decimal> = record["provider_costs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pc| decimal_field(&pc["costs"]["tce"]))
        .collect();
    let chosen = record["provider_costs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|pc| pc["provider"] == record["chosen_provider"])
        .map(|pc| decimal_field(&pc["costs"]["tce"]))
        .unwrap();
    let max = tces.iter().copied().max().unwrap();
    let min = tces.iter().copied().min().unwrap();
    if decimal_field(&record["spread_percent"]) <= decimal("4") {
        assert_eq!(chosen, max);
    } else {
        assert_eq!(chosen, min);
    }

    let uri = format!("/quotes/{}", record["id"].as_str().unwrap());
    let (status, fetched) = send(&router, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], record["id"]);
}

#[tokio::test]
async fn test_compare_classifies_executive() {
    let router = create_router_for_test();
    let (status, record) = send(
        &router,
        "POST",
        "/quotes/compare",
        Some(compare_body("GB", 150000, "VP of Engineering")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["validation"]["service_type"], "executive");
    let steps = record["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 5);
    assert_eq!(steps[4]["rule_id"], "quote_validation");
}

#[tokio::test]
async fn test_low_margin_review_flow() {
    let mut settings = test_settings();
    settings.validation.internal_cost_ratio = decimal("0.9");
    let (router, _) = create_test_router(settings);

    let (status, record) = send(
        &router,
        "POST",
        "/quotes/compare",
        Some(compare_body("DE", 80000, "Backend Engineer")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["status"], "pending");
    assert_eq!(record["requires_manual_review"], true);
    assert!(!record["validation"]["errors"].as_array().unwrap().is_empty());

    let (_, queue) = send(&router, "GET", "/quotes?status=pending", None).await;
    assert_eq!(queue["count"], 1);

    let review_uri = format!("/quotes/{}/review", record["id"].as_str().unwrap());
    let (status, body) = send(&router, "POST", &review_uri, Some(json!({"action": "maybe"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_ACTION");

    let (status, body) = send(&router, "POST", &review_uri, Some(json!({"action": "Approve"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["review_history"].as_array().unwrap().len(), 1);

    let (_, queue) = send(&router, "GET", "/quotes?status=pending", None).await;
    assert_eq!(queue["count"], 0);
    let (_, approved) = send(&router, "GET", "/quotes?status=approved", None).await;
    assert_eq!(approved["count"], 1);
}

#[tokio::test]
async fn test_compare_unknown_country_is_404_and_not_stored() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/quotes/compare",
        Some(compare_body("ZZ", 100000, "Engineer")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "COUNTRY_NOT_FOUND");

    let (_, list) = send(&router, "GET", "/quotes", None).await;
    assert_eq!(list["count"], 0);
}

// =============================================================================
// Reload
// =============================================================================

#[tokio::test]
async fn test_admin_reload() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "POST", "/admin/reload", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], false);
    assert_eq!(body["providers"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_malformed_json() {
    let router = create_router_for_test();
    let (status, body) = post_raw(&router, "/quotes/compare", "{ not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_error_missing_salary() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/providers/deel/quotes",
        Some(json!({"country": "US"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("salary"));
}

#[tokio::test]
async fn test_error_non_positive_salary() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/quotes/compare",
        Some(compare_body("US", 0, "Engineer")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_salary_above_maximum() {
    let router = create_router_for_test();
    let huge = "70000000000000000000000000000";

    let (status, body) = send(
        &router,
        "POST",
        "/providers/deel/quotes",
        Some(json!({"country": "DE", "salary": huge})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &router,
        "POST",
        "/quotes/compare",
        Some(json!({"country": "DE", "salary": huge, "currency": "EUR", "role": "Engineer"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_bad_country_code() {
    let router = create_router_for_test();
    let (status, body) = send(
        &router,
        "POST",
        "/providers/deel/quotes",
        Some(json!({"country": "USA", "salary": "100000"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_unknown_provider() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/providers/acme/countries", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_error_unknown_quote_id() {
    let router = create_router_for_test();
    let uri = format!("/quotes/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&router, "GET", &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "QUOTE_NOT_FOUND");

    let (status, _) = send(&router, "GET", "/quotes/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_invalid_status_filter() {
    let router = create_router_for_test();
    let (status, body) = send(&router, "GET", "/quotes?status=archived", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
