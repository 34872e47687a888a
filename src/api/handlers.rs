//! HTTP request handlers for the EOR Quote Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::engine::QuoteOutcome;
use crate::error::EngineError;

use super::request::{
    CompareRequest, ListQuotesParams, QuoteRequest, ReviewRequest, parse_id, parse_provider,
};
use super::response::{
    ApiError, ApiErrorResponse, ContractResponse, CountriesResponse, HealthResponse,
    QuoteListResponse,
};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/providers/:provider/countries", get(list_countries_handler))
        .route(
            "/providers/:provider/countries/:country",
            get(country_detail_handler),
        )
        .route("/providers/:provider/quotes", post(provider_quote_handler))
        .route(
            "/providers/:provider/contracts/:id",
            get(contract_status_handler),
        )
        .route("/quotes", get(list_quotes_handler))
        .route("/quotes/compare", post(compare_handler))
        .route("/quotes/:id", get(get_quote_handler))
        .route("/quotes/:id/review", post(review_handler))
        .route("/admin/reload", post(reload_handler))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

/// Logs a failed operation and converts the error.
fn reject(err: EngineError, correlation_id: Uuid, operation: &str) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request rejected"
    );
    err.into()
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let summary = state.engine().rate_summary();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        degraded: summary.degraded,
        providers: summary.providers,
    })
}

/// Handler for GET /providers/:provider/countries.
async fn list_countries_handler(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let provider = parse_provider(&provider)
        .map_err(|err| reject(err, correlation_id, "list_countries"))?;
    let countries = state
        .engine()
        .countries(provider)
        .map_err(|err| reject(err, correlation_id, "list_countries"))?;

    Ok(Json(CountriesResponse { provider, countries }).into_response())
}

/// Handler for GET /providers/:provider/countries/:country.
///
/// Returns the rate entry with its role bands, used by clients as form hints.
async fn country_detail_handler(
    State(state): State<AppState>,
    Path((provider, country)): Path<(String, String)>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let provider = parse_provider(&provider)
        .map_err(|err| reject(err, correlation_id, "country_detail"))?;
    let entry = state
        .engine()
        .country_entry(provider, &country)
        .map_err(|err| reject(err, correlation_id, "country_detail"))?;

    Ok(Json(entry).into_response())
}

/// Handler for POST /providers/:provider/quotes.
///
/// Returns the provider-shaped quote (200), or a pending contract (202)
/// when `async` is set.
async fn provider_quote_handler(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    payload: Result<Json<QuoteRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, provider = %provider, "Processing quote request");

    let provider =
        parse_provider(&provider).map_err(|err| reject(err, correlation_id, "quote"))?;
    let request = json_body(payload, correlation_id)?;
    let country = request
        .validate()
        .map_err(|err| reject(err, correlation_id, "quote"))?;

    let outcome = state
        .engine()
        .compute_quote(
            provider,
            &country,
            request.salary,
            request.role.as_deref(),
            request.async_mode,
        )
        .map_err(|err| reject(err, correlation_id, "quote"))?;

    match outcome {
        QuoteOutcome::Immediate(quote) => {
            info!(
                correlation_id = %correlation_id,
                provider = %provider,
                country = %quote.country_code,
                tce = %quote.costs.tce,
                "Quote completed"
            );
            Ok((StatusCode::OK, Json(quote.shaped())).into_response())
        }
        QuoteOutcome::Deferred(contract) => Ok((
            StatusCode::ACCEPTED,
            Json(ContractResponse::from(contract)),
        )
            .into_response()),
    }
}

/// Handler for GET /providers/:provider/contracts/:id.
async fn contract_status_handler(
    State(state): State<AppState>,
    Path((provider, id)): Path<(String, String)>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let provider = parse_provider(&provider)
        .map_err(|err| reject(err, correlation_id, "contract_status"))?;
    let id = parse_id(&id).map_err(|err| reject(err, correlation_id, "contract_status"))?;
    let contract = state
        .engine()
        .contract_status(provider, id)
        .map_err(|err| reject(err, correlation_id, "contract_status"))?;

    Ok(Json(ContractResponse::from(contract)).into_response())
}

/// Handler for POST /quotes/compare.
async fn compare_handler(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing comparison request");

    let query = json_body(payload, correlation_id)?
        .into_query()
        .map_err(|err| reject(err, correlation_id, "compare"))?;
    let record = state
        .engine()
        .compare_providers(query)
        .map_err(|err| reject(err, correlation_id, "compare"))?;

    info!(
        correlation_id = %correlation_id,
        quote_id = %record.id,
        provider = %record.chosen_provider,
        "Comparison stored"
    );
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// Handler for GET /quotes.
async fn list_quotes_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQuotesParams>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let status = params
        .status()
        .map_err(|err| reject(err, correlation_id, "list_quotes"))?;
    let quotes = state.engine().list_quotes(status);

    Ok(Json(QuoteListResponse {
        count: quotes.len(),
        quotes,
    })
    .into_response())
}

/// Handler for GET /quotes/:id.
async fn get_quote_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_id(&id).map_err(|err| reject(err, correlation_id, "get_quote"))?;
    let record = state
        .engine()
        .quote(id)
        .map_err(|err| reject(err, correlation_id, "get_quote"))?;

    Ok(Json(record).into_response())
}

/// Handler for POST /quotes/:id/review.
async fn review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let id = parse_id(&id).map_err(|err| reject(err, correlation_id, "review"))?;
    let request = json_body(payload, correlation_id)?;
    let record = state
        .engine()
        .review_quote(id, &request.action)
        .map_err(|err| reject(err, correlation_id, "review"))?;

    Ok(Json(record).into_response())
}

/// Handler for POST /admin/reload.
///
/// Rate files are read on the blocking pool.
async fn reload_handler(State(state): State<AppState>) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let engine = state.shared_engine();
    let summary = tokio::task::spawn_blocking(move || engine.reload_rate_tables())
        .await
        .map_err(|err| {
            error!(correlation_id = %correlation_id, error = %err, "Reload task failed");
            ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("RELOAD_FAILED", "Rate table reload failed", err.to_string()),
            }
        })?;

    info!(
        correlation_id = %correlation_id,
        degraded = summary.degraded,
        "Reload requested"
    );
    Ok(Json(summary).into_response())
}
