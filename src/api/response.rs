//! Response types for the EOR Quote Engine API.
//!
//! This module defines the success bodies, the error response structure,
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ProviderCoverage;
use crate::error::EngineError;
use crate::models::{Contract, ContractStatus, Provider, ProviderQuoteBody, QuoteContext, QuoteRecord};

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// True when the fallback rate table is in use.
    pub degraded: bool,
    /// Country coverage per provider.
    pub providers: Vec<ProviderCoverage>,
}

/// Body of `GET /providers/:provider/countries`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    /// The provider.
    pub provider: Provider,
    /// Supported country codes, sorted.
    pub countries: Vec<String>,
}

/// Body of an async quote or contract lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractResponse {
    /// Contract id to poll.
    pub contract_id: Uuid,
    /// The provider.
    pub provider: Provider,
    /// `pending` or `ready`.
    pub status: ContractStatus,
    /// When the contract was created.
    pub created_at: DateTime<Utc>,
    /// When the contract became ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<DateTime<Utc>>,
    /// The provider-shaped quote, once ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<ProviderQuoteBody>,
}

impl From<Contract> for ContractResponse {
    fn from(contract: Contract) -> Self {
        let context = QuoteContext {
            country_code: contract.input.country_code.clone(),
            currency_code: contract.currency_code.clone(),
        };
        let quote = contract
            .costs
            .as_ref()
            .map(|costs| ProviderQuoteBody::project(contract.provider, &context, costs));

        Self {
            contract_id: contract.id,
            provider: contract.provider,
            status: contract.status,
            created_at: contract.created_at,
            ready_at: contract.ready_at,
            quote,
        }
    }
}

/// Body of `GET /quotes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteListResponse {
    /// Number of records returned.
    pub count: usize,
    /// Records, newest first.
    pub quotes: Vec<QuoteRecord>,
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
#[derive(Debug)]
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
        let message = error.to_string();
        match error {
            EngineError::CountryNotFound { provider, country } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "COUNTRY_NOT_FOUND",
                    message,
                    format!("Provider '{}' has no rate entry for '{}'", provider, country),
                ),
            },
            EngineError::RecordNotFound { kind, .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(format!("{}_NOT_FOUND", kind.to_ascii_uppercase()), message),
            },
            EngineError::InvalidInput { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    message,
                    format!("The field '{}' contains invalid information", field),
                ),
            },
            EngineError::InvalidAction { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_ACTION", message),
            },
            EngineError::ProviderUnavailable { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("PROVIDER_UNAVAILABLE", message),
            },
            EngineError::DataLoadFailure { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("DATA_LOAD_ERROR", "Rate data error", message),
            },
            EngineError::ConfigParseError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration parse error", message),
            },
        }
    }
}
