//! Request types for the EOR Quote Engine API.
//!
//! Bodies are validated here, at the edge, before reaching the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::MAX_SALARY;
use crate::error::{EngineError, EngineResult};
use crate::models::{Provider, QuoteQuery, QuoteStatus};

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_country(country: &str) -> EngineResult<String> {
    let country = country.trim();
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("country", "must be a two-letter country code"));
    }
    Ok(country.to_ascii_uppercase())
}

fn validate_salary(salary: Decimal) -> EngineResult<Decimal> {
    if salary <= Decimal::ZERO {
        return Err(invalid("salary", "must be greater than zero"));
    }
    if salary > MAX_SALARY {
        return Err(invalid("salary", format!("must not exceed {}", MAX_SALARY)));
    }
    Ok(salary)
}

/// Parses a `:provider` path segment.
pub fn parse_provider(value: &str) -> EngineResult<Provider> {
    value.parse()
}

/// Parses an `:id` path segment.
pub fn parse_id(value: &str) -> EngineResult<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|e| invalid("id", format!("not a valid UUID: {}", e)))
}

/// Request body for `POST /providers/:provider/quotes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Two-letter country code.
    pub country: String,
    /// Annual salary, greater than zero and at most [`MAX_SALARY`].
    pub salary: Decimal,
    /// Optional role title.
    #[serde(default)]
    pub role: Option<String>,
    /// Return a pending contract instead of immediate costs.
    #[serde(default, rename = "async")]
    pub async_mode: bool,
}

impl QuoteRequest {
    /// Validates the body, returning the normalized country code.
    pub fn validate(&self) -> EngineResult<String> {
        validate_salary(self.salary)?;
        if self.role.as_deref().is_some_and(|role| role.trim().is_empty()) {
            return Err(invalid("role", "must not be empty when provided"));
        }
        validate_country(&self.country)
    }
}

/// Request body for `POST /quotes/compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    /// Two-letter country code.
    pub country: String,
    /// Annual salary, greater than zero and at most [`MAX_SALARY`].
    pub salary: Decimal,
    /// Three-letter currency code. Informational only.
    pub currency: String,
    /// Role title, used for service type classification.
    pub role: String,
}

impl CompareRequest {
    /// Validates the body and converts it into an engine query.
    pub fn into_query(self) -> EngineResult<QuoteQuery> {
        let country_code = validate_country(&self.country)?;
        let salary = validate_salary(self.salary)?;

        let currency = self.currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("currency", "must be a three-letter currency code"));
        }
        let role = self.role.trim();
        if role.is_empty() {
            return Err(invalid("role", "must not be empty"));
        }

        Ok(QuoteQuery {
            country_code,
            salary,
            currency: currency.to_ascii_uppercase(),
            role: role.to_string(),
        })
    }
}

/// Request body for `POST /quotes/:id/review`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// `approve` or `reject`, any case.
    pub action: String,
}

/// Query string for `GET /quotes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuotesParams {
    /// Optional status filter.
    #[serde(default)]
    pub status: Option<String>,
}

impl ListQuotesParams {
    /// Parses the status filter.
    pub fn status(&self) -> EngineResult<Option<QuoteStatus>> {
        self.status.as_deref().map(str::parse::<QuoteStatus>).transpose()
    }
}
