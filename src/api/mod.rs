//! HTTP API module for the EOR Quote Engine.
//!
//! This module provides the REST API endpoints for single-provider quotes,
//! async contracts, provider comparisons and the manual review queue.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CompareRequest, ListQuotesParams, QuoteRequest, ReviewRequest};
pub use response::{
    ApiError, ApiErrorResponse, ContractResponse, CountriesResponse, HealthResponse,
    QuoteListResponse,
};
pub use state::AppState;
