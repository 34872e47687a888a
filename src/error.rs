//! Error types for the EOR Quote Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while quoting, comparing and
//! reviewing provider quotes.

use thiserror::Error;

/// The main error type for the EOR Quote Engine.
///
/// All engine operations return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use eor_quote_engine::error::EngineError;
///
/// let error = EngineError::CountryNotFound {
///     provider: "deel".to_string(),
///     country: "ZZ".to_string(),
/// };
/// assert_eq!(error.to_string(), "Country 'ZZ' not supported by provider 'deel'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No rate entry exists for the requested country at this provider.
    #[error("Country '{country}' not supported by provider '{provider}'")]
    CountryNotFound {
        /// The provider that was asked.
        provider: String,
        /// The requested country code.
        country: String,
    },

    /// A provider's quote could not be produced.
    #[error("Provider '{provider}' unavailable: {reason}")]
    ProviderUnavailable {
        /// The provider that failed.
        provider: String,
        /// Why the provider could not answer.
        reason: String,
    },

    /// A request field was malformed.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// No quote or contract exists with the given id.
    #[error("{kind} not found: {id}")]
    RecordNotFound {
        /// The kind of record ("Quote" or "Contract").
        kind: String,
        /// The id that was looked up.
        id: String,
    },

    /// A review action other than approve/reject was supplied.
    #[error("Invalid review action '{action}': expected 'approve' or 'reject'")]
    InvalidAction {
        /// The rejected action.
        action: String,
    },

    /// Rate table source data was missing or corrupt.
    #[error("Failed to load rate data from '{path}': {message}")]
    DataLoadFailure {
        /// The source that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The engine settings file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a missing quote record.
    pub fn quote_not_found(id: impl ToString) -> Self {
        Self::RecordNotFound {
            kind: "Quote".to_string(),
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing contract.
    pub fn contract_not_found(id: impl ToString) -> Self {
        Self::RecordNotFound {
            kind: "Contract".to_string(),
            id: id.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
