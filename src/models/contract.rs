//! Asynchronous quote contracts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CostBreakdown, Provider};

/// Lifecycle of an asynchronous quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    /// Waiting for the simulated provider to finish.
    Pending,
    /// Costs are available.
    Ready,
}

/// The request a contract was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInput {
    /// Country code.
    pub country_code: String,
    /// Requested annual salary.
    pub salary: Decimal,
    /// Requested role title, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// An asynchronous provider quote.
///
/// Created `Pending`; moves to `Ready` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Unique contract id.
    pub id: Uuid,
    /// The provider generating the quote.
    pub provider: Provider,
    /// Original request.
    pub input: ContractInput,
    /// Current status.
    pub status: ContractStatus,
    /// Currency of the eventual costs.
    pub currency_code: String,
    /// Costs, present once `Ready`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costs: Option<CostBreakdown>,
    /// When the contract was created.
    pub created_at: DateTime<Utc>,
    /// When the contract became ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_at: Option<DateTime<Utc>>,
}

impl Contract {
    /// Creates a new pending contract.
    pub fn pending(provider: Provider, input: ContractInput, currency_code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            input,
            status: ContractStatus::Pending,
            currency_code,
            costs: None,
            created_at: Utc::now(),
            ready_at: None,
        }
    }

    /// Returns true once costs are available.
    pub fn is_ready(&self) -> bool {
        self.status == ContractStatus::Ready
    }
}
