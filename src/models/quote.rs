//! Comparison quote records and their review lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditTrace, CostBreakdown, Provider, ValidationResult};
use crate::error::EngineError;

/// A comparison request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteQuery {
    /// Country code.
    pub country_code: String,
    /// Requested annual salary.
    pub salary: Decimal,
    /// Requested currency. Informational; no conversion is performed.
    pub currency: String,
    /// Role title.
    pub role: String,
}

/// Review state of a quote record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// Awaiting manual review.
    Pending,
    /// Approved, automatically or by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
}

impl QuoteStatus {
    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "pending",
            QuoteStatus::Approved => "approved",
            QuoteStatus::Rejected => "rejected",
        }
    }

    /// Initial status for a freshly validated quote.
    pub fn initial(requires_manual_review: bool) -> Self {
        if requires_manual_review {
            QuoteStatus::Pending
        } else {
            QuoteStatus::Approved
        }
    }
}

impl FromStr for QuoteStatus {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(QuoteStatus::Pending),
            "approved" => Ok(QuoteStatus::Approved),
            "rejected" => Ok(QuoteStatus::Rejected),
            other => Err(EngineError::InvalidInput {
                field: "status".to_string(),
                message: format!("unknown quote status '{}'", other),
            }),
        }
    }
}

/// A reviewer decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Approve the quote.
    Approve,
    /// Reject the quote.
    Reject,
}

impl ReviewAction {
    /// Status a record moves to under this action.
    pub fn target_status(&self) -> QuoteStatus {
        match self {
            ReviewAction::Approve => QuoteStatus::Approved,
            ReviewAction::Reject => QuoteStatus::Rejected,
        }
    }
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewAction::Approve => f.write_str("approve"),
            ReviewAction::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for ReviewAction {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(ReviewAction::Approve),
            "reject" => Ok(ReviewAction::Reject),
            _ => Err(EngineError::InvalidAction {
                action: value.to_string(),
            }),
        }
    }
}

/// One applied review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// The applied action.
    pub action: ReviewAction,
    /// Status before the action.
    pub previous_status: QuoteStatus,
    /// When the review happened.
    pub reviewed_at: DateTime<Utc>,
}

/// Which reconciliation branch picked the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Spread within tolerance: highest TCE.
    HighestWithinTolerance,
    /// Spread above tolerance: lowest TCE.
    LowestAboveTolerance,
}

/// One provider's costs inside a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderCosts {
    /// Provider.
    pub provider: Provider,
    /// Currency of the figures.
    pub currency_code: String,
    /// The provider's breakdown.
    pub costs: CostBreakdown,
}

/// A persisted provider comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Unique quote id.
    pub id: Uuid,
    /// When the comparison ran.
    pub created_at: DateTime<Utc>,
    /// Original request.
    pub query: QuoteQuery,
    /// Per-provider breakdowns, in provider order.
    pub provider_costs: Vec<ProviderCosts>,
    /// The recommended provider.
    pub chosen_provider: Provider,
    /// Spread between highest and lowest TCE, percent, 2 dp.
    pub spread_percent: Decimal,
    /// Reconciliation branch that applied.
    pub selection_rule: SelectionRule,
    /// Whether manual review is needed.
    pub requires_manual_review: bool,
    /// Review status.
    pub status: QuoteStatus,
    /// Validation of the chosen quote.
    pub validation: ValidationResult,
    /// Decisions made while reconciling and validating.
    pub audit_trace: AuditTrace,
    /// Reviews applied so far, oldest first.
    #[serde(default)]
    pub review_history: Vec<ReviewEvent>,
}

impl QuoteRecord {
    /// Costs of the chosen provider.
    pub fn chosen_costs(&self) -> Option<&CostBreakdown> {
        self.provider_costs
            .iter()
            .find(|pc| pc.provider == self.chosen_provider)
            .map(|pc| &pc.costs)
    }

    /// Applies a review. Terminal states are overwritten.
    pub fn apply_review(&mut self, action: ReviewAction) {
        self.review_history.push(ReviewEvent {
            action,
            previous_status: self.status,
            reviewed_at: Utc::now(),
        });
        self.status = action.target_status();
    }
}
