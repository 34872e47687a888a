//! Validation result models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Engagement category inferred from a role title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Standard employment through the EOR.
    FullTimeEmployee,
    /// Contractor or freelancer engagement.
    Contractor,
    /// Executive hire.
    Executive,
}

impl ServiceType {
    /// Classifies a role title by keyword.
    ///
    /// Executive keywords are checked before contractor keywords; anything
    /// else is a full-time employee.
    ///
    /// # Example
    ///
    /// ```
    /// use eor_quote_engine::models::ServiceType;
    ///
    /// assert_eq!(ServiceType::from_role("VP of Engineering"), ServiceType::Executive);
    /// assert_eq!(ServiceType::from_role("Freelance Designer"), ServiceType::Contractor);
    /// assert_eq!(ServiceType::from_role("Senior Software Engineer"), ServiceType::FullTimeEmployee);
    /// ```
    pub fn from_role(role: &str) -> Self {
        const EXECUTIVE: [&str; 4] = ["executive", "ceo", "cto", "vp"];
        const CONTRACTOR: [&str; 3] = ["contractor", "freelance", "consultant"];

        let role = role.to_lowercase();
        if EXECUTIVE.iter().any(|kw| role.contains(kw)) {
            ServiceType::Executive
        } else if CONTRACTOR.iter().any(|kw| role.contains(kw)) {
            ServiceType::Contractor
        } else {
            ServiceType::FullTimeEmployee
        }
    }

    /// Returns the wire identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::FullTimeEmployee => "full-time-employee",
            ServiceType::Contractor => "contractor",
            ServiceType::Executive => "executive",
        }
    }

    /// Multiplier applied to the accumulated risk score.
    pub fn risk_multiplier(&self) -> Decimal {
        match self {
            ServiceType::FullTimeEmployee => Decimal::ONE,
            ServiceType::Contractor => Decimal::new(8, 1),
            ServiceType::Executive => Decimal::new(12, 1),
        }
    }

    /// Contractors skip the cash-flow acid test.
    pub fn requires_acid_test(&self) -> bool {
        !matches!(self, ServiceType::Contractor)
    }
}

/// Outcome of the margin, risk and viability checks on a chosen quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no errors were raised.
    pub is_valid: bool,
    /// Non-blocking findings.
    pub warnings: Vec<String>,
    /// Blocking findings.
    pub errors: Vec<String>,
    /// Risk score in `0..=100`.
    pub risk_score: u32,
    /// Margin as a percentage of TCE, 2 dp.
    pub margin_percent: Decimal,
    /// Whether the cash-flow viability check passed.
    pub acid_test_passed: bool,
    /// Whether a human must approve the quote.
    pub requires_manual_review: bool,
    /// Service type the checks ran under.
    pub service_type: ServiceType,
}
