//! Engine settings.
//!
//! Every threshold the engine applies is configured here rather than
//! hardcoded at call sites. All fields have defaults so a partial YAML file
//! (or none at all) yields a working configuration.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ServiceType;

/// Thresholds used by the validation and risk engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationThresholds {
    /// TCE above which a quote is flagged as excessive.
    pub max_tce: Decimal,
    /// Risk score above which manual review is required.
    pub risk_score_threshold: u32,
    /// Minimum `(salary × 1.2) / (tce / 12)` for the acid test.
    pub cash_flow_ratio_threshold: Decimal,
    /// Assumed internal costs as a fraction of TCE.
    pub internal_cost_ratio: Decimal,
    /// Minimum margin percent when a service type has none configured.
    pub default_min_margin: Decimal,
    /// Margin percent below which a warning is raised.
    pub target_margin: Decimal,
    /// Margin percent at or below which a risk warning is raised.
    pub margin_risk_threshold: Decimal,
    /// Minimum margin percent per service type.
    pub service_min_margins: HashMap<ServiceType, Decimal>,
    /// Country codes adding to the risk score.
    pub high_risk_countries: BTreeSet<String>,
    /// Country codes reducing the risk score.
    pub low_risk_countries: BTreeSet<String>,
}

impl ValidationThresholds {
    /// Minimum margin for a service type, falling back to the global default.
    pub fn min_margin_for(&self, service_type: ServiceType) -> Decimal {
        self.service_min_margins
            .get(&service_type)
            .copied()
            .unwrap_or(self.default_min_margin)
    }
}

fn country_set(codes: &[&str]) -> BTreeSet<String> {
    codes.iter().map(|c| c.to_string()).collect()
}

impl Default for ValidationThresholds {
    fn default() -> Self {
        let mut service_min_margins = HashMap::new();
        service_min_margins.insert(ServiceType::FullTimeEmployee, Decimal::from(15));
        service_min_margins.insert(ServiceType::Contractor, Decimal::from(10));
        service_min_margins.insert(ServiceType::Executive, Decimal::from(20));

        Self {
            max_tce: Decimal::from(500_000),
            risk_score_threshold: 75,
            cash_flow_ratio_threshold: Decimal::ONE,
            internal_cost_ratio: Decimal::new(8, 1),
            default_min_margin: Decimal::from(15),
            target_margin: Decimal::from(18),
            margin_risk_threshold: Decimal::from(10),
            service_min_margins,
            high_risk_countries: country_set(&["AR", "BD", "EG", "NG", "PK", "VE"]),
            low_risk_countries: country_set(&["AU", "CA", "DE", "GB", "NL", "SE", "US"]),
        }
    }
}

/// Process-wide engine settings.
///
/// # Example
///
/// ```
/// use eor_quote_engine::config::EngineSettings;
/// use rust_decimal::Decimal;
///
/// let settings: EngineSettings = serde_yaml::from_str("contract_ready_delay_ms: 50").unwrap();
/// assert_eq!(settings.contract_ready_delay_ms, 50);
/// assert_eq!(settings.spread_tolerance_percent, Decimal::from(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Fraction of salary reserved for termination, scaled by probation.
    pub termination_multiplier: Decimal,
    /// Delay before an async contract becomes ready.
    pub contract_ready_delay_ms: u64,
    /// Maximum rate jitter applied to every provider, percent.
    pub rate_jitter_percent: Decimal,
    /// Spread at or below which the highest TCE wins, percent.
    pub spread_tolerance_percent: Decimal,
    /// Seed for reproducible simulations. Entropy-seeded when unset.
    pub rng_seed: Option<u64>,
    /// Validation thresholds.
    pub validation: ValidationThresholds,
}

impl EngineSettings {
    /// The async contract delay as a [`Duration`].
    pub fn contract_ready_delay(&self) -> Duration {
        Duration::from_millis(self.contract_ready_delay_ms)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            termination_multiplier: Decimal::new(5, 1),
            contract_ready_delay_ms: 2_000,
            rate_jitter_percent: Decimal::from(3),
            spread_tolerance_percent: Decimal::from(4),
            rng_seed: None,
            validation: ValidationThresholds::default(),
        }
    }
}
