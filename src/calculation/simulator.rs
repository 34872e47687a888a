//! Provider quote simulation.
//!
//! Real EOR providers quote slightly different numbers for the same hire.
//! This module emulates that: every provider jitters its cost parameters,
//! and secondary providers also randomize salaries within the role band.
//! The primary provider always quotes the caller's salary.

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, CostBreakdown, CountryRateEntry, Provider, ProviderQuoteBody, QuoteContext,
    RoleBand,
};
use crate::store::RateTable;

use super::cost::{MAX_SALARY, compute_costs};

/// Width of the salary randomization window, as a fraction of the band.
const BAND_SPREAD: Decimal = Decimal::from_parts(2, 0, 0, false, 1);

/// One provider's simulated answer, before response shaping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedQuote {
    /// The provider that quoted.
    pub provider: Provider,
    /// Country code, upper-cased.
    pub country_code: String,
    /// Currency of the figures.
    pub currency_code: String,
    /// Salary the caller asked for.
    pub requested_salary: Decimal,
    /// Whether the salary was drawn from the role band.
    pub salary_randomized: bool,
    /// The canonical breakdown.
    pub costs: CostBreakdown,
}

impl SimulatedQuote {
    /// Country and currency of this quote.
    pub fn context(&self) -> QuoteContext {
        QuoteContext {
            country_code: self.country_code.clone(),
            currency_code: self.currency_code.clone(),
        }
    }

    /// The breakdown in this provider's response shape.
    pub fn shaped(&self) -> ProviderQuoteBody {
        ProviderQuoteBody::project(self.provider, &self.context(), &self.costs)
    }

    /// Records this quote as an audit step.
    pub fn audit_step(&self, step_number: u32) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "provider_quote".to_string(),
            rule_name: "Provider Quote Simulation".to_string(),
            input: serde_json::json!({
                "provider": self.provider.as_str(),
                "country_code": self.country_code,
                "requested_salary": self.requested_salary.to_string(),
            }),
            output: serde_json::json!({
                "salary": self.costs.salary.to_string(),
                "tce": self.costs.tce.to_string(),
                "currency_code": self.currency_code,
                "salary_randomized": self.salary_randomized,
            }),
            reasoning: format!(
                "{} quoted TCE {} {} on salary {}{}",
                self.provider,
                self.costs.tce,
                self.currency_code,
                self.costs.salary,
                if self.salary_randomized {
                    " drawn from the role band"
                } else {
                    ""
                }
            ),
        }
    }
}

/// Draws a salary near the band midpoint.
///
/// The result is `midpoint + u × (max − min) × 0.2` for `u` uniform in
/// `[-0.5, 0.5]`, rounded to a whole amount.
pub fn randomized_salary<R: Rng + ?Sized>(band: &RoleBand, rng: &mut R) -> Decimal {
    let u = Decimal::new(rng.gen_range(-5_000..=5_000), 4);
    let width = band.max_salary - band.min_salary;
    (band.midpoint() + u * width * BAND_SPREAD)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns a copy of `entry` with each cost parameter independently moved
/// by up to `jitter_percent` percent, floored at zero.
pub fn jitter_entry<R: Rng + ?Sized>(
    entry: &CountryRateEntry,
    jitter_percent: Decimal,
    rng: &mut R,
) -> CountryRateEntry {
    let mut jitter = |value: Decimal| {
        let u = Decimal::new(rng.gen_range(-10_000..=10_000), 4);
        let factor = Decimal::ONE + u * jitter_percent / Decimal::ONE_HUNDRED;
        (value * factor).max(Decimal::ZERO)
    };

    CountryRateEntry {
        employer_tax_rate: jitter(entry.employer_tax_rate),
        benefits_percent: jitter(entry.benefits_percent),
        fixed_fees: jitter(entry.fixed_fees),
        ..entry.clone()
    }
}

/// Simulates one provider's quote.
///
/// # Arguments
///
/// * `provider` - The quoting provider
/// * `table` - That provider's rate table
/// * `country_code` - Country to hire in (case-insensitive)
/// * `salary` - Requested annual salary
/// * `role` - Optional role title, matched against the country's role bands
/// * `settings` - Engine settings (termination multiplier, jitter)
/// * `rng` - Random source
///
/// # Returns
///
/// The simulated quote, `CountryNotFound` if the provider does not cover
/// the country, or `InvalidInput` if the salary exceeds [`MAX_SALARY`].
pub fn simulate_quote<R: Rng + ?Sized>(
    provider: Provider,
    table: &RateTable,
    country_code: &str,
    salary: Decimal,
    role: Option<&str>,
    settings: &EngineSettings,
    rng: &mut R,
) -> EngineResult<SimulatedQuote> {
    if salary > MAX_SALARY {
        return Err(EngineError::InvalidInput {
            field: "salary".to_string(),
            message: format!("must not exceed {}", MAX_SALARY),
        });
    }

    let entry = table
        .get(country_code)
        .ok_or_else(|| EngineError::CountryNotFound {
            provider: provider.to_string(),
            country: country_code.to_string(),
        })?;

    let band = if provider.is_primary() {
        None
    } else {
        role.and_then(|title| entry.role_band(title))
    };
    let quoted_salary = band.map_or(salary, |band| randomized_salary(band, rng));
    let salary_randomized = band.is_some();
    let effective_entry = jitter_entry(entry, settings.rate_jitter_percent, rng);

    let costs = compute_costs(
        quoted_salary,
        &effective_entry,
        settings.termination_multiplier,
    );

    debug!(
        provider = %provider,
        country = %entry.country_code,
        salary = %costs.salary,
        tce = %costs.tce,
        salary_randomized,
        "Simulated provider quote"
    );

    Ok(SimulatedQuote {
        provider,
        country_code: entry.country_code.clone(),
        currency_code: entry.currency_code.clone(),
        requested_salary: salary,
        salary_randomized,
        costs,
    })
}
