//! Country rate table models.
//!
//! These types describe each provider's employer cost parameters per
//! country, and the adjustment specs used to derive secondary providers
//! from the primary provider's table.

use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A salary band for a role within a country.
///
/// Bands drive salary randomization and form hints. They are not used to
/// validate the salary a caller supplies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBand {
    /// The role title (e.g., "Software Engineer").
    pub title: String,
    /// Lower bound of the annual salary band.
    pub min_salary: Decimal,
    /// Upper bound of the annual salary band.
    pub max_salary: Decimal,
    /// Seniority levels the band covers.
    #[serde(default)]
    pub seniority_levels: BTreeSet<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl RoleBand {
    /// Returns the midpoint of the band.
    pub fn midpoint(&self) -> Decimal {
        (self.min_salary + self.max_salary) / Decimal::TWO
    }

    /// Returns true if `title` names this band, ignoring case and padding.
    pub fn matches(&self, title: &str) -> bool {
        self.title.trim().eq_ignore_ascii_case(title.trim())
    }
}

/// Employer cost parameters for one country at one provider.
///
/// # Example
///
/// ```
/// use eor_quote_engine::models::CountryRateEntry;
/// use rust_decimal::Decimal;
///
/// let entry = CountryRateEntry {
///     country_code: "DE".to_string(),
///     employer_tax_rate: Decimal::new(21, 2),
///     benefits_percent: Decimal::new(5, 2),
///     fixed_fees: Decimal::new(7200, 0),
///     probation_months: 6,
///     currency_code: "EUR".to_string(),
///     currency_symbol: "€".to_string(),
///     notes: String::new(),
///     role_bands: vec![],
/// };
/// assert!(entry.role_band("Engineer").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRateEntry {
    /// ISO-3166 alpha-2 code, stored upper-case.
    pub country_code: String,
    /// Employer payroll tax as a fraction of salary.
    pub employer_tax_rate: Decimal,
    /// Mandatory benefits as a fraction of salary.
    pub benefits_percent: Decimal,
    /// Flat annual provider fees.
    pub fixed_fees: Decimal,
    /// Statutory probation period in months.
    pub probation_months: u32,
    /// ISO-4217 currency code.
    pub currency_code: String,
    /// Display symbol for the currency.
    #[serde(default)]
    pub currency_symbol: String,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Role bands in display order.
    #[serde(default)]
    pub role_bands: Vec<RoleBand>,
}

impl CountryRateEntry {
    /// Finds the band for a role title, case-insensitively.
    pub fn role_band(&self, title: &str) -> Option<&RoleBand> {
        self.role_bands.iter().find(|band| band.matches(title))
    }
}

/// Per-country override inside a derivation spec.
///
/// Missing deltas default to zero and a missing multiplier to one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CountryAdjustment {
    /// Added to the base employer tax rate.
    pub employer_tax_rate_delta: Decimal,
    /// Added to the base benefits percent.
    pub benefits_percent_delta: Decimal,
    /// Added to the base fixed fees.
    pub fixed_fees_delta: Decimal,
    /// Multiplies role band salaries, on top of the global multiplier.
    pub salary_multiplier: Option<Decimal>,
}

/// Declarative derivation of a provider table from the primary table.
///
/// Unknown keys are rejected, so a misspelled delta fails the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DerivationSpec {
    /// Added to every country's employer tax rate.
    pub employer_tax_rate_delta: Decimal,
    /// Added to every country's benefits percent.
    pub benefits_percent_delta: Decimal,
    /// Added to every country's fixed fees.
    pub fixed_fees_delta: Decimal,
    /// Multiplies every role band salary.
    pub salary_multiplier: Decimal,
    /// Per-country overrides keyed by country code.
    pub overrides: HashMap<String, CountryAdjustment>,
}

impl Default for DerivationSpec {
    fn default() -> Self {
        Self {
            employer_tax_rate_delta: Decimal::ZERO,
            benefits_percent_delta: Decimal::ZERO,
            fixed_fees_delta: Decimal::ZERO,
            salary_multiplier: Decimal::ONE,
            overrides: HashMap::new(),
        }
    }
}

/// How a secondary provider's table is produced.
///
/// Seed files hold either a full list of entries or a derivation object,
/// so the two shapes are told apart structurally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderAdjustmentSpec {
    /// Use this table verbatim.
    FullTable(Vec<CountryRateEntry>),
    /// Derive from the primary table.
    Derived(DerivationSpec),
}

impl Default for ProviderAdjustmentSpec {
    fn default() -> Self {
        ProviderAdjustmentSpec::Derived(DerivationSpec::default())
    }
}
