//! Provider rate table derivation.
//!
//! Secondary providers are modelled as adjustments to the primary
//! provider's rate table. This module validates the primary table and
//! applies an adjustment spec to produce a complete table for a provider.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    CountryAdjustment, CountryRateEntry, DerivationSpec, ProviderAdjustmentSpec, RoleBand,
};
use crate::store::RateTable;

/// Country used when no usable rate data could be loaded.
pub const FALLBACK_COUNTRY: &str = "US";

/// Builds the minimal single-country table used when seed data is
/// missing or corrupt.
pub fn fallback_table() -> RateTable {
    RateTable::from_entries(vec![CountryRateEntry {
        country_code: FALLBACK_COUNTRY.to_string(),
        employer_tax_rate: Decimal::new(765, 4),
        benefits_percent: Decimal::new(20, 2),
        fixed_fees: Decimal::from(6000),
        probation_months: 3,
        currency_code: "USD".to_string(),
        currency_symbol: "$".to_string(),
        notes: "Fallback rates: seed data unavailable".to_string(),
        role_bands: vec![],
    }])
}

/// Validates the primary table and indexes it by upper-cased country code.
///
/// Fails with `DataLoadFailure` if the table is empty or any entry is
/// malformed (blank country code, negative rate or fee, or a role band
/// whose minimum exceeds its maximum).
pub fn build_primary_table(entries: Vec<CountryRateEntry>) -> EngineResult<RateTable> {
    if entries.is_empty() {
        return Err(malformed("primary rate table is empty"));
    }

    for entry in &entries {
        validate_entry(entry)?;
    }

    Ok(RateTable::from_entries(entries))
}

fn malformed(message: impl Into<String>) -> EngineError {
    EngineError::DataLoadFailure {
        path: "primary rate table".to_string(),
        message: message.into(),
    }
}

fn validate_entry(entry: &CountryRateEntry) -> EngineResult<()> {
    let code = entry.country_code.trim();
    if code.is_empty() {
        return Err(malformed("entry with blank country code"));
    }
    if entry.employer_tax_rate < Decimal::ZERO
        || entry.benefits_percent < Decimal::ZERO
        || entry.fixed_fees < Decimal::ZERO
    {
        return Err(malformed(format!("negative cost parameter for {}", code)));
    }
    if let Some(band) = entry
        .role_bands
        .iter()
        .find(|band| band.min_salary > band.max_salary)
    {
        return Err(malformed(format!(
            "role band '{}' in {} has min_salary above max_salary",
            band.title, code
        )));
    }
    Ok(())
}

/// Produces a provider's rate table from the primary table.
///
/// A full-table spec is used verbatim. A derivation spec is applied to
/// every primary country, so the result covers exactly the primary's
/// countries. The primary table is not modified.
///
/// # Examples
///
/// ```
/// use eor_quote_engine::calculation::{build_primary_table, derive_provider_table};
/// use eor_quote_engine::models::{CountryRateEntry, DerivationSpec, ProviderAdjustmentSpec};
/// use rust_decimal::Decimal;
///
/// let primary = build_primary_table(vec![CountryRateEntry {
///     country_code: "DE".to_string(),
///     employer_tax_rate: Decimal::new(21, 2),
///     benefits_percent: Decimal::new(4, 2),
///     fixed_fees: Decimal::from(7200),
///     probation_months: 6,
///     currency_code: "EUR".to_string(),
///     currency_symbol: "€".to_string(),
///     notes: String::new(),
///     role_bands: vec![],
/// }])
/// .unwrap();
///
/// let spec = ProviderAdjustmentSpec::Derived(DerivationSpec {
///     employer_tax_rate_delta: Decimal::new(-50, 2),
///     ..DerivationSpec::default()
/// });
/// let derived = derive_provider_table(&primary, &spec).unwrap();
/// assert_eq!(derived.get("de").unwrap().employer_tax_rate, Decimal::ZERO);
/// ```
pub fn derive_provider_table(
    primary: &RateTable,
    spec: &ProviderAdjustmentSpec,
) -> EngineResult<RateTable> {
    if primary.is_empty() {
        return Err(malformed("primary rate table is empty"));
    }

    match spec {
        ProviderAdjustmentSpec::FullTable(entries) => Ok(RateTable::from_entries(entries.clone())),
        ProviderAdjustmentSpec::Derived(derivation) => Ok(RateTable::from_entries(
            primary
                .entries()
                .map(|base| derive_entry(base, derivation))
                .collect(),
        )),
    }
}

fn derive_entry(base: &CountryRateEntry, spec: &DerivationSpec) -> CountryRateEntry {
    let no_override = CountryAdjustment::default();
    let local = spec
        .overrides
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(&base.country_code))
        .map(|(_, adjustment)| adjustment)
        .unwrap_or(&no_override);

    let floored = |value: Decimal| value.max(Decimal::ZERO);
    let salary_multiplier =
        spec.salary_multiplier * local.salary_multiplier.unwrap_or(Decimal::ONE);

    CountryRateEntry {
        employer_tax_rate: floored(
            base.employer_tax_rate + spec.employer_tax_rate_delta + local.employer_tax_rate_delta,
        ),
        benefits_percent: floored(
            base.benefits_percent + spec.benefits_percent_delta + local.benefits_percent_delta,
        ),
        fixed_fees: floored(base.fixed_fees + spec.fixed_fees_delta + local.fixed_fees_delta),
        role_bands: base
            .role_bands
            .iter()
            .map(|band| scale_band(band, salary_multiplier))
            .collect(),
        ..base.clone()
    }
}

fn scale_band(band: &RoleBand, multiplier: Decimal) -> RoleBand {
    let scale = |value: Decimal| {
        (value * multiplier).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    };
    RoleBand {
        min_salary: scale(band.min_salary),
        max_salary: scale(band.max_salary),
        ..band.clone()
    }
}
