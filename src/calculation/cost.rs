//! Total cost of employment calculation.
//!
//! This module maps a salary and a country rate entry to a
//! [`CostBreakdown`]. It is pure and deterministic.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{CostBreakdown, CountryRateEntry};

/// Default fraction of salary reserved for termination, before scaling
/// by the probation period.
pub const DEFAULT_TERMINATION_MULTIPLIER: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Largest annual salary accepted for quoting.
///
/// Keeps every product in [`compute_costs`] well inside `Decimal`'s range.
pub const MAX_SALARY: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Rounds a monetary amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the employer cost breakdown for an annual salary.
///
/// Each field is computed from unrounded inputs and rounded independently,
/// so `tce` may differ from the sum of the rounded components by at most a
/// few cents.
///
/// # Formula
///
/// ```text
/// employer_tax             = salary × employer_tax_rate
/// benefits_cost            = salary × benefits_percent
/// termination_amortization = salary × termination_multiplier × probation_months / 12
/// tce                      = salary + employer_tax + benefits_cost + fixed_fees
///                            + termination_amortization
/// ```
///
/// Salaries of zero or below are accepted and produce proportionally
/// small figures.
///
/// # Examples
///
/// ```
/// use eor_quote_engine::calculation::{compute_costs, DEFAULT_TERMINATION_MULTIPLIER};
/// use eor_quote_engine::models::CountryRateEntry;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let entry = CountryRateEntry {
///     country_code: "US".to_string(),
///     employer_tax_rate: Decimal::from_str("0.0765").unwrap(),
///     benefits_percent: Decimal::from_str("0.20").unwrap(),
///     fixed_fees: Decimal::from(6000),
///     probation_months: 3,
///     currency_code: "USD".to_string(),
///     currency_symbol: "$".to_string(),
///     notes: String::new(),
///     role_bands: vec![],
/// };
///
/// let costs = compute_costs(Decimal::from(100_000), &entry, DEFAULT_TERMINATION_MULTIPLIER);
/// assert_eq!(costs.employer_tax, Decimal::from_str("7650.00").unwrap());
/// assert_eq!(costs.termination_amortization, Decimal::from_str("12500.00").unwrap());
/// assert_eq!(costs.tce, Decimal::from_str("146150.00").unwrap());
/// ```
pub fn compute_costs(
    salary: Decimal,
    entry: &CountryRateEntry,
    termination_multiplier: Decimal,
) -> CostBreakdown {
    let employer_tax = salary * entry.employer_tax_rate;
    let benefits_cost = salary * entry.benefits_percent;
    let termination_amortization = salary * termination_multiplier
        * Decimal::from(entry.probation_months)
        / Decimal::from(12);
    let tce = salary + employer_tax + benefits_cost + entry.fixed_fees + termination_amortization;

    CostBreakdown {
        salary: round_money(salary),
        employer_tax: round_money(employer_tax),
        benefits_cost: round_money(benefits_cost),
        fixed_fees: round_money(entry.fixed_fees),
        termination_amortization: round_money(termination_amortization),
        tce: round_money(tce),
    }
}
