//! Calculation logic for the EOR Quote Engine.
//!
//! This module contains the pure calculation functions: canonical cost
//! breakdowns, secondary provider rate derivation, quote simulation with
//! per-provider variance, spread reconciliation across providers, and
//! margin and risk validation of the chosen quote.

mod comparison;
mod cost;
mod derivation;
mod simulator;
mod validation;

pub use comparison::{
    DEFAULT_SPREAD_TOLERANCE_PERCENT, Selection, select_provider, spread_percent,
};
pub use cost::{DEFAULT_TERMINATION_MULTIPLIER, MAX_SALARY, compute_costs, round_money};
pub use derivation::{FALLBACK_COUNTRY, build_primary_table, derive_provider_table, fallback_table};
pub use simulator::{SimulatedQuote, jitter_entry, randomized_salary, simulate_quote};
pub use validation::{
    acid_test, margin_percent, risk_score, validate, validation_audit_step,
};
