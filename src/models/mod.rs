//! Core data models for the EOR Quote Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod contract;
mod cost_breakdown;
mod provider;
mod quote;
mod rates;
mod validation;

pub use audit::{AuditStep, AuditTrace};
pub use contract::{Contract, ContractInput, ContractStatus};
pub use cost_breakdown::{
    CostBreakdown, DeelEmployerCosts, DeelQuote, OysterLine, OysterQuote, OysterQuoteBody,
    ProviderQuoteBody, QuoteContext, RemoteQuote,
};
pub use provider::Provider;
pub use quote::{
    ProviderCosts, QuoteQuery, QuoteRecord, QuoteStatus, ReviewAction, ReviewEvent,
    SelectionRule,
};
pub use rates::{
    CountryAdjustment, CountryRateEntry, DerivationSpec, ProviderAdjustmentSpec, RoleBand,
};
pub use validation::{ServiceType, ValidationResult};
