//! In-memory stores owned by the engine.
//!
//! Rate tables are replaced wholesale on reload; quote and contract
//! records are keyed maps guarded per store.

mod contract_store;
mod quote_store;
mod rate_store;

pub use contract_store::{ContractStore, ReadyTransition};
pub use quote_store::QuoteStore;
pub use rate_store::{ProviderRateTables, RateTable, RateTableStore};
