//! Configuration loading and management for the EOR Quote Engine.
//!
//! This module provides the engine settings (cost multipliers, delays and
//! validation thresholds) and the sources provider rate data is loaded from.
//!
//! # Example
//!
//! ```no_run
//! use eor_quote_engine::config::{DirectoryRateSource, RateSource, SettingsLoader};
//!
//! let settings = SettingsLoader::load(Some("./config/engine.yaml")).unwrap();
//! let source = DirectoryRateSource::new("./data/providers");
//! println!("{} countries", source.load_primary().unwrap().len());
//! ```

mod loader;
mod types;

pub use loader::{DirectoryRateSource, RateSource, SettingsLoader, StaticRateSource};
pub use types::{EngineSettings, ValidationThresholds};
