//! Configuration and seed data loading.
//!
//! This module provides [`SettingsLoader`] for the engine settings file and
//! the [`RateSource`] seam through which rate tables are (re)loaded.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::models::{CountryRateEntry, Provider, ProviderAdjustmentSpec};

use super::types::EngineSettings;

/// Loads [`EngineSettings`] from YAML.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads settings from `path`, or defaults when `path` is `None`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use eor_quote_engine::config::SettingsLoader;
    ///
    /// let settings = SettingsLoader::load(Some("./config/engine.yaml"))?;
    /// println!("Contract delay: {:?}", settings.contract_ready_delay());
    /// # Ok::<(), eor_quote_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> EngineResult<EngineSettings> {
        match path {
            Some(path) => load_yaml(path.as_ref(), |path, message| {
                EngineError::ConfigParseError { path, message }
            }),
            None => Ok(EngineSettings::default()),
        }
    }
}

/// Reads and parses a YAML (or JSON) file, mapping failures with `on_error`.
fn load_yaml<T, F>(path: &Path, on_error: F) -> EngineResult<T>
where
    T: serde::de::DeserializeOwned,
    F: Fn(String, String) -> EngineError,
{
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path)
        .map_err(|e| on_error(path_str.clone(), format!("unable to read file: {}", e)))?;

    serde_yaml::from_str(&content).map_err(|e| on_error(path_str, e.to_string()))
}

/// Where provider rate data comes from.
///
/// The engine owns derivation; implementors only fetch the raw data.
pub trait RateSource: Send + Sync {
    /// Loads the primary provider's rate table.
    fn load_primary(&self) -> EngineResult<Vec<CountryRateEntry>>;

    /// Loads the adjustment spec for a secondary provider.
    ///
    /// `Ok(None)` means the provider has no spec and derives unchanged.
    fn load_adjustment(&self, provider: Provider) -> EngineResult<Option<ProviderAdjustmentSpec>>;
}

/// Reads seed files from a directory.
///
/// # Directory Structure
///
/// ```text
/// data/providers/
/// ├── deel.yaml    # Primary rate table (list of country entries)
/// ├── remote.yaml  # Adjustment spec or full table
/// └── oyster.yaml  # Adjustment spec or full table
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryRateSource {
    root: PathBuf,
}

impl DirectoryRateSource {
    /// Creates a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn provider_path(&self, provider: Provider) -> PathBuf {
        self.root.join(format!("{}.yaml", provider.as_str()))
    }
}

fn data_load_failure(path: String, message: String) -> EngineError {
    EngineError::DataLoadFailure { path, message }
}

impl RateSource for DirectoryRateSource {
    fn load_primary(&self) -> EngineResult<Vec<CountryRateEntry>> {
        load_yaml(&self.provider_path(Provider::PRIMARY), data_load_failure)
    }

    fn load_adjustment(&self, provider: Provider) -> EngineResult<Option<ProviderAdjustmentSpec>> {
        let path = self.provider_path(provider);
        if !path.exists() {
            return Ok(None);
        }
        load_yaml(&path, data_load_failure).map(Some)
    }
}

/// In-memory rate data, for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    primary: Vec<CountryRateEntry>,
    adjustments: HashMap<Provider, ProviderAdjustmentSpec>,
}

impl StaticRateSource {
    /// Creates a source with the given primary table and no adjustments.
    pub fn new(primary: Vec<CountryRateEntry>) -> Self {
        Self {
            primary,
            adjustments: HashMap::new(),
        }
    }

    /// Adds an adjustment spec for a provider.
    pub fn with_adjustment(mut self, provider: Provider, spec: ProviderAdjustmentSpec) -> Self {
        self.adjustments.insert(provider, spec);
        self
    }
}

impl RateSource for StaticRateSource {
    fn load_primary(&self) -> EngineResult<Vec<CountryRateEntry>> {
        Ok(self.primary.clone())
    }

    fn load_adjustment(&self, provider: Provider) -> EngineResult<Option<ProviderAdjustmentSpec>> {
        Ok(self.adjustments.get(&provider).cloned())
    }
}
