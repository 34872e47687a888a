//! Provider rate tables and their atomically swapped store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{CountryRateEntry, Provider};

/// One provider's rate entries, keyed by upper-cased country code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    entries: BTreeMap<String, CountryRateEntry>,
}

impl RateTable {
    /// Indexes entries by upper-cased country code.
    ///
    /// Later entries for the same code replace earlier ones.
    pub fn from_entries(entries: Vec<CountryRateEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.country_code = entry.country_code.trim().to_ascii_uppercase();
                (entry.country_code.clone(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Looks up a country, case-insensitively.
    pub fn get(&self, country_code: &str) -> Option<&CountryRateEntry> {
        self.entries
            .get(&country_code.trim().to_ascii_uppercase())
    }

    /// Entries ordered by country code.
    pub fn entries(&self) -> impl Iterator<Item = &CountryRateEntry> {
        self.entries.values()
    }

    /// Country codes in order.
    pub fn country_codes(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no countries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A complete, immutable set of provider tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderRateTables {
    tables: HashMap<Provider, RateTable>,
    degraded: bool,
}

impl ProviderRateTables {
    /// Builds a table set from derived tables.
    pub fn new(tables: HashMap<Provider, RateTable>) -> Self {
        Self {
            tables,
            degraded: false,
        }
    }

    /// Builds a table set where every provider shares `table`, marked
    /// as degraded.
    pub fn degraded(table: RateTable) -> Self {
        Self {
            tables: Provider::ALL
                .into_iter()
                .map(|provider| (provider, table.clone()))
                .collect(),
            degraded: true,
        }
    }

    /// The table for a provider, if loaded.
    pub fn table(&self, provider: Provider) -> Option<&RateTable> {
        self.tables.get(&provider)
    }

    /// True when the fallback table is in use.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Holds the current [`ProviderRateTables`] snapshot.
///
/// Readers take an `Arc` snapshot and never observe a partially replaced
/// set; reloads swap the whole snapshot.
#[derive(Debug, Default)]
pub struct RateTableStore {
    current: RwLock<Arc<ProviderRateTables>>,
}

impl RateTableStore {
    /// Creates a store holding `tables`.
    pub fn new(tables: ProviderRateTables) -> Self {
        Self {
            current: RwLock::new(Arc::new(tables)),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Arc<ProviderRateTables> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Atomically replaces the snapshot.
    pub fn replace(&self, tables: ProviderRateTables) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(tables);
    }
}
