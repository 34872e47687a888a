//! In-memory store for comparison quote records.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{QuoteRecord, QuoteStatus, ReviewAction};

/// Owns every [`QuoteRecord`] created by comparisons.
#[derive(Debug, Default)]
pub struct QuoteStore {
    records: RwLock<HashMap<Uuid, QuoteRecord>>,
}

impl QuoteStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new record.
    pub fn insert(&self, record: QuoteRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.id, record);
    }

    /// Returns a copy of a record.
    pub fn get(&self, id: Uuid) -> EngineResult<QuoteRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::quote_not_found(id))
    }

    /// Lists records, newest first, optionally filtered by status.
    pub fn list(&self, status: Option<QuoteStatus>) -> Vec<QuoteRecord> {
        let mut records: Vec<QuoteRecord> = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|record| status.is_none_or(|s| record.status == s))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Applies a review action to a record and returns the updated copy.
    ///
    /// Reviewing an approved or rejected record overwrites its status.
    pub fn review(&self, id: Uuid, action: ReviewAction) -> EngineResult<QuoteRecord> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let record = records
            .get_mut(&id)
            .ok_or_else(|| EngineError::quote_not_found(id))?;
        record.apply_review(action);
        Ok(record.clone())
    }
}
