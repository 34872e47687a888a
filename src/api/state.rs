//! Application state for the EOR Quote Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::QuoteEngine;

/// Shared application state.
///
/// Wraps the engine, which owns every store and the loaded rate tables.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<QuoteEngine>,
}

impl AppState {
    /// Creates a new application state around `engine`.
    pub fn new(engine: QuoteEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &QuoteEngine {
        &self.engine
    }

    /// Returns a shared handle to the engine, for work moved off the
    /// request task.
    pub fn shared_engine(&self) -> Arc<QuoteEngine> {
        Arc::clone(&self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone_and_shareable() {
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
