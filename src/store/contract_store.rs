//! In-memory store for asynchronous provider contracts.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Contract, ContractStatus, CostBreakdown};

/// Outcome of a ready transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyTransition {
    /// The contract moved from pending to ready.
    Applied,
    /// The contract was already ready; nothing changed.
    AlreadyReady,
    /// No contract with that id exists.
    Missing,
}

/// One provider's contracts, keyed by id.
///
/// Each mutation happens under a single write lock, so a reader sees a
/// contract either pending or fully ready.
#[derive(Debug, Default)]
pub struct ContractStore {
    contracts: RwLock<HashMap<Uuid, Contract>>,
}

impl ContractStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new contract.
    pub fn insert(&self, contract: Contract) {
        self.contracts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(contract.id, contract);
    }

    /// Returns a copy of a contract.
    pub fn get(&self, id: Uuid) -> EngineResult<Contract> {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::contract_not_found(id))
    }

    /// Moves a pending contract to ready with its costs.
    ///
    /// Only a pending contract transitions; a ready one is left untouched.
    pub fn mark_ready(&self, id: Uuid, costs: CostBreakdown) -> ReadyTransition {
        let mut contracts = self
            .contracts
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match contracts.get_mut(&id) {
            None => ReadyTransition::Missing,
            Some(contract) if contract.status == ContractStatus::Ready => {
                ReadyTransition::AlreadyReady
            }
            Some(contract) => {
                contract.status = ContractStatus::Ready;
                contract.costs = Some(costs);
                contract.ready_at = Some(Utc::now());
                ReadyTransition::Applied
            }
        }
    }

    /// Number of stored contracts.
    pub fn len(&self) -> usize {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no contracts are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
