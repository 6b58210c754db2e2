//! # Entities
//!
//! Deployment outputs handed back to callers.

use crate::abi::AbiEntry;
use crate::errors::DeploymentResultError;
use crate::ordered_map::OrderedMap;
use crate::value_objects::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contract deployed for one automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub address: Address,
    pub abi: Vec<AbiEntry>,
}

/// Automaton name → deployed contract, in deployment order.
///
/// Entries are write-once. A dependent automaton can only be generated after
/// its dependencies appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentResult {
    contracts: OrderedMap<DeployedContract>,
}

impl DeploymentResult {
    /// Empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the deployment of `automaton`.
    pub fn record(
        &mut self,
        automaton: impl Into<String>,
        contract: DeployedContract,
    ) -> Result<(), DeploymentResultError> {
        let automaton = automaton.into();
        self.contracts
            .insert(automaton.clone(), contract)
            .map_err(|_| DeploymentResultError::AlreadyRecorded(automaton))
    }

    /// Deployed contract of `automaton`, if recorded.
    #[must_use]
    pub fn get(&self, automaton: &str) -> Option<&DeployedContract> {
        self.contracts.get(automaton)
    }

    /// Like [`get`](Self::get) but reports a missing entry as an error.
    pub fn require(&self, automaton: &str) -> Result<&DeployedContract, DeploymentResultError> {
        self.get(automaton)
            .ok_or_else(|| DeploymentResultError::NotFound(automaton.to_string()))
    }

    /// Address of `automaton`, if recorded.
    #[must_use]
    pub fn address_of(&self, automaton: &str) -> Option<Address> {
        self.get(automaton).map(|c| c.address)
    }

    /// Number of deployed automatons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// True if nothing was deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// `(automaton, contract)` pairs in deployment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeployedContract)> {
        self.contracts.iter()
    }
}

/// Persisted output of one deployment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Specification name.
    pub name: String,
    pub chain_id: u64,
    pub deployed_at: DateTime<Utc>,
    pub contracts: DeploymentResult,
}

impl DeploymentRecord {
    /// Stamps a finished run with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>, chain_id: u64, contracts: DeploymentResult) -> Self {
        Self {
            name: name.into(),
            chain_id,
            deployed_at: Utc::now(),
            contracts,
        }
    }
}
