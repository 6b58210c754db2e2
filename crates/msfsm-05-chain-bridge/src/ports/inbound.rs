//! Inbound ports: what the orchestrator calls.

use crate::errors::{DeploymentError, ExecutionError};
use async_trait::async_trait;
use serde_json::Value;
use shared_types::{AbiEntry, Address, Bytes, DeployedContract, Hash};

/// Deploys compiled contracts from one account.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Account that signs deployments.
    fn sender(&self) -> Address;

    /// Nonce the next deployment will use.
    async fn next_nonce(&self) -> Result<u64, DeploymentError>;

    /// Deploys `bytecode` and blocks until the creation receipt is available.
    async fn deploy(
        &self,
        name: &str,
        abi: &[AbiEntry],
        bytecode: &Bytes,
    ) -> Result<Address, DeploymentError>;
}

/// Result of invoking a contract function.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    /// State-changing transaction, confirmed with a successful receipt.
    Transaction { tx_hash: Hash },
    /// Read-only call with its decoded return value.
    Call { value: Value },
}

impl ExecutionOutcome {
    /// `true` for confirmed transactions, the decoded value for calls.
    #[must_use]
    pub fn result(&self) -> Value {
        match self {
            Self::Transaction { .. } => Value::Bool(true),
            Self::Call { value } => value.clone(),
        }
    }

    #[must_use]
    pub fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction { .. })
    }
}

/// Invokes functions of deployed contracts.
///
/// Functions with no declared outputs are sent as transactions; all
/// others are executed with `eth_call`.
#[async_trait]
pub trait ContractExecutor: Send + Sync {
    async fn execute(
        &self,
        contract: &DeployedContract,
        function: &str,
        args: &[String],
    ) -> Result<ExecutionOutcome, ExecutionError>;
}
