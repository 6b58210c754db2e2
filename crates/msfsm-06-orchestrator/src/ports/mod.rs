//! Outbound ports of the orchestrator.
//!
//! Compilation and deployment go through `ContractCompiler` and
//! `ContractDeployer`, owned by their subsystems.

use crate::errors::OrchestratorError;
use msfsm_03_code_generation::GeneratedContract;

/// Receives every generated source before it is compiled.
pub trait SourceSink: Send + Sync {
    fn save(&self, contract: &GeneratedContract) -> Result<(), OrchestratorError>;
}
