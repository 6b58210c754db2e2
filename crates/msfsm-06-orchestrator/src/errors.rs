//! Pipeline errors.

use msfsm_01_specification::SpecificationError;
use msfsm_02_dependency_graph::GraphError;
use msfsm_03_code_generation::CodegenError;
use msfsm_04_solidity_compiler::CompilerError;
use msfsm_05_chain_bridge::{DeploymentError, ExecutionError};
use shared_types::{DeploymentResult, DeploymentResultError};
use std::fmt;
use thiserror::Error;

/// Any stage failure, plus lookups of deployed automatons.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Specification(#[from] SpecificationError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("compilation of `{automaton}` failed: {source}")]
    Compilation {
        automaton: String,
        #[source]
        source: CompilerError,
    },

    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Record(#[from] DeploymentResultError),

    /// No deployed contract recorded for the automaton.
    #[error("automaton `{automaton}` not found in deployment of `{contract}`")]
    AutomatonNotFound { contract: String, automaton: String },

    /// Generated source could not be saved.
    #[error("cannot write {path}: {reason}")]
    SourceOutput { path: String, reason: String },
}

impl OrchestratorError {
    /// Pipeline stage that raised the error, used as a metric label.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Specification(_) => "specification",
            Self::Graph(_) => "graph",
            Self::Codegen(_) | Self::SourceOutput { .. } => "codegen",
            Self::Compilation { .. } => "compile",
            Self::Deployment(_) | Self::Record(_) => "deploy",
            Self::Execution(_) | Self::AutomatonNotFound { .. } => "execute",
        }
    }
}

/// Failed run: the error and every contract deployed before it.
#[derive(Debug)]
pub struct PipelineFailure {
    pub error: OrchestratorError,
    pub partial: DeploymentResult,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} contract(s) deployed before the failure)",
            self.error,
            self.partial.len()
        )
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
