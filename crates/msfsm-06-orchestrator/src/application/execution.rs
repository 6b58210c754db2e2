//! Function execution against a recorded deployment.

use crate::errors::OrchestratorError;
use chrono::{DateTime, Utc};
use msfsm_05_chain_bridge::ContractExecutor;
use msfsm_telemetry::EXECUTIONS;
use serde::Serialize;
use serde_json::Value;
use shared_types::{DeploymentRecord, DeploymentResult};
use tracing::{info, instrument, warn};

/// Outcome of one execution request.
///
/// `result` is `true` for a confirmed transaction, or the decoded return
/// value of a read-only call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionResponse {
    pub contract: String,
    pub automaton: String,
    pub function: String,
    pub args: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub result: Value,
}

pub struct ExecutionService<E> {
    executor: E,
}

impl<E: ContractExecutor> ExecutionService<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Invokes `function` on the contract deployed for `automaton`.
    #[instrument(skip(self, deployed, args))]
    pub async fn execute(
        &self,
        contract: &str,
        deployed: &DeploymentResult,
        automaton: &str,
        function: &str,
        args: &[String],
    ) -> Result<ExecutionResponse, OrchestratorError> {
        let target = deployed
            .get(automaton)
            .ok_or_else(|| OrchestratorError::AutomatonNotFound {
                contract: contract.to_string(),
                automaton: automaton.to_string(),
            })?;

        let outcome = match self.executor.execute(target, function, args).await {
            Ok(outcome) => outcome,
            Err(e) => {
                EXECUTIONS.with_label_values(&["unknown", "failure"]).inc();
                warn!(error = %e, "Execution failed");
                return Err(e.into());
            }
        };
        let kind = if outcome.is_transaction() {
            "transaction"
        } else {
            "call"
        };
        EXECUTIONS.with_label_values(&[kind, "success"]).inc();
        info!(kind, address = %target.address, "Execution complete");

        Ok(ExecutionResponse {
            contract: contract.to_string(),
            automaton: automaton.to_string(),
            function: function.to_string(),
            args: args.to_vec(),
            timestamp: Utc::now(),
            result: outcome.result(),
        })
    }

    /// [`Self::execute`] against a persisted deployment record.
    pub async fn execute_record(
        &self,
        record: &DeploymentRecord,
        automaton: &str,
        function: &str,
        args: &[String],
    ) -> Result<ExecutionResponse, OrchestratorError> {
        self.execute(&record.name, &record.contracts, automaton, function, args)
            .await
    }
}
