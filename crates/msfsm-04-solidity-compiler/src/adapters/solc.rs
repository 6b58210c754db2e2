//! `solc` subprocess adapter.
//!
//! The standard-JSON request is written to the child's stdin and the
//! response read from stdout. The child is killed if it outlives the
//! configured timeout or if the future is dropped.

use crate::config::CompilerConfig;
use crate::domain::entities::CompiledContract;
use crate::domain::standard_json::{build_input, parse_output};
use crate::domain::version::{normalize, parse_version};
use crate::errors::CompilerError;
use crate::ports::ContractCompiler;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Compiler adapter backed by a local `solc` binary.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
    config: CompilerConfig,
}

impl SolcCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Adapter configuration.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Checks that `solc --version` reports the configured version.
    #[instrument(skip(self), fields(solc = %self.config.solc_path.display()))]
    pub async fn ensure_version(&self) -> Result<String, CompilerError> {
        let stdout = self.run(&["--version"], None).await?;
        let actual = parse_version(&stdout)
            .ok_or_else(|| CompilerError::InvalidOutput(format!("unrecognised version output: {stdout}")))?;
        let expected = normalize(&self.config.version);
        if actual != expected {
            return Err(CompilerError::VersionMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        info!(version = %actual, "solc version verified");
        Ok(actual)
    }

    /// Runs solc with `args`, feeding `stdin` if given, and returns stdout.
    async fn run(&self, args: &[&str], stdin: Option<&[u8]>) -> Result<String, CompilerError> {
        let path = self.config.solc_path.display().to_string();
        let mut child = Command::new(&self.config.solc_path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CompilerError::Spawn {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut pipe = child
            .stdin
            .take()
            .ok_or_else(|| CompilerError::Io("failed to capture stdin".to_string()))?;
        if let Some(input) = stdin {
            pipe.write_all(input)
                .await
                .map_err(|e| CompilerError::Io(format!("failed to write stdin: {e}")))?;
        }
        drop(pipe);

        let secs = self.config.timeout_secs;
        let output = tokio::time::timeout(Duration::from_secs(secs), child.wait_with_output())
            .await
            .map_err(|_| CompilerError::Timeout { secs })?
            .map_err(|e| CompilerError::Io(e.to_string()))?;

        if !output.status.success() {
            return Err(CompilerError::ProcessFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        String::from_utf8(output.stdout)
            .map_err(|e| CompilerError::InvalidOutput(format!("stdout is not UTF-8: {e}")))
    }
}

#[async_trait]
impl ContractCompiler for SolcCompiler {
    #[instrument(skip(self, source), fields(bytes = source.len()))]
    async fn compile(&self, name: &str, source: &str) -> Result<CompiledContract, CompilerError> {
        let input = build_input(name, source, &self.config).to_string();
        let stdout = self.run(&["--standard-json"], Some(input.as_bytes())).await?;
        let (contract, warnings) = parse_output(name, &stdout)?;
        for warning in &warnings {
            warn!(contract = %name, "{}", warning.render());
        }
        debug!(
            contract = %name,
            abi_entries = contract.abi.len(),
            bytecode_len = contract.bytecode.len(),
            "Contract compiled"
        );
        Ok(contract)
    }
}
