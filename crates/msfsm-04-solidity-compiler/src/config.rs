//! Configuration for the Solidity compiler adapter.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Compiler configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// `solc` executable, looked up on `PATH` when relative.
    pub solc_path: PathBuf,
    /// Expected compiler version, e.g. `0.8.0`.
    pub version: String,
    /// Enable the optimizer.
    pub optimize: bool,
    /// Optimizer runs, used when `optimize` is set.
    pub optimizer_runs: u32,
    /// Target EVM version; compiler default when unset.
    pub evm_version: Option<String>,
    /// Kill the compiler after this many seconds.
    pub timeout_secs: u64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            solc_path: PathBuf::from("solc"),
            version: "0.8.0".to_string(),
            optimize: false,
            optimizer_runs: 200,
            evm_version: None,
            timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CompilerConfig::default();
        assert_eq!(config.solc_path, PathBuf::from("solc"));
        assert_eq!(config.version, "0.8.0");
        assert!(!config.optimize);
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CompilerConfig = serde_json::from_str(r#"{"version": "0.8.19"}"#).unwrap();
        assert_eq!(config.version, "0.8.19");
        assert_eq!(config.optimizer_runs, 200);
    }
}
