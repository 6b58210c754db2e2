//! Runtime configuration.
//!
//! Loaded from a TOML file, then overridden from the environment.
//!
//! ```toml
//! [compiler]
//! solc_path = "solc"
//! version = "0.8.0"
//!
//! [network]
//! rpc_url = "http://localhost:8545"
//! chain_id = 31337
//! private_key = "0x..."
//!
//! [packages]
//! dir = "packages"
//!
//! [telemetry]
//! log_level = "info"
//! json_logs = false
//! ```
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `MSFSM_SOLC_PATH` | `compiler.solc_path` |
//! | `MSFSM_SOLC_VERSION` | `compiler.version` |
//! | `MSFSM_RPC_URL` | `network.rpc_url` |
//! | `MSFSM_CHAIN_ID` | `network.chain_id` |
//! | `MSFSM_PUBLIC_KEY` | `network.public_key` |
//! | `MSFSM_PRIVATE_KEY` | `network.private_key` |
//! | `MSFSM_PACKAGES_DIR` | `packages.dir` |

use msfsm_03_code_generation::GeneratorConfig;
use msfsm_04_solidity_compiler::CompilerConfig;
use msfsm_05_chain_bridge::ChainConfig;
use msfsm_telemetry::TelemetryConfig;
use serde::Deserialize;
use shared_types::Address;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zeroize::Zeroizing;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "msfsm.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0} not found")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("invalid value for {var}: `{value}`")]
    InvalidEnv { var: &'static str, value: String },
}

/// Where package documents are read from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    pub dir: PathBuf,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("packages"),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub compiler: CompilerConfig,
    pub network: ChainConfig,
    pub packages: PackagesConfig,
    pub telemetry: TelemetryConfig,
}

impl RuntimeConfig {
    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `None`, then applies
    /// environment overrides.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::from_file(Path::new(DEFAULT_CONFIG_FILE)) {
                Err(ConfigError::NotFound(_)) => Self::default(),
                other => other?,
            },
        };
        let mut config = config.with_env_overrides(|var| std::env::var(var).ok())?;
        config.telemetry = config.telemetry.with_env_overrides();
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        Self::parse(&content).map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parses TOML text; absent sections and keys take their defaults.
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Applies `MSFSM_*` overrides read through `lookup`.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = lookup("MSFSM_SOLC_PATH") {
            self.compiler.solc_path = PathBuf::from(path);
        }
        if let Some(version) = lookup("MSFSM_SOLC_VERSION") {
            self.compiler.version = version;
        }
        if let Some(url) = lookup("MSFSM_RPC_URL") {
            self.network.rpc_url = url;
        }
        if let Some(value) = lookup("MSFSM_CHAIN_ID") {
            self.network.chain_id = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "MSFSM_CHAIN_ID",
                value,
            })?;
        }
        if let Some(key) = lookup("MSFSM_PRIVATE_KEY") {
            self.network.private_key = Zeroizing::new(key);
        }
        if let Some(value) = lookup("MSFSM_PUBLIC_KEY") {
            let address: Address = value.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "MSFSM_PUBLIC_KEY",
                value,
            })?;
            self.network.public_key = Some(address);
        }
        if let Some(dir) = lookup("MSFSM_PACKAGES_DIR") {
            self.packages.dir = PathBuf::from(dir);
        }
        Ok(self)
    }

    /// Generated sources target the configured compiler version.
    #[must_use]
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            solidity_version: self.compiler.version.clone(),
            ..GeneratorConfig::default()
        }
    }
}
