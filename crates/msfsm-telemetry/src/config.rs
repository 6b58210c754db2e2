//! Telemetry configuration.

use serde::Deserialize;
use std::env;

/// Logging configuration, loadable from the `[telemetry]` section of the
/// runtime configuration and overridable from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to log lines.
    pub service_name: String,

    /// `EnvFilter` directive (`info`, `msfsm_06_orchestrator=debug`, ...).
    pub log_level: String,

    /// Emit JSON instead of human-readable lines.
    pub json_logs: bool,

    /// Write logs at all.
    pub console_output: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "msfsm".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            console_output: true,
        }
    }
}

fn flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1"
}

impl TelemetryConfig {
    /// Defaults overridden from the environment.
    ///
    /// - `MSFSM_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
    /// - `MSFSM_JSON_LOGS`: JSON output (default: false)
    /// - `MSFSM_CONSOLE_OUTPUT`: console output (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Applies environment overrides on top of `self`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = env::var("MSFSM_LOG_LEVEL").or_else(|_| env::var("RUST_LOG")) {
            self.log_level = level;
        }
        if let Ok(value) = env::var("MSFSM_JSON_LOGS") {
            self.json_logs = flag(&value);
        }
        if let Ok(value) = env::var("MSFSM_CONSOLE_OUTPUT") {
            self.console_output = value.to_lowercase() != "false" && value != "0";
        }
        self
    }
}
