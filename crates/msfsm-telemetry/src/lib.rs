//! # MSFSM Telemetry
//!
//! Logging and metrics for the compile-and-deploy pipeline.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an `EnvFilter`, human-readable
//!   or JSON output on stderr
//! - **Metrics**: Prometheus counters and histograms in a process-wide
//!   registry, rendered in text exposition format on demand
//!
//! ## Usage
//!
//! ```rust,ignore
//! use msfsm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MSFSM_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `MSFSM_JSON_LOGS` | `false` | Emit JSON log lines |
//! | `MSFSM_CONSOLE_OUTPUT` | `true` | Write logs at all |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, COMPILATIONS, COMPILE_DURATION,
    CONTRACTS_GENERATED, DEPLOYMENTS, DEPLOY_DURATION, EXECUTIONS, PIPELINE_RUNS,
};

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Keeps telemetry active for the lifetime of the process.
pub struct TelemetryGuard {
    _private: (),
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!("Telemetry shut down");
    }
}

/// Registers metrics and installs the global log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    register_metrics()?;
    init_logging(config)?;
    Ok(TelemetryGuard { _private: () })
}

/// Starts a histogram timer; the observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
