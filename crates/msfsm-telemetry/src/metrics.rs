//! Prometheus metrics for the MSFSM pipeline.
//!
//! Naming convention: `msfsm_<stage>_<metric>_<unit>`.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `msfsm_codegen_contracts_generated_total` | Counter | |
//! | `msfsm_compiler_compilations_total` | CounterVec | `outcome` |
//! | `msfsm_compiler_duration_seconds` | Histogram | |
//! | `msfsm_chain_deployments_total` | CounterVec | `outcome` |
//! | `msfsm_chain_deploy_duration_seconds` | Histogram | |
//! | `msfsm_chain_executions_total` | CounterVec | `kind`, `outcome` |
//! | `msfsm_pipeline_runs_total` | CounterVec | `outcome` |

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CODE GENERATION
    // =========================================================================

    pub static ref CONTRACTS_GENERATED: Counter = Counter::new(
        "msfsm_codegen_contracts_generated_total",
        "Total number of contract sources generated"
    ).expect("metric creation failed");

    // =========================================================================
    // COMPILER
    // =========================================================================

    pub static ref COMPILATIONS: CounterVec = CounterVec::new(
        Opts::new("msfsm_compiler_compilations_total", "Compiler invocations by outcome"),
        &["outcome"]  // success / failure
    ).expect("metric creation failed");

    pub static ref COMPILE_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "msfsm_compiler_duration_seconds",
            "Time spent in the Solidity compiler"
        ).buckets(exponential_buckets(0.01, 2.0, 12).expect("valid buckets"))
    ).expect("metric creation failed");

    // =========================================================================
    // CHAIN
    // =========================================================================

    pub static ref DEPLOYMENTS: CounterVec = CounterVec::new(
        Opts::new("msfsm_chain_deployments_total", "Contract deployments by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Submission to confirmed receipt.
    pub static ref DEPLOY_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "msfsm_chain_deploy_duration_seconds",
            "Time from deployment submission to receipt"
        ).buckets(exponential_buckets(0.05, 2.0, 12).expect("valid buckets"))
    ).expect("metric creation failed");

    pub static ref EXECUTIONS: CounterVec = CounterVec::new(
        Opts::new("msfsm_chain_executions_total", "Function executions by kind and outcome"),
        &["kind", "outcome"]  // kind: transaction / call
    ).expect("metric creation failed");

    // =========================================================================
    // PIPELINE
    // =========================================================================

    pub static ref PIPELINE_RUNS: CounterVec = CounterVec::new(
        Opts::new("msfsm_pipeline_runs_total", "Orchestration runs by outcome"),
        &["outcome"]
    ).expect("metric creation failed");
}

/// Registers every metric with [`REGISTRY`]. Calling it twice is harmless.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CONTRACTS_GENERATED.clone()),
        Box::new(COMPILATIONS.clone()),
        Box::new(COMPILE_DURATION.clone()),
        Box::new(DEPLOYMENTS.clone()),
        Box::new(DEPLOY_DURATION.clone()),
        Box::new(EXECUTIONS.clone()),
        Box::new(PIPELINE_RUNS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encodes all registered metrics in Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}
