//! # MSFSM-06: Orchestrator
//!
//! Drives a specification through the whole pipeline:
//!
//! ```text
//! Specification + PackageSet
//!     │
//!     ├─ PackageSet::resolve            (references)
//!     ├─ DeploymentPlan                 (dependency graph, depths)
//!     └─ for each step, ascending depth then index:
//!          generate → [save source] → compile → deploy → record
//! ```
//!
//! The `DeploymentResult` is threaded through the loop: a contract is
//! generated only after every automaton it depends on has a recorded
//! address, because those addresses are literals in its source.
//!
//! ## Failure Model
//!
//! The first failing stage aborts the run. Contracts deployed before the
//! failure stay deployed and are returned in [`PipelineFailure::partial`].
//! Nothing is retried or rolled back.

pub mod adapters;
pub mod application;
pub mod errors;
pub mod ports;

pub use adapters::source_dir::SourceDirectory;
pub use application::execution::{ExecutionResponse, ExecutionService};
pub use application::pipeline::{generate_predicted, Orchestrator};
pub use errors::{OrchestratorError, PipelineFailure};
pub use ports::SourceSink;
