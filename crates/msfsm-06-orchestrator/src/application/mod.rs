//! Orchestrator services.

pub mod execution;
pub mod pipeline;
