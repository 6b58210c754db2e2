//! Cross-crate flows.

pub mod execution;
pub mod pipeline;
pub mod specification;
