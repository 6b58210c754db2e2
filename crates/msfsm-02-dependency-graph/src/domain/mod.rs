//! Domain layer for the dependency graph.

pub mod entities;
pub mod errors;
