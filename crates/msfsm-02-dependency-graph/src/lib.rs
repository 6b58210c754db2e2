//! # MSFSM-02: Dependency Graph Subsystem
//!
//! Orders automatons for generation and deployment.
//!
//! An edge `u → v` means automaton `u` has a guard condition that queries
//! automaton `v`, so `v` must be deployed first: its address is baked into
//! the source of `u`.
//!
//! ## Architecture
//!
//! - **Domain**: `DependencyGraph` (adjacency over automaton indices),
//!   `DepthGroups`, `DeploymentPlan`
//! - **Algorithms**: graph construction, Kahn's cycle check, memoized depth
//!   assignment
//!
//! ## Depths
//!
//! ```text
//! depth(u) = 1                               if u has no dependencies
//! depth(u) = 1 + max(depth(v) for u → v)     otherwise
//! ```
//!
//! Depths start at 1. Processing groups in ascending depth guarantees every
//! dependency is deployed before its dependents.

pub mod algorithms;
pub mod domain;

pub use algorithms::dependency_builder::build_dependency_graph;
pub use algorithms::depth::{assign_depths, group_by_depth};
pub use algorithms::kahns::{ensure_acyclic, is_cyclic, kahns_visit_count};
pub use domain::entities::{DependencyGraph, DepthGroups, DeploymentPlan, PlanStep};
pub use domain::errors::GraphError;
