//! Graph algorithms.
//!
//! - Dependency building: specification → `DependencyGraph`
//! - Kahn's algorithm: cycle detection
//! - Depth assignment: memoized depth-first traversal

pub mod dependency_builder;
pub mod depth;
pub mod kahns;
