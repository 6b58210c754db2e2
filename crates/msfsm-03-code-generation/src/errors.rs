//! Error types for code generation.

use thiserror::Error;

/// All errors raised while generating a contract.
///
/// Condition namespaces are checked when the specification is loaded, so an
/// unknown condition type never reaches the generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// Index is outside the specification.
    #[error("no automaton with index {0}")]
    UnknownAutomaton(usize),

    /// A dependency has no recorded address yet.
    #[error("automaton `{automaton}` depends on `{dependency}`, which is not deployed")]
    MissingDependency {
        automaton: String,
        dependency: String,
    },

    /// Condition names a package that is not loaded.
    #[error("package `{package}` is not loaded")]
    UnresolvedPackage { package: String },

    /// Condition names a function its package does not define.
    #[error("package `{package}` has no function `{function}`")]
    UnresolvedFunction { package: String, function: String },
}
