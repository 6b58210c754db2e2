//! Error types for the dependency graph.

use thiserror::Error;

/// All errors raised while ordering automatons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Kahn's algorithm could not visit every node.
    #[error("cyclic dependency between automatons: only {visited} of {total} could be ordered")]
    CyclicDependency { visited: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphError::CyclicDependency {
            visited: 1,
            total: 3,
        };
        assert_eq!(
            err.to_string(),
            "cyclic dependency between automatons: only 1 of 3 could be ordered"
        );
    }
}
