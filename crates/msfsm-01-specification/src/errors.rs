//! Error types for specification and package loading.

use std::path::PathBuf;
use thiserror::Error;

/// All errors raised while loading or resolving input documents.
#[derive(Debug, Error)]
pub enum SpecificationError {
    /// Document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed document: missing key, wrong type or broken invariant.
    #[error("invalid {document}: {reason}")]
    SchemaValidation { document: String, reason: String },

    /// Condition namespace is neither `package` nor `automata`.
    #[error("unknown condition type `{namespace}` in condition `{condition}`")]
    UnknownConditionType { condition: String, namespace: String },

    /// Condition or required package names something that does not exist.
    #[error("unresolved reference `{reference}` in {context}")]
    UnresolvedReference { reference: String, context: String },
}

impl SpecificationError {
    pub(crate) fn schema(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaValidation {
            document: document.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unresolved(reference: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
            context: context.into(),
        }
    }
}
