//! Compilation results.

use serde::{Deserialize, Serialize};
use shared_types::{AbiEntry, Bytes};

/// ABI and creation bytecode of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledContract {
    pub name: String,
    pub abi: Vec<AbiEntry>,
    pub bytecode: Bytes,
}

/// Diagnostic severity as reported by solc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// One compiler diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub message: String,
    #[serde(rename = "formattedMessage", default)]
    pub formatted_message: Option<String>,
}

impl Diagnostic {
    /// Human-readable message, preferring solc's formatted variant.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.formatted_message {
            Some(formatted) => formatted.trim_end().to_string(),
            None => format!("{}: {}", self.kind, self.message),
        }
    }
}
