//! # Packages
//!
//! A package is a library of Solidity snippets: functions (keyed by name),
//! struct declarations and state variable declarations. Snippets are spliced
//! into generated contracts verbatim.

use super::condition::is_segment;
use crate::errors::SpecificationError;
use serde::{Deserialize, Serialize};
use shared_types::OrderedMap;
use std::path::Path;

/// A function snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFunction {
    /// Solidity source of the function.
    pub code: String,
    /// Emitted into every automaton of a specification requiring the package.
    pub default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named struct or state variable declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub code: String,
}

/// A package document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub functions: OrderedMap<PackageFunction>,
    #[serde(default)]
    pub structs: Vec<Declaration>,
    #[serde(default)]
    pub variables: Vec<Declaration>,
}

impl Package {
    /// Loads and validates a package from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SpecificationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SpecificationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a package from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SpecificationError> {
        let package: Self = serde_json::from_str(text)
            .map_err(|e| SpecificationError::schema("package", e.to_string()))?;
        package.validate()?;
        Ok(package)
    }

    /// Parses and validates a package from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpecificationError> {
        let package: Self = serde_json::from_value(value)
            .map_err(|e| SpecificationError::schema("package", e.to_string()))?;
        package.validate()?;
        Ok(package)
    }

    /// Re-serializes the package to its document form.
    pub fn to_value(&self) -> Result<serde_json::Value, SpecificationError> {
        serde_json::to_value(self)
            .map_err(|e| SpecificationError::schema(format!("package `{}`", self.id), e.to_string()))
    }

    /// Checks invariants serde cannot express.
    ///
    /// The id and function names appear as segments of condition strings,
    /// so they must fit the condition grammar and must not contain the
    /// separator.
    pub fn validate(&self) -> Result<(), SpecificationError> {
        let document = || format!("package `{}`", self.id);
        if !is_segment(&self.id) || self.id.contains("__") {
            return Err(SpecificationError::schema(
                document(),
                "id must match [A-Za-z0-9_]+ and must not contain `__`",
            ));
        }
        for name in self.functions.keys() {
            if !is_segment(name) || name.contains("__") {
                return Err(SpecificationError::schema(
                    document(),
                    format!("invalid function name `{name}`"),
                ));
            }
        }
        Ok(())
    }

    /// Function snippet named `name`.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&PackageFunction> {
        self.functions.get(name)
    }

    /// `(name, function)` pairs flagged `default`, in document order.
    pub fn default_functions(&self) -> impl Iterator<Item = (&str, &PackageFunction)> {
        self.functions.iter().filter(|(_, f)| f.default)
    }
}
