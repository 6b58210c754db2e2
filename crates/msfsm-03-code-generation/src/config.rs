//! Configuration for Solidity generation.

use serde::{Deserialize, Serialize};

/// Generator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Emitted as `pragma solidity ^<version>;`.
    pub solidity_version: String,
    /// SPDX identifier for the header line; `None` omits the line.
    pub license: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            solidity_version: "0.8.0".to_string(),
            license: Some("UNLICENSED".to_string()),
        }
    }
}
