//! # ABI Descriptors
//!
//! Serde mirror of the JSON ABI emitted by solc. Field names follow the
//! solc output (`type`, `stateMutability`, `internalType`) so a compiled
//! ABI round-trips unchanged into deployment records.

use crate::hashing::keccak256;
use serde::{Deserialize, Serialize};

/// Kind of ABI entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiEntryKind {
    Function,
    Constructor,
    Fallback,
    Receive,
    Event,
    Error,
}

/// One input or output parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    /// Canonical Solidity type, e.g. `uint256`, `bool`, `tuple`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(
        rename = "internalType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub internal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

impl AbiParam {
    /// Parameter with just a name and a type.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            internal_type: None,
            components: Vec::new(),
            indexed: None,
        }
    }

    /// Type as it appears in a signature: `tuple` kinds expand to their
    /// components, keeping any array suffix (`(uint256,bool)[]`).
    #[must_use]
    pub fn canonical_type(&self) -> String {
        match self.kind.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> = self.components.iter().map(Self::canonical_type).collect();
                format!("({}){suffix}", inner.join(","))
            }
            None => self.kind.clone(),
        }
    }
}

/// One ABI entry (function, constructor, event, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(rename = "type")]
    pub kind: AbiEntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    #[serde(
        rename = "stateMutability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub state_mutability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<bool>,
}

impl AbiEntry {
    /// A function entry.
    #[must_use]
    pub fn function(
        name: impl Into<String>,
        inputs: Vec<AbiParam>,
        outputs: Vec<AbiParam>,
        state_mutability: impl Into<String>,
    ) -> Self {
        Self {
            kind: AbiEntryKind::Function,
            name: Some(name.into()),
            inputs,
            outputs,
            state_mutability: Some(state_mutability.into()),
            anonymous: None,
        }
    }

    /// True for `type: "function"` entries.
    #[must_use]
    pub fn is_function(&self) -> bool {
        self.kind == AbiEntryKind::Function
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(AbiParam::canonical_type).collect();
        format!("{}({})", self.name.as_deref().unwrap_or(""), types.join(","))
    }

    /// First four bytes of `keccak256(signature)`.
    #[must_use]
    pub fn selector(&self) -> [u8; 4] {
        let hash = keccak256(self.signature().as_bytes());
        let mut out = [0u8; 4];
        out.copy_from_slice(&hash.0[..4]);
        out
    }
}

/// Finds the function entry named `name` in an ABI.
#[must_use]
pub fn find_function<'a>(abi: &'a [AbiEntry], name: &str) -> Option<&'a AbiEntry> {
    abi.iter()
        .find(|e| e.is_function() && e.name.as_deref() == Some(name))
}
