//! # Error Types
//!
//! Errors raised by the shared value types.

use thiserror::Error;

/// Errors parsing textual value objects (addresses, hashes, byte strings).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueParseError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded value has the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Mixed-case address does not match its EIP-55 checksum.
    #[error("address checksum mismatch: {0}")]
    ChecksumMismatch(String),
}

/// Errors raised while accumulating a deployment result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeploymentResultError {
    /// Entries are write-once.
    #[error("automaton already recorded: {0}")]
    AlreadyRecorded(String),

    /// Lookup of a deployed automaton failed.
    #[error("deployed automaton not found: {0}")]
    NotFound(String),
}
