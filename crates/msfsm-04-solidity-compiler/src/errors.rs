//! Error types for the compiler adapter.

use thiserror::Error;

/// All errors raised while compiling a contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerError {
    /// The compiler executable could not be started.
    #[error("failed to start {path}: {reason}")]
    Spawn { path: String, reason: String },

    /// Reading from or writing to the compiler process failed.
    #[error("compiler I/O failed: {0}")]
    Io(String),

    /// The compiler did not finish in time.
    #[error("compiler timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The compiler exited with a non-zero status.
    #[error("compiler exited with {status}: {stderr}")]
    ProcessFailed { status: String, stderr: String },

    /// The compiler output was not the expected JSON.
    #[error("invalid compiler output: {0}")]
    InvalidOutput(String),

    /// Compilation reported errors.
    #[error("compilation of `{contract}` failed:\n{}", messages.join("\n"))]
    Diagnostics {
        contract: String,
        messages: Vec<String>,
    },

    /// The output has no ABI or bytecode for the contract.
    #[error("no output for contract `{contract}`")]
    MissingOutput { contract: String },

    /// `solc --version` reported an unexpected version.
    #[error("solc version mismatch: expected {expected}, found {actual}")]
    VersionMismatch { expected: String, actual: String },
}
