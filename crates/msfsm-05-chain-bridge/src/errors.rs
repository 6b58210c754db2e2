//! Error types for the chain bridge.

use shared_types::{Address, Hash};
use thiserror::Error;

/// JSON-RPC transport and protocol errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Request could not be delivered.
    #[error("transport error: {0}")]
    Transport(String),

    /// Node answered with a non-success HTTP status.
    #[error("HTTP status {status}")]
    Http { status: u16 },

    /// Node answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response body did not have the expected shape.
    #[error("invalid response to {method}: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl RpcError {
    pub(crate) fn invalid(method: &str, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            method: method.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures while building, signing, submitting or confirming a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransactionError {
    /// Private key could not be parsed.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Configured public address does not belong to the private key.
    #[error("configured address {configured} does not match key address {derived}")]
    KeyMismatch { configured: Address, derived: Address },

    /// Development key configured for a node that is not on this machine.
    #[error("refusing to sign with the public development key for {rpc_url}; configure a private key")]
    DevKeyOnRemoteNetwork { rpc_url: String },

    /// ECDSA signing failed.
    #[error("signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// No receipt before the deadline.
    #[error("no receipt for {tx_hash} after {secs}s")]
    ReceiptTimeout { tx_hash: Hash, secs: u64 },

    /// Receipt reported `status == 0x0`.
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: Hash },
}

/// Contract deployment failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeploymentError {
    #[error("deployment of `{contract}` failed: {source}")]
    Transaction {
        contract: String,
        #[source]
        source: TransactionError,
    },

    /// Creation receipt carried no `contractAddress`.
    #[error("receipt {tx_hash} for `{contract}` has no contract address")]
    MissingContractAddress { contract: String, tx_hash: Hash },

    #[error("contract `{contract}` has empty bytecode")]
    EmptyBytecode { contract: String },

    #[error("contract `{contract}` has a constructor with arguments")]
    ConstructorArguments { contract: String },

    #[error("node request failed: {0}")]
    Rpc(#[from] RpcError),
}

/// Contract function invocation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExecutionError {
    #[error("function `{0}` not found in ABI")]
    UnknownFunction(String),

    #[error("`{function}` expects {expected} arguments, got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} (`{value}`) is not a valid {kind}: {reason}")]
    InvalidArgument {
        index: usize,
        kind: String,
        value: String,
        reason: String,
    },

    /// Type name that is not a valid Solidity ABI type.
    #[error("unsupported ABI type `{0}`")]
    UnsupportedType(String),

    #[error("transaction failed: {0}")]
    Transaction(#[from] TransactionError),

    #[error("call failed: {0}")]
    Call(#[from] RpcError),

    #[error("cannot decode return data: {0}")]
    Decode(String),
}
