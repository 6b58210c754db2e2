//! # MSFSM-05: Chain Bridge Subsystem
//!
//! Talks to an Ethereum node over JSON-RPC to deploy compiled contracts and
//! invoke their functions.
//!
//! ## Architecture
//!
//! | Layer | Contents |
//! |-------|----------|
//! | Domain | ABI argument codec (`ethers::abi`), legacy EIP-155 transaction, secp256k1 signer, hex quantities |
//! | Ports | `ContractDeployer`, `ContractExecutor` (inbound), `RpcTransport` (outbound) |
//! | Adapters | `HttpRpcTransport` (reqwest), `EthClient` typed RPC calls |
//! | Service | `EthereumBridge` implementing both inbound ports |
//!
//! ## Transaction Lifecycle
//!
//! ```text
//! eth_getTransactionCount(pending) -> eth_gasPrice -> eth_estimateGas
//!     -> sign (EIP-155) -> eth_sendRawTransaction
//!     -> poll eth_getTransactionReceipt until status or timeout
//! ```
//!
//! No retries are attempted. A receipt with `status == 0x0` is a failure.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::eth_client::{EthClient, TransactionReceipt};
pub use adapters::http::HttpRpcTransport;
pub use config::ChainConfig;
pub use domain::abi_codec::{decode_outputs, encode_call, param_type};
pub use domain::signer::{SignedTransaction, TransactionSigner};
pub use domain::transaction::LegacyTransaction;
pub use errors::{DeploymentError, ExecutionError, RpcError, TransactionError};
pub use ports::inbound::{ContractDeployer, ContractExecutor, ExecutionOutcome};
pub use ports::outbound::RpcTransport;
pub use service::EthereumBridge;
