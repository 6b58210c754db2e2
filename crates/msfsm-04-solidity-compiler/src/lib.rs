//! # MSFSM-04: Solidity Compiler Subsystem
//!
//! Compiles generated contract source into ABI and creation bytecode by
//! driving `solc --standard-json` as a subprocess.
//!
//! ## Architecture
//!
//! - **Domain**: standard-JSON request/response model, `CompiledContract`,
//!   `solc --version` parsing
//! - **Ports**: `ContractCompiler` (what the orchestrator depends on)
//! - **Adapters**: `SolcCompiler` (tokio subprocess)
//!
//! ## Failure Model
//!
//! Any diagnostic with severity `error` fails the compilation and no partial
//! output is returned. Warnings are logged and otherwise ignored.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;

pub use adapters::solc::SolcCompiler;
pub use config::CompilerConfig;
pub use domain::entities::{CompiledContract, Diagnostic, Severity};
pub use errors::CompilerError;
pub use ports::ContractCompiler;
