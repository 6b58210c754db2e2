//! # MSFSM Test Suite
//!
//! Cross-crate flows that exercise the whole pipeline.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures/         # Documents, stub compiler, in-memory JSON-RPC node
//! └── integration/      # Specification → graph → generate → deploy → execute
//! ```
//!
//! The deployer and executor under test are the real `EthereumBridge`:
//! transactions are signed, RLP-encoded and submitted to [`MemoryNode`],
//! which recovers the sender from the signature and assigns CREATE
//! addresses. Only `solc` is replaced, by [`SourceCompiler`].
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p msfsm-tests
//! cargo test -p msfsm-tests integration::execution::
//! ```
//!
//! [`MemoryNode`]: fixtures::node::MemoryNode
//! [`SourceCompiler`]: fixtures::compiler::SourceCompiler

pub mod fixtures;
pub mod integration;
