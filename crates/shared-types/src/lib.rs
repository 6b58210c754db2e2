//! # Shared Types Crate
//!
//! Value types that cross crate boundaries in the MSFSM workspace.
//!
//! ## Contents
//!
//! | Module | Types |
//! |--------|-------|
//! | `value_objects` | `Address` (EIP-55), `Hash`, `Bytes` |
//! | `hashing` | `keccak256`, CREATE address derivation |
//! | `abi` | `AbiEntry`, `AbiParam` (solc ABI JSON) |
//! | `ordered_map` | `OrderedMap<V>`, a document-ordered string map |
//! | `entities` | `DeployedContract`, `DeploymentResult`, `DeploymentRecord` |
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: types serialized to callers are defined once, here.
//! - **Document order is meaningful**: automaton enumeration indices come from
//!   insertion order, so maps that mirror JSON objects preserve it.

pub mod abi;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod ordered_map;
pub mod value_objects;

pub use abi::{find_function, AbiEntry, AbiEntryKind, AbiParam};
pub use entities::{DeployedContract, DeploymentRecord, DeploymentResult};
pub use errors::{DeploymentResultError, ValueParseError};
pub use hashing::{compute_contract_address, keccak256};
pub use ordered_map::OrderedMap;
pub use value_objects::{Address, Bytes, Hash};
