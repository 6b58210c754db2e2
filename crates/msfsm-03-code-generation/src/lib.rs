//! # MSFSM-03: Code Generation Subsystem
//!
//! Emits one Solidity contract per automaton.
//!
//! ## Contract Layout
//!
//! ```text
//! // SPDX-License-Identifier: <license>
//! pragma solidity ^<version>;
//!
//! contract <Automaton> {
//!     enum State { S0, S1, ... }              states, uppercased
//!     State currentState = State.S0;          initial state
//!     <structs, then variables>               per referenced package
//!     <guard condition functions>             package snippets / delegated calls
//!     <one function per trigger>              require + if / else if chain
//!     <default package functions>
//! }
//! ```
//!
//! ## Purity
//!
//! Generation is a pure function of the automaton, the package set, the
//! configuration and the dependency addresses already recorded in the
//! `DeploymentResult`. Identical inputs give byte-identical source.

pub mod config;
pub mod domain;
pub mod errors;

pub use config::GeneratorConfig;
pub use domain::generator::{GeneratedContract, SolidityGenerator};
pub use errors::CodegenError;
