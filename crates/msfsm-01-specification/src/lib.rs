//! # MSFSM-01: Specification Subsystem
//!
//! Loads and validates the two input documents of the compiler:
//!
//! - **Packages**: libraries of Solidity snippets (functions, structs,
//!   variables) that guard conditions refer to.
//! - **Specifications**: a named set of automatons, each with ordered states
//!   and guarded transitions.
//!
//! ## Architecture
//!
//! - **Domain**: `Package`, `Specification` (an arena of `Automaton`s indexed by
//!   `AutomatonId`), and the tagged `Condition` parsed once at load time
//! - **Repository**: `PackageRepository` (directory of `<id>.json` files) and
//!   `PackageSet` (loaded packages plus reference resolution)
//!
//! ## Loading Pipeline
//!
//! ```text
//! JSON document ──serde──→ *Document ──validate──→ Specification
//!                                                       │
//!                        PackageRepository ──load──→ PackageSet::resolve
//! ```
//!
//! Names are only used at the boundary. Past loading, automatons are
//! addressed by index and states by `StateId`.

pub mod domain;
pub mod errors;
pub mod repository;

pub use domain::condition::{Condition, CONDITION_SEPARATOR};
pub use domain::package::{Declaration, Package, PackageFunction};
pub use domain::specification::{
    Automaton, AutomatonDocument, AutomatonId, Specification, SpecificationDocument, StateId,
    Transition, TransitionDocument,
};
pub use errors::SpecificationError;
pub use repository::{PackageRepository, PackageSet};
