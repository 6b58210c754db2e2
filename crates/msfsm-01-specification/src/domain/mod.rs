//! Domain layer: documents, the automaton arena and parsed conditions.

pub mod condition;
pub mod package;
pub mod specification;
