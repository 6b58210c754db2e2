//! Adapters implementing the compiler port.

pub mod solc;
