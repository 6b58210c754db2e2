//! Domain layer: the source writer and the Solidity generator.

pub mod generator;
pub mod writer;
