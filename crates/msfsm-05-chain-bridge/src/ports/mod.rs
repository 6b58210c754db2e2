//! Ports for the chain bridge.

pub mod inbound;
pub mod outbound;
