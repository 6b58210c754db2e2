//! JSON-RPC adapters.

pub mod eth_client;
pub mod http;
