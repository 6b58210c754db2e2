//! Shared test fixtures.

pub mod compiler;
pub mod documents;
pub mod node;

use msfsm_05_chain_bridge::{ChainConfig, EthereumBridge};
use node::MemoryNode;
use std::sync::Arc;

/// Chain id served by [`MemoryNode::default`].
pub const CHAIN_ID: u64 = 31337;

/// Development account configuration with fast receipt polling.
pub fn chain_config() -> ChainConfig {
    ChainConfig {
        chain_id: CHAIN_ID,
        receipt_poll_interval_ms: 1,
        receipt_timeout_secs: 5,
        ..ChainConfig::default()
    }
}

/// Real bridge over the shared in-memory node.
pub fn bridge(node: &Arc<MemoryNode>) -> EthereumBridge<Arc<MemoryNode>> {
    EthereumBridge::new(Arc::clone(node), chain_config()).expect("development key is valid")
}
