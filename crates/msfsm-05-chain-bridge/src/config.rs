//! Network and account configuration.

use crate::domain::signer::TransactionSigner;
use crate::errors::TransactionError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use zeroize::Zeroizing;

/// First account of a local Hardhat/Anvil development node.
pub const DEV_ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
/// Private key of [`DEV_ACCOUNT`]. Publicly known; never use on a real network.
pub const DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Connection and signing parameters for the target chain.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// EIP-155 chain identifier.
    pub chain_id: u64,
    /// Sending account. Derived from `private_key` when absent.
    pub public_key: Option<Address>,
    /// Hex-encoded secp256k1 secret, with or without `0x`.
    pub private_key: Zeroizing<String>,
    /// Fixed gas limit; `eth_estimateGas` is used when absent.
    pub gas_limit: Option<u64>,
    pub receipt_poll_interval_ms: u64,
    pub receipt_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            public_key: None,
            private_key: Zeroizing::new(DEV_PRIVATE_KEY.to_string()),
            gas_limit: None,
            receipt_poll_interval_ms: 500,
            receipt_timeout_secs: 120,
            request_timeout_secs: 30,
        }
    }
}

impl fmt::Debug for ChainConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainConfig")
            .field("rpc_url", &self.rpc_url)
            .field("chain_id", &self.chain_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("gas_limit", &self.gas_limit)
            .field("receipt_poll_interval_ms", &self.receipt_poll_interval_ms)
            .field("receipt_timeout_secs", &self.receipt_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ChainConfig {
    /// Builds the signer and checks it against `public_key`.
    ///
    /// The development key only signs for loopback endpoints.
    pub fn validate(&self) -> Result<TransactionSigner, TransactionError> {
        if self.uses_dev_key() && !self.is_local_endpoint() {
            return Err(TransactionError::DevKeyOnRemoteNetwork {
                rpc_url: self.rpc_url.clone(),
            });
        }
        let signer = TransactionSigner::from_hex(&self.private_key)?;
        if let Some(configured) = self.public_key {
            if configured != signer.address() {
                return Err(TransactionError::KeyMismatch {
                    configured,
                    derived: signer.address(),
                });
            }
        }
        Ok(signer)
    }

    /// True when `private_key` is [`DEV_PRIVATE_KEY`].
    #[must_use]
    pub fn uses_dev_key(&self) -> bool {
        let key = self.private_key.trim();
        key.strip_prefix("0x")
            .unwrap_or(key)
            .eq_ignore_ascii_case(&DEV_PRIVATE_KEY[2..])
    }

    /// True when `rpc_url` names `localhost` or a loopback address.
    #[must_use]
    pub fn is_local_endpoint(&self) -> bool {
        let Ok(url) = reqwest::Url::parse(&self.rpc_url) else {
            return false;
        };
        match url.host_str() {
            Some("localhost") => true,
            Some(host) => host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .map_or(false, |ip| ip.is_loopback() || ip.is_unspecified()),
            None => false,
        }
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms.max(1))
    }

    #[must_use]
    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }
}
