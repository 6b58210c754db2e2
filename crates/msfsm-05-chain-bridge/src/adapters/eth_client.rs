//! Typed wrappers over the `eth_*` methods the bridge uses.

use crate::domain::quantity::{parse_u256, parse_u64, to_data};
use crate::errors::RpcError;
use crate::ports::outbound::RpcTransport;
use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use shared_types::{Address, Bytes, Hash};

/// Subset of an `eth_getTransactionReceipt` result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: Hash,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub contract_address: Option<Address>,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
}

impl TransactionReceipt {
    /// Pre-Byzantium receipts have no status and count as success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => parse_u64("status", status).map_or(false, |s| s == 1),
            None => true,
        }
    }
}

/// Ethereum JSON-RPC client over any [`RpcTransport`].
#[derive(Debug)]
pub struct EthClient<T> {
    transport: T,
}

impl<T: RpcTransport> EthClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call_as<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, RpcError> {
        let result = self.transport.request(method, params).await?;
        serde_json::from_value(result).map_err(|e| RpcError::invalid(method, e.to_string()))
    }

    async fn quantity(&self, method: &str, params: Value) -> Result<String, RpcError> {
        self.call_as::<String>(method, params).await
    }

    pub async fn chain_id(&self) -> Result<u64, RpcError> {
        let raw = self.quantity("eth_chainId", json!([])).await?;
        parse_u64("eth_chainId", &raw)
    }

    /// Nonce including pending transactions.
    pub async fn transaction_count(&self, account: Address) -> Result<u64, RpcError> {
        let method = "eth_getTransactionCount";
        let raw = self.quantity(method, json!([account, "pending"])).await?;
        parse_u64(method, &raw)
    }

    pub async fn gas_price(&self) -> Result<U256, RpcError> {
        let raw = self.quantity("eth_gasPrice", json!([])).await?;
        parse_u256("eth_gasPrice", &raw)
    }

    pub async fn estimate_gas(
        &self,
        from: Address,
        to: Option<Address>,
        data: &[u8],
    ) -> Result<u64, RpcError> {
        let mut call = json!({ "from": from, "data": to_data(data) });
        if let Some(to) = to {
            call["to"] = json!(to);
        }
        let raw = self.quantity("eth_estimateGas", json!([call])).await?;
        parse_u64("eth_estimateGas", &raw)
    }

    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<Hash, RpcError> {
        self.call_as("eth_sendRawTransaction", json!([to_data(raw)]))
            .await
    }

    /// `None` while the transaction is pending.
    pub async fn transaction_receipt(
        &self,
        tx_hash: Hash,
    ) -> Result<Option<TransactionReceipt>, RpcError> {
        self.call_as("eth_getTransactionReceipt", json!([tx_hash]))
            .await
    }

    /// Read-only `eth_call` against the latest block.
    pub async fn call(&self, from: Address, to: Address, data: &[u8]) -> Result<Bytes, RpcError> {
        self.call_as(
            "eth_call",
            json!([{ "from": from, "to": to, "data": to_data(data) }, "latest"]),
        )
        .await
    }
}
