//! In-memory Ethereum JSON-RPC node.
//!
//! Serves the methods the chain bridge uses. Raw transactions are decoded
//! from RLP, the sender is recovered from the EIP-155 signature and nonces
//! are enforced per sender, so the bridge's signing path is exercised end
//! to end. Every transaction is mined immediately.

use async_trait::async_trait;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use msfsm_05_chain_bridge::domain::signer::address_from_key;
use msfsm_05_chain_bridge::{LegacyTransaction, RpcError, RpcTransport};
use parking_lot::Mutex;
use rlp::Rlp;
use serde_json::{json, Value};
use shared_types::{compute_contract_address, keccak256, Address, Bytes, Hash};
use std::collections::HashMap;

use super::CHAIN_ID;

const GAS_PRICE: u64 = 1_000_000_000;
const GAS_ESTIMATE: u64 = 3_000_000;

/// A transaction accepted by the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedTransaction {
    pub hash: Hash,
    pub from: Address,
    pub nonce: u64,
    pub to: Option<Address>,
    pub gas_limit: u64,
    pub data: Vec<u8>,
    pub success: bool,
}

#[derive(Default)]
struct NodeState {
    nonces: HashMap<Address, u64>,
    receipts: HashMap<Hash, Value>,
    code: HashMap<Address, Vec<u8>>,
    transactions: Vec<MinedTransaction>,
    calls: Vec<(Address, Vec<u8>)>,
    creations: usize,
}

pub struct MemoryNode {
    chain_id: u64,
    revert_creation: Option<usize>,
    call_result: Vec<u8>,
    state: Mutex<NodeState>,
}

impl Default for MemoryNode {
    fn default() -> Self {
        Self::new(CHAIN_ID)
    }
}

impl MemoryNode {
    /// `eth_call` answers with ABI-encoded `true` until changed.
    pub fn new(chain_id: u64) -> Self {
        let mut call_result = vec![0u8; 32];
        call_result[31] = 1;
        Self {
            chain_id,
            revert_creation: None,
            call_result,
            state: Mutex::new(NodeState::default()),
        }
    }

    /// Reverts the `n`-th contract creation (zero-based).
    pub fn reverting_creation(mut self, n: usize) -> Self {
        self.revert_creation = Some(n);
        self
    }

    /// Raw return data for every `eth_call`.
    pub fn with_call_result(mut self, data: Vec<u8>) -> Self {
        self.call_result = data;
        self
    }

    pub fn transactions(&self) -> Vec<MinedTransaction> {
        self.state.lock().transactions.clone()
    }

    /// `(to, calldata)` of every `eth_call`.
    pub fn calls(&self) -> Vec<(Address, Vec<u8>)> {
        self.state.lock().calls.clone()
    }

    pub fn code_at(&self, address: Address) -> Option<Vec<u8>> {
        self.state.lock().code.get(&address).cloned()
    }

    fn decode(&self, raw: &[u8]) -> Result<(LegacyTransaction, Address), String> {
        let rlp = Rlp::new(raw);
        if rlp.item_count().map_err(|e| e.to_string())? != 9 {
            return Err("expected a 9-item legacy transaction".into());
        }
        let to: Vec<u8> = rlp.val_at(3).map_err(|e| e.to_string())?;
        let tx = LegacyTransaction {
            nonce: rlp.val_at(0).map_err(|e| e.to_string())?,
            gas_price: rlp.val_at(1).map_err(|e| e.to_string())?,
            gas_limit: rlp.val_at(2).map_err(|e| e.to_string())?,
            to: if to.is_empty() {
                None
            } else {
                Some(Address::from_slice(&to).ok_or("bad recipient")?)
            },
            value: rlp.val_at(4).map_err(|e| e.to_string())?,
            data: rlp.val_at(5).map_err(|e| e.to_string())?,
            chain_id: self.chain_id,
        };

        let v: u64 = rlp.val_at(6).map_err(|e| e.to_string())?;
        let r: Vec<u8> = rlp.val_at(7).map_err(|e| e.to_string())?;
        let s: Vec<u8> = rlp.val_at(8).map_err(|e| e.to_string())?;
        let recovery = v
            .checked_sub(35 + 2 * self.chain_id)
            .and_then(|id| u8::try_from(id).ok())
            .and_then(RecoveryId::from_byte)
            .ok_or("invalid chain id in signature")?;
        let signature = Signature::from_scalars(word(&r)?, word(&s)?).map_err(|e| e.to_string())?;
        let key = VerifyingKey::recover_from_prehash(tx.signing_hash().as_bytes(), &signature, recovery)
            .map_err(|e| e.to_string())?;
        Ok((tx, address_from_key(&key)))
    }

    fn send_raw(&self, raw: &[u8]) -> Result<Value, RpcError> {
        let (tx, from) = self.decode(raw).map_err(|message| RpcError::Rpc {
            code: -32602,
            message,
        })?;
        let hash = keccak256(raw);

        let mut state = self.state.lock();
        let expected = state.nonces.get(&from).copied().unwrap_or(0);
        if tx.nonce != expected {
            return Err(RpcError::Rpc {
                code: -32000,
                message: format!("nonce mismatch: expected {expected}, got {}", tx.nonce),
            });
        }
        state.nonces.insert(from, expected + 1);

        let mut contract_address = None;
        let mut success = true;
        if tx.to.is_none() {
            success = self.revert_creation != Some(state.creations);
            state.creations += 1;
            if success {
                let address = compute_contract_address(from, tx.nonce);
                state.code.insert(address, tx.data.clone());
                contract_address = Some(address);
            }
        }

        let block = state.transactions.len() + 1;
        state.receipts.insert(
            hash,
            json!({
                "transactionHash": hash,
                "status": if success { "0x1" } else { "0x0" },
                "contractAddress": contract_address,
                "blockNumber": format!("{block:#x}"),
                "gasUsed": format!("{:#x}", tx.gas_limit / 2),
                "logs": []
            }),
        );
        state.transactions.push(MinedTransaction {
            hash,
            from,
            nonce: tx.nonce,
            to: tx.to,
            gas_limit: tx.gas_limit,
            data: tx.data,
            success,
        });
        Ok(json!(hash))
    }
}

fn word(bytes: &[u8]) -> Result<[u8; 32], String> {
    if bytes.len() > 32 {
        return Err("signature scalar longer than 32 bytes".into());
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

fn param<T: std::str::FromStr>(value: &Value) -> Result<T, RpcError> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| RpcError::Rpc {
            code: -32602,
            message: format!("invalid params: {value}"),
        })
}

#[async_trait]
impl RpcTransport for MemoryNode {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "eth_chainId" => Ok(json!(format!("{:#x}", self.chain_id))),
            "eth_gasPrice" => Ok(json!(format!("{GAS_PRICE:#x}"))),
            "eth_estimateGas" => Ok(json!(format!("{GAS_ESTIMATE:#x}"))),
            "eth_getTransactionCount" => {
                let account: Address = param(&params[0])?;
                let nonce = self.state.lock().nonces.get(&account).copied().unwrap_or(0);
                Ok(json!(format!("{nonce:#x}")))
            }
            "eth_sendRawTransaction" => {
                let raw: Bytes = param(&params[0])?;
                self.send_raw(raw.as_slice())
            }
            "eth_getTransactionReceipt" => {
                let hash: Hash = param(&params[0])?;
                Ok(self
                    .state
                    .lock()
                    .receipts
                    .get(&hash)
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            "eth_call" => {
                let to: Address = param(&params[0]["to"])?;
                let data: Bytes = param(&params[0]["data"])?;
                self.state.lock().calls.push((to, data.0));
                Ok(json!(Bytes::new(self.call_result.clone())))
            }
            other => Err(RpcError::Rpc {
                code: -32601,
                message: format!("method {other} not found"),
            }),
        }
    }
}
