//! # Ethereum Bridge Service
//!
//! Implements [`ContractDeployer`] and [`ContractExecutor`] on top of an
//! [`EthClient`] and a [`TransactionSigner`].
//!
//! Every state-changing operation is one signed legacy transaction whose
//! receipt is awaited by polling. Nonce, gas price and gas limit are
//! fetched from the node per transaction.

use crate::adapters::eth_client::{EthClient, TransactionReceipt};
use crate::adapters::http::HttpRpcTransport;
use crate::config::ChainConfig;
use crate::domain::abi_codec::{decode_outputs, encode_call};
use crate::domain::signer::TransactionSigner;
use crate::domain::transaction::LegacyTransaction;
use crate::errors::{DeploymentError, ExecutionError, TransactionError};
use crate::ports::inbound::{ContractDeployer, ContractExecutor, ExecutionOutcome};
use crate::ports::outbound::RpcTransport;
use async_trait::async_trait;
use primitive_types::U256;
use shared_types::{find_function, AbiEntry, AbiEntryKind, Address, Bytes, DeployedContract, Hash};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Deployer and executor for one account on one chain.
#[derive(Debug)]
pub struct EthereumBridge<T> {
    client: EthClient<T>,
    signer: TransactionSigner,
    config: ChainConfig,
}

impl EthereumBridge<HttpRpcTransport> {
    /// Bridge over HTTP to `config.rpc_url`.
    pub fn connect(config: ChainConfig) -> Result<Self, TransactionError> {
        let transport = HttpRpcTransport::new(
            config.rpc_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Self::new(transport, config)
    }
}

impl<T: RpcTransport> EthereumBridge<T> {
    /// Validates the account configuration and wraps `transport`.
    pub fn new(transport: T, config: ChainConfig) -> Result<Self, TransactionError> {
        let signer = config.validate()?;
        Ok(Self {
            client: EthClient::new(transport),
            signer,
            config,
        })
    }

    #[must_use]
    pub fn client(&self) -> &EthClient<T> {
        &self.client
    }

    #[must_use]
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Builds, signs and submits a transaction, then waits for a
    /// successful receipt.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub async fn send_transaction(
        &self,
        to: Option<Address>,
        data: Vec<u8>,
    ) -> Result<TransactionReceipt, TransactionError> {
        let from = self.signer.address();
        let nonce = self.client.transaction_count(from).await?;
        let gas_price = self.client.gas_price().await?;
        let gas_limit = match self.config.gas_limit {
            Some(limit) => limit,
            None => self.client.estimate_gas(from, to, &data).await?,
        };

        let tx = LegacyTransaction {
            nonce,
            gas_price,
            gas_limit,
            to,
            value: U256::zero(),
            data,
            chain_id: self.config.chain_id,
        };
        let signed = self.signer.sign(&tx)?;
        let tx_hash = self.client.send_raw_transaction(signed.raw.as_slice()).await?;
        if tx_hash != signed.hash {
            warn!(expected = %signed.hash, reported = %tx_hash, "Node reported a different transaction hash");
        }
        debug!(%tx_hash, nonce, gas_limit, "Transaction submitted");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if !receipt.is_success() {
            return Err(TransactionError::Reverted { tx_hash });
        }
        Ok(receipt)
    }

    async fn wait_for_receipt(&self, tx_hash: Hash) -> Result<TransactionReceipt, TransactionError> {
        let deadline = Instant::now() + self.config.receipt_timeout();
        loop {
            if let Some(receipt) = self.client.transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            if Instant::now() >= deadline {
                return Err(TransactionError::ReceiptTimeout {
                    tx_hash,
                    secs: self.config.receipt_timeout_secs,
                });
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }
    }
}

#[async_trait]
impl<T: RpcTransport> ContractDeployer for EthereumBridge<T> {
    fn sender(&self) -> Address {
        self.signer.address()
    }

    async fn next_nonce(&self) -> Result<u64, DeploymentError> {
        self.client
            .transaction_count(self.signer.address())
            .await
            .map_err(DeploymentError::from)
    }

    #[instrument(skip(self, abi, bytecode), fields(bytecode_len = bytecode.len()))]
    async fn deploy(
        &self,
        name: &str,
        abi: &[AbiEntry],
        bytecode: &Bytes,
    ) -> Result<Address, DeploymentError> {
        if bytecode.is_empty() {
            return Err(DeploymentError::EmptyBytecode {
                contract: name.to_string(),
            });
        }
        if abi
            .iter()
            .any(|e| e.kind == AbiEntryKind::Constructor && !e.inputs.is_empty())
        {
            return Err(DeploymentError::ConstructorArguments {
                contract: name.to_string(),
            });
        }

        let receipt = self
            .send_transaction(None, bytecode.as_slice().to_vec())
            .await
            .map_err(|source| DeploymentError::Transaction {
                contract: name.to_string(),
                source,
            })?;
        let address = receipt
            .contract_address
            .ok_or_else(|| DeploymentError::MissingContractAddress {
                contract: name.to_string(),
                tx_hash: receipt.transaction_hash,
            })?;
        info!(contract = %name, %address, tx_hash = %receipt.transaction_hash, "Contract deployed");
        Ok(address)
    }
}

#[async_trait]
impl<T: RpcTransport> ContractExecutor for EthereumBridge<T> {
    #[instrument(skip(self, contract, args), fields(address = %contract.address))]
    async fn execute(
        &self,
        contract: &DeployedContract,
        function: &str,
        args: &[String],
    ) -> Result<ExecutionOutcome, ExecutionError> {
        let entry = find_function(&contract.abi, function)
            .ok_or_else(|| ExecutionError::UnknownFunction(function.to_string()))?;
        let data = encode_call(entry, args)?;

        if entry.outputs.is_empty() {
            let receipt = self.send_transaction(Some(contract.address), data).await?;
            info!(function, tx_hash = %receipt.transaction_hash, "Function transaction confirmed");
            return Ok(ExecutionOutcome::Transaction {
                tx_hash: receipt.transaction_hash,
            });
        }

        let output = self
            .client
            .call(self.signer.address(), contract.address, &data)
            .await?;
        let value = decode_outputs(&entry.outputs, output.as_slice())?;
        debug!(function, %value, "Function call returned");
        Ok(ExecutionOutcome::Call { value })
    }
}
