//! JSON-RPC ledger backed by an alloy provider with a local signer.

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Filter, TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{bail, Context};
use async_trait::async_trait;

use super::{DeployRequest, Ledger, LogEntry, LogQuery, TxRequest};
use crate::artifact::ArtifactStore;
use crate::error::{ChainError, Result};
use crate::network::{GasPrice, NetworkConfig};
use crate::receipt::TxReceipt;

/// Remote ledger reached over HTTP JSON-RPC.
///
/// Transactions are signed locally with the configured private key, submitted
/// once, and awaited until the receipt is available.
pub struct RpcLedger {
    name: String,
    provider: DynProvider,
    signer: Address,
    gas_price: GasPrice,
    artifacts: ArtifactStore,
}

impl RpcLedger {
    /// Connects to the configured endpoint and checks the chain id.
    pub async fn connect(config: &NetworkConfig) -> anyhow::Result<Self> {
        let signer: PrivateKeySigner = config
            .private_key
            .trim()
            .parse()
            .context("invalid private key")?;
        let signer_address = signer.address();

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(config.rpc_url.clone())
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .with_context(|| format!("failed to reach RPC endpoint for {}", config.name))?;

        if let Some(expected) = config.chain_id {
            if expected != chain_id {
                bail!(
                    "chain id mismatch for {}: endpoint reports {chain_id}, expected {expected}",
                    config.name
                );
            }
        }

        tracing::info!(
            target: "tokenops::ledger::rpc",
            network = %config.name,
            chain_id,
            signer = %signer_address,
            gas_price = %config.gas_price,
            "Connected to RPC endpoint"
        );

        Ok(Self {
            name: config.name.clone(),
            provider,
            signer: signer_address,
            gas_price: config.gas_price,
            artifacts: ArtifactStore::new(&config.artifacts_dir),
        })
    }

    fn transaction(&self, from: Address) -> TransactionRequest {
        let tx = TransactionRequest::default().with_from(from);
        match self.gas_price {
            GasPrice::Auto => tx,
            GasPrice::Fixed(wei) => tx.with_gas_price(wei),
        }
    }

    fn ensure_signer(&self, from: Address) -> Result<()> {
        if from == self.signer {
            Ok(())
        } else {
            Err(ChainError::rejected(format!(
                "no signing key configured for {from}"
            )))
        }
    }

    async fn submit(&self, tx: TransactionRequest) -> Result<TxReceipt> {
        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();

        tracing::debug!(
            target: "tokenops::ledger::rpc",
            tx = %tx_hash,
            "Transaction submitted, waiting for receipt"
        );

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ChainError::Transport(format!("failed to get receipt for {tx_hash}: {e}")))?;

        let receipt = convert_receipt(&receipt);
        if !receipt.status {
            return Err(ChainError::Reverted { reason: None });
        }
        Ok(receipt)
    }
}

#[async_trait]
impl Ledger for RpcLedger {
    fn name(&self) -> &str {
        &self.name
    }

    fn signers(&self) -> Vec<Address> {
        vec![self.signer]
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn native_balance(&self, account: Address) -> Result<U256> {
        Ok(self.provider.get_balance(account).await?)
    }

    async fn deploy(&self, request: DeployRequest) -> Result<TxReceipt> {
        self.ensure_signer(request.from)?;

        let artifact = self
            .artifacts
            .load(&request.contract)
            .map_err(|e| ChainError::rejected(format!("{e:#}")))?;
        let code = artifact
            .creation_code()
            .map_err(|e| ChainError::rejected(format!("{e:#}")))?;

        let mut init_code = code.to_vec();
        init_code.extend_from_slice(&request.constructor_args);

        let tx = self
            .transaction(request.from)
            .with_deploy_code(Bytes::from(init_code));
        let receipt = self.submit(tx).await?;

        if receipt.contract_address.is_none() {
            return Err(ChainError::Decode(format!(
                "creation receipt {} has no contract address",
                receipt.transaction_hash
            )));
        }
        Ok(receipt)
    }

    async fn send(&self, request: TxRequest) -> Result<TxReceipt> {
        self.ensure_signer(request.from)?;

        let tx = self
            .transaction(request.from)
            .with_to(request.to)
            .with_input(request.input)
            .with_value(request.value);
        self.submit(tx).await
    }

    async fn call(&self, request: TxRequest) -> Result<Bytes> {
        let tx = TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_input(request.input)
            .with_value(request.value);
        Ok(self.provider.call(tx).await?)
    }

    async fn storage_at(&self, contract: Address, slot: U256) -> Result<U256> {
        Ok(self.provider.get_storage_at(contract, slot).await?)
    }

    async fn logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>> {
        let mut filter = Filter::new().from_block(query.from_block);
        if let Some(to) = query.to_block {
            filter = filter.to_block(to);
        }
        if let Some(address) = query.address {
            filter = filter.address(address);
        }
        if let Some(topic) = query.topic0 {
            filter = filter.event_signature(topic);
        }

        let logs = self.provider.get_logs(&filter).await?;

        Ok(logs
            .into_iter()
            .map(|log| LogEntry {
                block_number: log.block_number,
                transaction_hash: log.transaction_hash,
                log: log.inner,
            })
            .collect())
    }
}

fn convert_receipt(receipt: &TransactionReceipt) -> TxReceipt {
    TxReceipt {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        status: receipt.status(),
        gas_used: receipt.gas_used,
        contract_address: receipt.contract_address,
        logs: receipt
            .inner
            .logs()
            .iter()
            .map(|log| log.inner.clone())
            .collect(),
    }
}
