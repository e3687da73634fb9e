//! Deployment descriptors.
//!
//! A [`Deployment`] names one deployable unit and its constructor arguments.
//! [`deploy`] submits it once and returns the created address.

use alloy::primitives::{Address, Bytes, B256};

use crate::error::{ChainError, Result};
use crate::ledger::{DeployRequest, Ledger};
use crate::receipt::TxReceipt;

/// A named deployable unit with ABI-encoded constructor arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Deployment module name, used for logging.
    pub module: String,
    /// Contract name as compiled.
    pub contract: String,
    pub constructor_args: Bytes,
}

impl Deployment {
    pub fn new(
        module: impl Into<String>,
        contract: impl Into<String>,
        constructor_args: impl Into<Bytes>,
    ) -> Self {
        Self {
            module: module.into(),
            contract: contract.into(),
            constructor_args: constructor_args.into(),
        }
    }
}

/// Output of a successful deployment.
#[derive(Debug, Clone)]
pub struct DeployedContract {
    pub address: Address,
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
    pub receipt: TxReceipt,
}

/// Deploys `deployment` from `deployer` and waits for the creation receipt.
pub async fn deploy(
    ledger: &dyn Ledger,
    deployer: Address,
    deployment: &Deployment,
) -> Result<DeployedContract> {
    tracing::info!(
        target: "tokenops::deploy",
        network = ledger.name(),
        module = %deployment.module,
        contract = %deployment.contract,
        deployer = %deployer,
        "Deploying contract"
    );

    let receipt = ledger
        .deploy(DeployRequest {
            from: deployer,
            contract: deployment.contract.clone(),
            constructor_args: deployment.constructor_args.clone(),
        })
        .await?;

    let address = receipt.contract_address.ok_or_else(|| {
        ChainError::Decode(format!(
            "creation receipt {} has no contract address",
            receipt.transaction_hash
        ))
    })?;

    tracing::info!(
        target: "tokenops::deploy",
        module = %deployment.module,
        address = %address,
        tx = %receipt.transaction_hash,
        "{} deployed to {}",
        deployment.contract,
        address
    );

    Ok(DeployedContract {
        address,
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        receipt,
    })
}
