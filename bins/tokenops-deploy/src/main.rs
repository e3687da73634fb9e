//! tokenops-deploy - deploys and verifies the token contracts.
//!
//! # Usage
//!
//! ```bash
//! # Deploy MyERC20Token with the default beneficiary, price 1 and fee 1%
//! POLYGON_AMOY_RPC=... PRIVATE_KEY=... tokenops-deploy erc20
//!
//! # Deploy MyERC721Token to a local node with a custom price
//! tokenops-deploy --network localhost --private-key 0x... erc721 --price 1000
//!
//! # Verify on OKLink and check the result once
//! OKLINK_AMOY_API=... tokenops-deploy verify --address 0x... \
//!     --standard-json build-info/input.json --check erc20
//! ```

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Command, Config, TokenArgs, VerifyArgs};
use tokenops::artifact::ArtifactStore;
use tokenops::explorer::{ExplorerClient, VerificationRequest, COMPILER_VERSION};
use tokenops::{Ledger, RpcLedger};
use tokenops_config_common::NetworkArgs;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    tokenops_config_common::init_logging();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "tokenops_deploy", "{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    match config.command {
        Command::Deploy(token) => deploy(&config.network, &token).await,
        Command::Verify(args) => verify(&config.network, &args).await,
        Command::VerifyStatus { guid } => verify_status(&config.network, &guid).await,
    }
}

async fn deploy(network: &NetworkArgs, token: &TokenArgs) -> Result<()> {
    let network_config = network.resolve()?;
    let ledger: Arc<dyn Ledger> = Arc::new(RpcLedger::connect(&network_config).await?);
    let deployer = ledger
        .signers()
        .first()
        .copied()
        .context("ledger has no signing account")?;

    let deployment = token.deployment();
    let deployed = tokenops::deploy(ledger.as_ref(), deployer, &deployment)
        .await
        .with_context(|| format!("failed to deploy {}", deployment.contract))?;

    tracing::info!(
        target: "tokenops_deploy",
        network = %network_config.name,
        block = deployed.block_number.unwrap_or(0),
        "{} deployed to: {}",
        deployment.contract,
        deployed.address
    );

    if let Some(explorer) = &network_config.explorer {
        if explorer.api_key.is_some() {
            let client = ExplorerClient::new(explorer)?;
            tracing::info!(target: "tokenops_deploy", "Explorer: {}", client.contract_url(deployed.address));
        }
    }

    Ok(())
}

async fn verify(network: &NetworkArgs, args: &VerifyArgs) -> Result<()> {
    let explorer = network
        .explorer_config()?
        .with_context(|| format!("no explorer configured for network '{}'", network.network))?;
    let client = ExplorerClient::new(&explorer)?;

    let deployment = args.token.deployment();
    let artifact = ArtifactStore::new(&network.artifacts).load(&deployment.contract)?;
    let standard_json = read_standard_json(&args.standard_json)?;

    let request = VerificationRequest {
        address: args.address,
        contract_name: artifact.qualified_name(),
        standard_json,
        constructor_args: deployment.constructor_args.clone(),
        compiler_version: COMPILER_VERSION.to_string(),
    };

    let guid = client.submit(&request).await?;
    tracing::info!(target: "tokenops_deploy", guid = %guid, "Verification submitted");

    if args.check {
        verify_with(&client, &guid).await?;
    }
    Ok(())
}

async fn verify_status(network: &NetworkArgs, guid: &str) -> Result<()> {
    let explorer = network
        .explorer_config()?
        .with_context(|| format!("no explorer configured for network '{}'", network.network))?;
    let client = ExplorerClient::new(&explorer)?;
    verify_with(&client, guid).await
}

async fn verify_with(client: &ExplorerClient, guid: &str) -> Result<()> {
    use tokenops::explorer::VerificationStatus;

    match client.status(guid).await? {
        VerificationStatus::Verified => {
            tracing::info!(target: "tokenops_deploy", guid, "Contract verified")
        }
        VerificationStatus::AlreadyVerified => {
            tracing::info!(target: "tokenops_deploy", guid, "Contract was already verified")
        }
        VerificationStatus::Pending => {
            tracing::info!(target: "tokenops_deploy", guid, "Verification pending, check again later")
        }
        VerificationStatus::Failed(reason) => anyhow::bail!("verification failed: {reason}"),
    }
    Ok(())
}

/// Accepts either a bare standard JSON input or a Hardhat build-info file
/// wrapping it under `input`.
fn read_standard_json(path: &std::path::Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    match value.get("input") {
        Some(input) => Ok(input.to_string()),
        None => Ok(raw),
    }
}
