//! tokenops-erc20-interact - drives a deployed MyERC20Token.
//!
//! # Usage
//!
//! ```bash
//! # Against the deployment on Polygon Amoy
//! POLYGON_AMOY_RPC=... PRIVATE_KEY=... tokenops-erc20-interact --contract 0x...
//!
//! # Self-contained run on the in-process devnet
//! tokenops-erc20-interact --devnet --probe-storage
//! ```

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use alloy::primitives::U256;
use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use tokenops::{Ledger, RpcLedger};
use tokenops_devnet::{Devnet, DEV_ACCOUNTS};
use tokenops_erc20::{interact, Erc20Deployment, Erc20Token, InteractionScript};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    tokenops_config_common::init_logging();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "tokenops_erc20", "{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    let token = attach(&config).await?;

    let script = InteractionScript {
        recipient: config.recipient,
        probe_storage: config.probe_storage,
        from_block: config.from_block,
        ..Default::default()
    };
    let report = interact::run(&token, &script).await?;

    if let Some(probe) = &report.probe {
        tracing::info!(
            target: "tokenops_erc20",
            matches = probe.matches(),
            storage = %probe.storage_value,
            reported = %probe.reported,
            "Storage probe"
        );
    }
    tracing::info!(
        target: "tokenops_erc20",
        steps = report.steps.len(),
        transfers = report.transfers.len(),
        "Interaction complete"
    );
    Ok(())
}

async fn attach(config: &Config) -> Result<Erc20Token> {
    if config.devnet {
        let ledger: Arc<dyn Ledger> = Arc::new(Devnet::new());
        let deployer = DEV_ACCOUNTS[0];
        let (token, deployed) =
            Erc20Deployment::new(deployer, U256::from(1u64), U256::from(1u64))
                .deploy(ledger, deployer)
                .await
                .context("failed to deploy MyERC20Token to the devnet")?;
        tracing::info!(target: "tokenops_erc20", "MyERC20Token deployed to devnet at: {}", deployed.address);
        return Ok(token);
    }

    let address = config
        .contract
        .context("--contract is required unless --devnet is set")?;
    let network = config.network.resolve()?;
    let ledger: Arc<dyn Ledger> = Arc::new(RpcLedger::connect(&network).await?);
    let caller = ledger
        .signers()
        .first()
        .copied()
        .context("ledger has no signing account")?;

    tracing::info!(target: "tokenops_erc20", network = %network.name, "Connecting to MyERC20Token at {address}");
    Ok(Erc20Token::attach(ledger, address, caller))
}
