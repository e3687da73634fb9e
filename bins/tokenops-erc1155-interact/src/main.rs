//! tokenops-erc1155-interact - drives a deployed MyERC1155Token.
//!
//! ```bash
//! POLYGON_AMOY_RPC=... PRIVATE_KEY=... tokenops-erc1155-interact --contract 0x...
//! tokenops-erc1155-interact --devnet --probe-storage
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
use tokenops_erc1155::{interact, Erc1155Deployment, Erc1155Token, InteractionScript};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    tokenops_config_common::init_logging();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(target: "tokenops_erc1155", "{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    let token = attach(&config).await?;

    let script = InteractionScript {
        recipient: config.recipient,
        nft_count: U256::from(config.nft_count),
        buy_amount: U256::from(config.buy_amount),
        probe_storage: config.probe_storage,
        from_block: config.from_block,
        ..Default::default()
    };
    let report = interact::run(&token, &script).await?;

    tracing::info!(
        target: "tokenops_erc1155",
        single = report.transfers_single.len(),
        batch = report.transfers_batch.len(),
        probe_matches = report.probe.map(|p| p.matches()),
        "Interaction complete"
    );
    Ok(())
}

async fn attach(config: &Config) -> Result<Erc1155Token> {
    if config.devnet {
        let ledger: Arc<dyn Ledger> = Arc::new(Devnet::new());
        let deployer = DEV_ACCOUNTS[0];
        let (token, deployed) = Erc1155Deployment::new(deployer, U256::from(1u64))
            .deploy(ledger, deployer)
            .await
            .context("failed to deploy MyERC1155Token to the devnet")?;
        tracing::info!(target: "tokenops_erc1155", "MyERC1155Token deployed to devnet at: {}", deployed.address);
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

    tracing::info!(target: "tokenops_erc1155", network = %network.name, "Connecting to MyERC1155Token at {address}");
    Ok(Erc1155Token::attach(ledger, address, caller))
}
