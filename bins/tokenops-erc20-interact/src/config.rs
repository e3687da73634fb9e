//! Command line of `tokenops-erc20-interact`.

use alloy::primitives::Address;
use clap::Parser;
use tokenops::DEFAULT_RECIPIENT;
use tokenops_config_common::{parse_address, NetworkArgs};

/// Run the MyERC20Token interaction sequence
#[derive(Parser, Debug)]
#[command(name = "tokenops-erc20-interact")]
#[command(about = "Mint, transfer, buy and inspect a deployed MyERC20Token", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Address of the deployed MyERC20Token
    #[arg(long, env = "ERC20_CONTRACT", value_parser = parse_address)]
    pub contract: Option<Address>,

    /// Receiver of the transfers
    #[arg(long, default_value_t = DEFAULT_RECIPIENT, value_parser = parse_address)]
    pub recipient: Address,

    /// Cross-check balanceOf against the raw balances storage slot
    #[arg(long)]
    pub probe_storage: bool,

    /// Deploy to an in-process devnet instead of attaching to `--contract`
    #[arg(long, conflicts_with = "contract")]
    pub devnet: bool,

    /// First block of the Transfer history query
    #[arg(long, default_value_t = 0)]
    pub from_block: u64,
}
