//! Command line of `tokenops-erc721-interact`.

use alloy::primitives::Address;
use clap::Parser;
use tokenops::DEFAULT_RECIPIENT;
use tokenops_config_common::{parse_address, NetworkArgs};

/// Run the MyERC721Token interaction sequence
#[derive(Parser, Debug)]
#[command(name = "tokenops-erc721-interact")]
#[command(about = "Mint and transfer tokens of a deployed MyERC721Token", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Address of the deployed MyERC721Token
    #[arg(long, env = "ERC721_CONTRACT", value_parser = parse_address)]
    pub contract: Option<Address>,

    /// Receiver of the approved transfers
    #[arg(long, default_value_t = DEFAULT_RECIPIENT, value_parser = parse_address)]
    pub recipient: Address,

    /// Tokens to mint (at least 3)
    #[arg(long, default_value_t = 4)]
    pub mint_count: u64,

    /// Cross-check balanceOf against the raw balances storage slot
    #[arg(long)]
    pub probe_storage: bool,

    /// Deploy to an in-process devnet instead of attaching to `--contract`
    #[arg(long, conflicts_with = "contract")]
    pub devnet: bool,

    #[arg(long, default_value_t = 0)]
    pub from_block: u64,
}
