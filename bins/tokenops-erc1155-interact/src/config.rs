//! Command line of `tokenops-erc1155-interact`.

use alloy::primitives::Address;
use clap::Parser;
use tokenops::DEFAULT_RECIPIENT;
use tokenops_config_common::{parse_address, NetworkArgs};

/// Run the MyERC1155Token interaction sequence
#[derive(Parser, Debug)]
#[command(name = "tokenops-erc1155-interact")]
#[command(about = "Buy and transfer tokens of a deployed MyERC1155Token", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Address of the deployed MyERC1155Token
    #[arg(long, env = "ERC1155_CONTRACT", value_parser = parse_address)]
    pub contract: Option<Address>,

    /// Receiver of the single and batch transfers
    #[arg(long, default_value_t = DEFAULT_RECIPIENT, value_parser = parse_address)]
    pub recipient: Address,

    /// Units of the NFT id bought with `buyNFT`
    #[arg(long, default_value_t = 3)]
    pub nft_count: u64,

    /// Units of the fungible id bought with `buy`
    #[arg(long, default_value_t = 10)]
    pub buy_amount: u64,

    /// Cross-check balanceOf against the raw nested balances slot
    #[arg(long)]
    pub probe_storage: bool,

    /// Deploy to an in-process devnet instead of attaching to `--contract`
    #[arg(long, conflicts_with = "contract")]
    pub devnet: bool,

    #[arg(long, default_value_t = 0)]
    pub from_block: u64,
}
