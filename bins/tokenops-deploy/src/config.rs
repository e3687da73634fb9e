//! Command line of `tokenops-deploy`.

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use tokenops::Deployment;
use tokenops_config_common::{parse_address, NetworkArgs};
use tokenops_erc1155::Erc1155Deployment;
use tokenops_erc20::Erc20Deployment;
use tokenops_erc721::Erc721Deployment;

/// Deploy the token contracts and verify their sources
#[derive(Parser, Debug)]
#[command(name = "tokenops-deploy")]
#[command(about = "Deploy MyERC20Token, MyERC721Token or MyERC1155Token", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub network: NetworkArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Deploy(TokenArgs),

    /// Submit source verification for a deployed contract
    Verify(VerifyArgs),

    /// Check the status of a submitted verification
    VerifyStatus {
        /// Job id returned by `verify`
        #[arg(long)]
        guid: String,
    },
}

/// One deployable contract with its constructor arguments.
#[derive(Subcommand, Debug, Clone)]
pub enum TokenArgs {
    /// MyERC20Token(beneficiary, price, transferFeePercentage)
    Erc20 {
        #[arg(long, default_value_t = tokenops_erc20::DEFAULT_BENEFICIARY, value_parser = parse_address)]
        beneficiary: Address,

        /// Wei per token
        #[arg(long, default_value_t = 1)]
        price: u128,

        /// Percentage of each transfer kept by the contract (0-100)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=100))]
        fee: u8,
    },

    /// MyERC721Token(beneficiary, price)
    Erc721 {
        #[arg(long, default_value_t = tokenops_erc721::DEFAULT_BENEFICIARY, value_parser = parse_address)]
        beneficiary: Address,

        /// Wei per minted token
        #[arg(long, default_value_t = 1)]
        price: u128,
    },

    /// MyERC1155Token(beneficiary, price)
    Erc1155 {
        #[arg(long, default_value_t = tokenops_erc1155::DEFAULT_BENEFICIARY, value_parser = parse_address)]
        beneficiary: Address,

        /// Wei per unit
        #[arg(long, default_value_t = 1)]
        price: u128,
    },
}

impl TokenArgs {
    pub fn deployment(&self) -> Deployment {
        match *self {
            Self::Erc20 {
                beneficiary,
                price,
                fee,
            } => Erc20Deployment::new(beneficiary, U256::from(price), U256::from(fee)).descriptor(),
            Self::Erc721 { beneficiary, price } => {
                Erc721Deployment::new(beneficiary, U256::from(price)).descriptor()
            }
            Self::Erc1155 { beneficiary, price } => {
                Erc1155Deployment::new(beneficiary, U256::from(price)).descriptor()
            }
        }
    }
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Address of the deployed contract
    #[arg(long, value_parser = parse_address)]
    pub address: Address,

    /// Solc standard JSON input the contract was compiled from
    /// (the `input` of a Hardhat build-info file)
    #[arg(long)]
    pub standard_json: PathBuf,

    /// Query the verification status once after submitting
    #[arg(long)]
    pub check: bool,

    /// Contract and the constructor arguments it was deployed with
    #[command(subcommand)]
    pub token: TokenArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee_of(args: &[&str]) -> Result<u8, clap::Error> {
        let config = Config::try_parse_from(args)?;
        match config.command {
            Command::Deploy(TokenArgs::Erc20 { fee, .. }) => Ok(fee),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_erc20_fee_bounds() {
        assert_eq!(fee_of(&["tokenops-deploy", "erc20"]).unwrap(), 1);
        assert_eq!(fee_of(&["tokenops-deploy", "erc20", "--fee", "100"]).unwrap(), 100);
        assert!(fee_of(&["tokenops-deploy", "erc20", "--fee", "101"]).is_err());
        assert!(fee_of(&["tokenops-deploy", "erc20", "--fee", "200"]).is_err());
    }
}
