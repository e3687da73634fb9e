//! `MyERC20Token` deployment descriptor.

use std::sync::Arc;

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::SolValue;
use tokenops::{DeployedContract, Deployment, Ledger, Result};

use crate::token::Erc20Token;

pub const CONTRACT_NAME: &str = "MyERC20Token";

/// Owner the deployed networks were configured with.
pub const DEFAULT_BENEFICIARY: Address = address!("655453e2D0804390bbf410562060Ab8155ffC3A2");

/// Constructor arguments of `MyERC20Token(beneficiary, price, transferFeePercentage)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc20Deployment {
    /// Initial owner. Receives the initial supply and administers the sale.
    pub beneficiary: Address,
    /// Wei per token.
    pub price: U256,
    /// Percentage of every transfer kept by the contract.
    pub transfer_fee_percentage: U256,
}

impl Default for Erc20Deployment {
    fn default() -> Self {
        Self {
            beneficiary: DEFAULT_BENEFICIARY,
            price: U256::from(1u64),
            transfer_fee_percentage: U256::from(1u64),
        }
    }
}

impl Erc20Deployment {
    pub fn new(beneficiary: Address, price: U256, transfer_fee_percentage: U256) -> Self {
        Self {
            beneficiary,
            price,
            transfer_fee_percentage,
        }
    }

    pub fn constructor_args(&self) -> Bytes {
        (self.beneficiary, self.price, self.transfer_fee_percentage)
            .abi_encode_params()
            .into()
    }

    pub fn descriptor(&self) -> Deployment {
        Deployment::new(CONTRACT_NAME, CONTRACT_NAME, self.constructor_args())
    }

    /// Deploys from `deployer` and returns a handle signed by `deployer`.
    pub async fn deploy(
        &self,
        ledger: Arc<dyn Ledger>,
        deployer: Address,
    ) -> Result<(Erc20Token, DeployedContract)> {
        let deployed = tokenops::deploy(ledger.as_ref(), deployer, &self.descriptor()).await?;
        let token = Erc20Token::attach(ledger, deployed.address, deployer);
        Ok((token, deployed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let deployment = Erc20Deployment::default();
        assert_eq!(deployment.beneficiary, DEFAULT_BENEFICIARY);
        assert_eq!(deployment.price, U256::from(1u64));
        assert_eq!(deployment.transfer_fee_percentage, U256::from(1u64));
    }

    #[test]
    fn test_constructor_args_are_abi_encoded() {
        let deployment = Erc20Deployment::new(DEFAULT_BENEFICIARY, U256::from(10u64), U256::from(2u64));
        let args = deployment.constructor_args();

        assert_eq!(args.len(), 96);
        assert_eq!(&args[12..32], DEFAULT_BENEFICIARY.as_slice());
        assert_eq!(U256::from_be_slice(&args[32..64]), U256::from(10u64));
        assert_eq!(U256::from_be_slice(&args[64..96]), U256::from(2u64));

        let descriptor = deployment.descriptor();
        assert_eq!(descriptor.contract, CONTRACT_NAME);
        assert_eq!(descriptor.constructor_args, args);
    }
}
