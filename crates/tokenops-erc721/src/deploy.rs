//! `MyERC721Token` deployment descriptor.

use std::sync::Arc;

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::SolValue;
use tokenops::{DeployedContract, Deployment, Ledger, Result};

use crate::token::Erc721Token;

pub const CONTRACT_NAME: &str = "MyERC721Token";

/// Owner the deployed networks were configured with.
pub const DEFAULT_BENEFICIARY: Address = address!("655453e2D0804390bbf410562060Ab8155ffC3A2");

/// Constructor arguments of `MyERC721Token(beneficiary, price)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc721Deployment {
    /// Initial owner of the contract.
    pub beneficiary: Address,
    /// Wei per minted token.
    pub price: U256,
}

impl Default for Erc721Deployment {
    fn default() -> Self {
        Self {
            beneficiary: DEFAULT_BENEFICIARY,
            price: U256::from(1u64),
        }
    }
}

impl Erc721Deployment {
    pub fn new(beneficiary: Address, price: U256) -> Self {
        Self { beneficiary, price }
    }

    pub fn constructor_args(&self) -> Bytes {
        (self.beneficiary, self.price).abi_encode_params().into()
    }

    pub fn descriptor(&self) -> Deployment {
        Deployment::new(CONTRACT_NAME, CONTRACT_NAME, self.constructor_args())
    }

    /// Deploys from `deployer` and returns a handle signed by `deployer`.
    pub async fn deploy(
        &self,
        ledger: Arc<dyn Ledger>,
        deployer: Address,
    ) -> Result<(Erc721Token, DeployedContract)> {
        let deployed = tokenops::deploy(ledger.as_ref(), deployer, &self.descriptor()).await?;
        let token = Erc721Token::attach(ledger, deployed.address, deployer);
        Ok((token, deployed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_args() {
        let args = Erc721Deployment::default().constructor_args();
        assert_eq!(args.len(), 64);
        assert_eq!(&args[12..32], DEFAULT_BENEFICIARY.as_slice());
        assert_eq!(U256::from_be_slice(&args[32..64]), U256::from(1u64));
    }
}
