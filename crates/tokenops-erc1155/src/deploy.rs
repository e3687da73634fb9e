//! `MyERC1155Token` deployment descriptor.

use std::sync::Arc;

use alloy::primitives::{address, Address, Bytes, U256};
use alloy::sol_types::SolValue;
use tokenops::{DeployedContract, Deployment, Ledger, Result};

use crate::token::Erc1155Token;

pub const CONTRACT_NAME: &str = "MyERC1155Token";

/// Owner the deployed networks were configured with.
pub const DEFAULT_BENEFICIARY: Address = address!("655453e2D0804390bbf410562060Ab8155ffC3A2");

/// Constructor arguments of `MyERC1155Token(beneficiary, price)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Erc1155Deployment {
    /// Initial owner of the contract.
    pub beneficiary: Address,
    /// Wei per unit, for both ids on sale.
    pub price: U256,
}

impl Default for Erc1155Deployment {
    fn default() -> Self {
        Self {
            beneficiary: DEFAULT_BENEFICIARY,
            price: U256::from(1u64),
        }
    }
}

impl Erc1155Deployment {
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
    ) -> Result<(Erc1155Token, DeployedContract)> {
        let deployed = tokenops::deploy(ledger.as_ref(), deployer, &self.descriptor()).await?;
        let token = Erc1155Token::attach(ledger, deployed.address, deployer);
        Ok((token, deployed))
    }
}
