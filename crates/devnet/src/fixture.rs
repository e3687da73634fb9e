//! Per-test fixture: a fresh chain and three named signers.

use std::sync::Arc;

use alloy::primitives::Address;
use tokenops::Ledger;

use crate::chain::{Devnet, DEV_ACCOUNTS};

#[derive(Clone)]
pub struct Fixture {
    pub devnet: Arc<Devnet>,
    /// Deployer and contract owner.
    pub owner: Address,
    pub addr1: Address,
    pub addr2: Address,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            devnet: Arc::new(Devnet::new()),
            owner: DEV_ACCOUNTS[0],
            addr1: DEV_ACCOUNTS[1],
            addr2: DEV_ACCOUNTS[2],
        }
    }

    pub fn ledger(&self) -> Arc<dyn Ledger> {
        self.devnet.clone()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
