//! Typed handle for a deployed `MyERC721Token`.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use tokenops::{ContractHandle, EventRecord, Ledger, Result, TxReceipt};

use crate::bindings::MyERC721Token::{self, Transfer};

/// A deployed `MyERC721Token` plus the account that signs calls to it.
#[derive(Debug, Clone)]
pub struct Erc721Token {
    contract: ContractHandle,
}

impl Erc721Token {
    /// Attaches to an already deployed instance.
    pub fn attach(ledger: Arc<dyn Ledger>, address: Address, caller: Address) -> Self {
        Self::from_handle(ContractHandle::new(ledger, address, caller))
    }

    pub fn from_handle(contract: ContractHandle) -> Self {
        Self { contract }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub fn caller(&self) -> Address {
        self.contract.caller()
    }

    pub fn handle(&self) -> &ContractHandle {
        &self.contract
    }

    /// Same token, signed by `caller`.
    pub fn connect(&self, caller: Address) -> Self {
        Self::from_handle(self.contract.connect(caller))
    }

    /// Mints `count` sequential ids to `to`, paying `value` wei.
    pub async fn mint(&self, to: Address, count: U256, value: U256) -> Result<TxReceipt> {
        self.contract
            .send_with_value(MyERC721Token::mintCall { to, count }, value)
            .await
    }

    pub async fn approve(&self, to: Address, token_id: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC721Token::approveCall {
                to,
                tokenId: token_id,
            })
            .await
    }

    pub async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<TxReceipt> {
        self.contract
            .send(MyERC721Token::setApprovalForAllCall { operator, approved })
            .await
    }

    pub async fn transfer_from(&self, from: Address, to: Address, token_id: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC721Token::transferFromCall {
                from,
                to,
                tokenId: token_id,
            })
            .await
    }

    /// `safeTransferFrom(address,address,uint256)`.
    pub async fn safe_transfer_from(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> Result<TxReceipt> {
        self.contract
            .send(MyERC721Token::safeTransferFrom_0Call {
                from,
                to,
                tokenId: token_id,
            })
            .await
    }

    /// `safeTransferFrom(address,address,uint256,bytes)`.
    pub async fn safe_transfer_from_with_data(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
        data: Bytes,
    ) -> Result<TxReceipt> {
        self.contract
            .send(MyERC721Token::safeTransferFrom_1Call {
                from,
                to,
                tokenId: token_id,
                data,
            })
            .await
    }

    pub async fn balance_of(&self, owner: Address) -> Result<U256> {
        self.contract
            .read(MyERC721Token::balanceOfCall { owner })
            .await
    }

    pub async fn owner_of(&self, token_id: U256) -> Result<Address> {
        self.contract
            .read(MyERC721Token::ownerOfCall { tokenId: token_id })
            .await
    }

    pub async fn get_approved(&self, token_id: U256) -> Result<Address> {
        self.contract
            .read(MyERC721Token::getApprovedCall { tokenId: token_id })
            .await
    }

    pub async fn is_approved_for_all(&self, owner: Address, operator: Address) -> Result<bool> {
        self.contract
            .read(MyERC721Token::isApprovedForAllCall { owner, operator })
            .await
    }

    /// Number of ids minted so far.
    pub async fn total_mint(&self) -> Result<U256> {
        self.contract.read(MyERC721Token::totalMintCall {}).await
    }

    pub async fn max_elements(&self) -> Result<U256> {
        self.contract.read(MyERC721Token::MAX_ELEMENTSCall {}).await
    }

    pub async fn price(&self) -> Result<U256> {
        self.contract.read(MyERC721Token::priceCall {}).await
    }

    pub async fn owner(&self) -> Result<Address> {
        self.contract.read(MyERC721Token::ownerCall {}).await
    }

    pub async fn name(&self) -> Result<String> {
        self.contract.read(MyERC721Token::nameCall {}).await
    }

    pub async fn symbol(&self) -> Result<String> {
        self.contract.read(MyERC721Token::symbolCall {}).await
    }

    /// Every `Transfer` this token emitted from `from_block` on.
    pub async fn transfers(&self, from_block: u64) -> Result<Vec<EventRecord<Transfer>>> {
        self.contract.history::<Transfer>(from_block).await
    }
}
