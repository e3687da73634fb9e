//! Typed handle for a deployed `MyERC1155Token`.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use tokenops::{ContractHandle, EventRecord, Ledger, Result, TxReceipt};

use crate::bindings::MyERC1155Token::{self, TransferBatch, TransferSingle};

/// Fungible unit sold by `buy`.
pub const TOKEN_ID: u64 = 0;
/// Capped collectible minted by `buyNFT`.
pub const NFT_ID: u64 = 1;

/// A deployed `MyERC1155Token` plus the account that signs calls to it.
#[derive(Debug, Clone)]
pub struct Erc1155Token {
    contract: ContractHandle,
}

impl Erc1155Token {
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

    /// Buys `amount` units of [`TOKEN_ID`] for `to` from the contract's stock.
    pub async fn buy(&self, to: Address, amount: U256, value: U256) -> Result<TxReceipt> {
        self.contract
            .send_with_value(MyERC1155Token::buyCall { to, amount }, value)
            .await
    }

    /// Mints `count` units of [`NFT_ID`] to `to`.
    pub async fn buy_nft(&self, to: Address, count: U256, value: U256) -> Result<TxReceipt> {
        self.contract
            .send_with_value(MyERC1155Token::buyNFTCall { to, count }, value)
            .await
    }

    /// Owner only.
    pub async fn mint_batch(
        &self,
        to: Address,
        ids: Vec<U256>,
        amounts: Vec<U256>,
        data: Bytes,
    ) -> Result<TxReceipt> {
        self.contract
            .send(MyERC1155Token::mintBatchCall {
                to,
                ids,
                amounts,
                data,
            })
            .await
    }

    pub async fn set_approval_for_all(&self, operator: Address, approved: bool) -> Result<TxReceipt> {
        self.contract
            .send(MyERC1155Token::setApprovalForAllCall { operator, approved })
            .await
    }

    pub async fn safe_transfer_from(
        &self,
        from: Address,
        to: Address,
        id: U256,
        value: U256,
        data: Bytes,
    ) -> Result<TxReceipt> {
        self.contract
            .send(MyERC1155Token::safeTransferFromCall {
                from,
                to,
                id,
                value,
                data,
            })
            .await
    }

    pub async fn safe_batch_transfer_from(
        &self,
        from: Address,
        to: Address,
        ids: Vec<U256>,
        values: Vec<U256>,
        data: Bytes,
    ) -> Result<TxReceipt> {
        self.contract
            .send(MyERC1155Token::safeBatchTransferFromCall {
                from,
                to,
                ids,
                values,
                data,
            })
            .await
    }

    pub async fn balance_of(&self, account: Address, id: U256) -> Result<U256> {
        self.contract
            .read(MyERC1155Token::balanceOfCall { account, id })
            .await
    }

    pub async fn balance_of_batch(&self, accounts: Vec<Address>, ids: Vec<U256>) -> Result<Vec<U256>> {
        self.contract
            .read(MyERC1155Token::balanceOfBatchCall { accounts, ids })
            .await
    }

    pub async fn is_approved_for_all(&self, account: Address, operator: Address) -> Result<bool> {
        self.contract
            .read(MyERC1155Token::isApprovedForAllCall { account, operator })
            .await
    }

    pub async fn uri(&self, id: U256) -> Result<String> {
        self.contract.read(MyERC1155Token::uriCall { id }).await
    }

    pub async fn owner(&self) -> Result<Address> {
        self.contract.read(MyERC1155Token::ownerCall {}).await
    }

    pub async fn price(&self) -> Result<U256> {
        self.contract.read(MyERC1155Token::priceCall {}).await
    }

    pub async fn max_elements(&self) -> Result<U256> {
        self.contract.read(MyERC1155Token::MAX_ELEMENTSCall {}).await
    }

    pub async fn transfers_single(&self, from_block: u64) -> Result<Vec<EventRecord<TransferSingle>>> {
        self.contract.history::<TransferSingle>(from_block).await
    }

    pub async fn transfers_batch(&self, from_block: u64) -> Result<Vec<EventRecord<TransferBatch>>> {
        self.contract.history::<TransferBatch>(from_block).await
    }
}
