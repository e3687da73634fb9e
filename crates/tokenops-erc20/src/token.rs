//! Typed handle for a deployed `MyERC20Token`.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use tokenops::{ContractHandle, EventRecord, Ledger, Result, TxReceipt};

use crate::bindings::MyERC20Token::{self, Transfer};

/// A deployed `MyERC20Token` plus the account that signs calls to it.
#[derive(Debug, Clone)]
pub struct Erc20Token {
    contract: ContractHandle,
}

impl Erc20Token {
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

    pub async fn mint(&self, to: Address, amount: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::mintCall { to, amount })
            .await
    }

    /// Mints a non-zero amount.
    pub async fn safe_mint(&self, to: Address, amount: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::safeMintCall { to, amount })
            .await
    }

    /// Transfers `value`, minus the transfer fee, to `to`.
    pub async fn transfer(&self, to: Address, value: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::transferCall { to, value })
            .await
    }

    /// Like [`transfer`](Self::transfer) but refuses the zero address and the
    /// token contract itself as recipients.
    pub async fn safe_transfer(&self, to: Address, amount: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::safeTransferCall { to, amount })
            .await
    }

    pub async fn approve(&self, spender: Address, value: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::approveCall { spender, value })
            .await
    }

    pub async fn transfer_from(&self, from: Address, to: Address, value: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::transferFromCall { from, to, value })
            .await
    }

    /// Buys `value / price` tokens from the contract's own balance.
    pub async fn buy(&self, value: U256) -> Result<TxReceipt> {
        self.contract
            .send_with_value(MyERC20Token::buyCall {}, value)
            .await
    }

    /// Mints sale inventory to the contract. Owner only.
    pub async fn fund_contract(&self, amount: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::fundContractCall { amount })
            .await
    }

    pub async fn set_transfer_fee_percentage(&self, percentage: U256) -> Result<TxReceipt> {
        self.contract
            .send(MyERC20Token::setTransferFeePercentageCall { percentage })
            .await
    }

    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        self.contract
            .read(MyERC20Token::balanceOfCall { account })
            .await
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        self.contract
            .read(MyERC20Token::allowanceCall { owner, spender })
            .await
    }

    pub async fn total_supply(&self) -> Result<U256> {
        self.contract.read(MyERC20Token::totalSupplyCall {}).await
    }

    pub async fn name(&self) -> Result<String> {
        self.contract.read(MyERC20Token::nameCall {}).await
    }

    pub async fn symbol(&self) -> Result<String> {
        self.contract.read(MyERC20Token::symbolCall {}).await
    }

    pub async fn decimals(&self) -> Result<u8> {
        self.contract.read(MyERC20Token::decimalsCall {}).await
    }

    pub async fn owner(&self) -> Result<Address> {
        self.contract.read(MyERC20Token::ownerCall {}).await
    }

    pub async fn price(&self) -> Result<U256> {
        self.contract.read(MyERC20Token::priceCall {}).await
    }

    pub async fn transfer_fee_percentage(&self) -> Result<U256> {
        self.contract
            .read(MyERC20Token::transferFeePercentageCall {})
            .await
    }

    /// Every `Transfer` this token emitted from `from_block` on.
    pub async fn transfers(&self, from_block: u64) -> Result<Vec<EventRecord<Transfer>>> {
        self.contract.history::<Transfer>(from_block).await
    }
}
