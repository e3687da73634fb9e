//! In-process chain.
//!
//! Automines one block per transaction. A transaction that reverts or is
//! rejected is not mined: all state, including the sender's nonce, is restored
//! from the snapshot taken before execution.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use alloy::primitives::{address, keccak256, Address, Bytes, Log, B256, U256};
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use tokenops::{
    ChainError, DeployRequest, Ledger, LogEntry, LogQuery, Result, TxReceipt, TxRequest,
};

use crate::contracts;
use crate::model::{CallContext, ContractModel, ModelFactory};

pub const CHAIN_ID: u64 = 31337;

/// Native balance of every dev account at genesis: 10 000 ETH.
pub const DEV_ACCOUNT_BALANCE: u128 = 10_000 * 1_000_000_000_000_000_000;

/// The standard Hardhat/Anvil development accounts.
pub const DEV_ACCOUNTS: [Address; 10] = [
    address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
    address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
    address!("3C44CdDdB6a900fa2b585dd299e03d12FA4293BC"),
    address!("90F79bf6EB2c4f870365E785982E1f101E93b906"),
    address!("15d34AAf54267DB7D7c367839AAf71A00a2C6A65"),
    address!("9965507D1a55bcC2695C58ba16FB37d819B0A4dc"),
    address!("976EA74026E726554dB657fA54763abd0C3a0aa9"),
    address!("14dC79964da2C08b23698B3D3cc7Ca32193d9955"),
    address!("23618e81E3f5cdF7f54C3d65f7FBc0aBf5B21E8f"),
    address!("a0Ee7A142d267C1f36714E4a8F75612F20a79720"),
];

#[derive(Debug, Clone, Default)]
struct Account {
    balance: U256,
    nonce: u64,
}

#[derive(Clone, Default)]
struct ChainState {
    block_number: u64,
    accounts: HashMap<Address, Account>,
    contracts: HashMap<Address, Box<dyn ContractModel>>,
    logs: Vec<LogEntry>,
}

impl ChainState {
    fn code_addresses(&self) -> HashSet<Address> {
        self.contracts.keys().copied().collect()
    }

    fn transfer_value(&mut self, from: Address, to: Address, value: U256) -> Result<()> {
        if value.is_zero() {
            return Ok(());
        }
        let sender = self.accounts.entry(from).or_default();
        if sender.balance < value {
            return Err(ChainError::rejected(format!(
                "insufficient funds for value transfer: balance {}, value {}",
                sender.balance, value
            )));
        }
        sender.balance -= value;
        self.accounts.entry(to).or_default().balance += value;
        Ok(())
    }

    /// Runs `input` on the contract at `to`, if any. Plain accounts accept
    /// any call and return nothing.
    fn execute(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
        input: &[u8],
    ) -> Result<(Bytes, Vec<Log>)> {
        let Some(mut model) = self.contracts.remove(&to) else {
            return Ok((Bytes::new(), Vec::new()));
        };

        let mut code = self.code_addresses();
        code.insert(to);
        let mut ctx = CallContext::new(to, from, value, self.block_number + 1, code);
        let result = model.execute(&mut ctx, input);
        self.contracts.insert(to, model);

        let output = result.map_err(ChainError::from)?;
        Ok((output, ctx.into_logs()))
    }

    /// Mines the pending transaction into the next block.
    fn mine(&mut self, from: Address, hash: B256, logs: &[Log]) -> u64 {
        self.block_number += 1;
        self.accounts.entry(from).or_default().nonce += 1;
        for log in logs {
            self.logs.push(LogEntry {
                log: log.clone(),
                block_number: Some(self.block_number),
                transaction_hash: Some(hash),
            });
        }
        self.block_number
    }
}

/// In-process [`Ledger`] hosting native contract models.
pub struct Devnet {
    name: String,
    chain_id: u64,
    signers: Vec<Address>,
    factories: HashMap<String, ModelFactory>,
    state: Mutex<ChainState>,
}

impl Default for Devnet {
    fn default() -> Self {
        Self::new()
    }
}

impl Devnet {
    /// A fresh chain with the token contract models registered and the dev
    /// accounts funded.
    pub fn new() -> Self {
        contracts::builtin()
            .into_iter()
            .fold(Self::empty(), |devnet, (name, factory)| {
                devnet.with_model(name, factory)
            })
    }

    /// A fresh chain with funded dev accounts and no contract models.
    pub fn empty() -> Self {
        let accounts = DEV_ACCOUNTS
            .iter()
            .map(|&address| {
                let account = Account {
                    balance: U256::from(DEV_ACCOUNT_BALANCE),
                    nonce: 0,
                };
                (address, account)
            })
            .collect();

        Self {
            name: "devnet".to_string(),
            chain_id: CHAIN_ID,
            signers: DEV_ACCOUNTS.to_vec(),
            factories: HashMap::new(),
            state: Mutex::new(ChainState {
                accounts,
                ..ChainState::default()
            }),
        }
    }

    /// Registers the constructor of `contract`.
    pub fn with_model(mut self, contract: impl Into<String>, factory: ModelFactory) -> Self {
        self.factories.insert(contract.into(), factory);
        self
    }

    /// Overrides the native balance of `account`.
    pub fn set_balance(&self, account: Address, balance: U256) -> Result<()> {
        self.state()?.accounts.entry(account).or_default().balance = balance;
        Ok(())
    }

    fn state(&self) -> Result<MutexGuard<'_, ChainState>> {
        self.state
            .lock()
            .map_err(|_| ChainError::Transport("devnet state lock poisoned".to_string()))
    }

    fn ensure_signer(&self, from: Address) -> Result<()> {
        if self.signers.contains(&from) {
            Ok(())
        } else {
            Err(ChainError::rejected(format!("unknown account {from}")))
        }
    }

    fn apply_deploy(&self, request: &DeployRequest) -> Result<TxReceipt> {
        self.ensure_signer(request.from)?;
        let factory = *self.factories.get(&request.contract).ok_or_else(|| {
            ChainError::rejected(format!(
                "no contract model registered for '{}'",
                request.contract
            ))
        })?;

        let mut state = self.state()?;
        let nonce = state
            .accounts
            .get(&request.from)
            .map_or(0, |account| account.nonce);
        let address = request.from.create(nonce);
        let hash = transaction_hash(request.from, nonce, Address::ZERO, &request.constructor_args);

        let mut code = state.code_addresses();
        code.insert(address);
        let mut ctx = CallContext::new(address, request.from, U256::ZERO, state.block_number + 1, code);

        let model = match factory(&mut ctx, &request.constructor_args) {
            Ok(model) => model,
            Err(revert) => {
                tracing::debug!(
                    target: "tokenops_devnet::chain",
                    contract = %request.contract,
                    reason = ?revert.reason,
                    "Constructor reverted"
                );
                return Err(revert.into());
            }
        };

        state.contracts.insert(address, model);
        let logs = ctx.into_logs();
        let block = state.mine(request.from, hash, &logs);

        tracing::debug!(
            target: "tokenops_devnet::chain",
            contract = %request.contract,
            address = %address,
            block,
            "Contract created"
        );

        Ok(TxReceipt {
            transaction_hash: hash,
            block_number: Some(block),
            status: true,
            gas_used: intrinsic_gas(&request.constructor_args) + 32_000,
            contract_address: Some(address),
            logs,
        })
    }

    fn apply_send(&self, request: &TxRequest) -> Result<TxReceipt> {
        self.ensure_signer(request.from)?;

        let mut state = self.state()?;
        let snapshot = state.clone();
        let nonce = state
            .accounts
            .get(&request.from)
            .map_or(0, |account| account.nonce);
        let hash = transaction_hash(request.from, nonce, request.to, &request.input);

        let outcome = state
            .transfer_value(request.from, request.to, request.value)
            .and_then(|()| {
                state.execute(request.from, request.to, request.value, &request.input)
            });

        let logs = match outcome {
            Ok((_, logs)) => logs,
            Err(err) => {
                *state = snapshot;
                tracing::debug!(
                    target: "tokenops_devnet::chain",
                    from = %request.from,
                    to = %request.to,
                    error = %err,
                    "Transaction not mined"
                );
                return Err(err);
            }
        };

        let block = state.mine(request.from, hash, &logs);
        Ok(TxReceipt {
            transaction_hash: hash,
            block_number: Some(block),
            status: true,
            gas_used: intrinsic_gas(&request.input),
            contract_address: None,
            logs,
        })
    }

    fn apply_call(&self, request: &TxRequest) -> Result<Bytes> {
        // Runs against a copy; nothing a call does is kept.
        let mut state = self.state()?.clone();
        state.transfer_value(request.from, request.to, request.value)?;
        let (output, _) = state.execute(request.from, request.to, request.value, &request.input)?;
        Ok(output)
    }
}

#[async_trait]
impl Ledger for Devnet {
    fn name(&self) -> &str {
        &self.name
    }

    fn signers(&self) -> Vec<Address> {
        self.signers.clone()
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(self.chain_id)
    }

    async fn block_number(&self) -> Result<u64> {
        Ok(self.state()?.block_number)
    }

    async fn native_balance(&self, account: Address) -> Result<U256> {
        Ok(self
            .state()?
            .accounts
            .get(&account)
            .map_or(U256::ZERO, |a| a.balance))
    }

    async fn deploy(&self, request: DeployRequest) -> Result<TxReceipt> {
        self.apply_deploy(&request)
    }

    async fn send(&self, request: TxRequest) -> Result<TxReceipt> {
        self.apply_send(&request)
    }

    async fn call(&self, request: TxRequest) -> Result<Bytes> {
        self.apply_call(&request)
    }

    async fn storage_at(&self, contract: Address, slot: U256) -> Result<U256> {
        Ok(self
            .state()?
            .contracts
            .get(&contract)
            .map_or(U256::ZERO, |model| model.storage_at(slot)))
    }

    async fn logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>> {
        Ok(self
            .state()?
            .logs
            .iter()
            .filter(|entry| query.matches(&entry.log, entry.block_number.unwrap_or(0)))
            .cloned()
            .collect())
    }
}

/// 21000 plus 16 gas per non-zero and 4 per zero calldata byte.
fn intrinsic_gas(input: &[u8]) -> u64 {
    input.iter().fold(21_000, |gas, byte| {
        gas + if *byte == 0 { 4 } else { 16 }
    })
}

fn transaction_hash(from: Address, nonce: u64, to: Address, input: &[u8]) -> B256 {
    keccak256((from, nonce, to, Bytes::copy_from_slice(input)).abi_encode())
}
