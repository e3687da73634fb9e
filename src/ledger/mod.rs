//! The ledger boundary.
//!
//! A [`Ledger`] is the external execution environment this crate drives: it
//! accepts ABI-encoded calls, executes them as an opaque black box and reports
//! receipts, return data, storage words and historical logs. Two
//! implementations exist: [`RpcLedger`] for JSON-RPC networks and the in-process
//! simulator in `tokenops-devnet` used by the test suites.

pub mod rpc;

use alloy::primitives::{Address, Bytes, Log, B256, U256};
use async_trait::async_trait;

use crate::error::Result;
use crate::receipt::TxReceipt;

pub use rpc::RpcLedger;

/// A call to a deployed contract, either submitted as a transaction or
/// executed read-only.
#[derive(Debug, Clone)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub input: Bytes,
    /// Native currency attached to the call (zero for non-payable methods).
    pub value: U256,
}

/// A contract creation request.
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub from: Address,
    /// Contract name as compiled, e.g. `MyERC20Token`. Used to resolve the
    /// creation code.
    pub contract: String,
    /// ABI-encoded constructor arguments.
    pub constructor_args: Bytes,
}

/// Filter for historical log queries.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub address: Option<Address>,
    /// Event signature hash to match against `topics[0]`.
    pub topic0: Option<B256>,
    pub from_block: u64,
    /// Inclusive upper bound, `None` for the latest block.
    pub to_block: Option<u64>,
}

impl LogQuery {
    pub fn new(address: Address, topic0: B256) -> Self {
        Self {
            address: Some(address),
            topic0: Some(topic0),
            from_block: 0,
            to_block: None,
        }
    }

    pub fn from_block(mut self, block: u64) -> Self {
        self.from_block = block;
        self
    }

    pub fn to_block(mut self, block: u64) -> Self {
        self.to_block = Some(block);
        self
    }

    /// Whether a log at `block` matches this query.
    pub fn matches(&self, log: &Log, block: u64) -> bool {
        if block < self.from_block || self.to_block.is_some_and(|to| block > to) {
            return false;
        }
        if self.address.is_some_and(|address| address != log.address) {
            return false;
        }
        match self.topic0 {
            Some(topic) => log.data.topics().first() == Some(&topic),
            None => true,
        }
    }
}

/// A log returned by a historical query.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub log: Log,
    pub block_number: Option<u64>,
    pub transaction_hash: Option<B256>,
}

/// External ledger-execution environment.
///
/// Every state-changing method submits one transaction and resolves only once
/// the receipt is available. Implementations do not retry.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Human readable name of the network, for logs.
    fn name(&self) -> &str;

    /// Accounts this ledger can sign for. The first one is the deployer.
    fn signers(&self) -> Vec<Address>;

    async fn chain_id(&self) -> Result<u64>;

    async fn block_number(&self) -> Result<u64>;

    async fn native_balance(&self, account: Address) -> Result<U256>;

    /// Creates a contract and waits for the creation receipt.
    async fn deploy(&self, request: DeployRequest) -> Result<TxReceipt>;

    /// Submits a transaction and waits for its receipt.
    ///
    /// A transaction that is mined but fails is reported as
    /// [`ChainError::Reverted`](crate::ChainError::Reverted).
    async fn send(&self, request: TxRequest) -> Result<TxReceipt>;

    /// Executes a read-only call against the latest state.
    async fn call(&self, request: TxRequest) -> Result<Bytes>;

    /// Reads one raw storage word.
    async fn storage_at(&self, contract: Address, slot: U256) -> Result<U256>;

    /// Queries historical logs.
    async fn logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>>;
}
