//! Contract model interface.
//!
//! A model stands in for one deployed contract's bytecode: it receives raw
//! calldata, mutates its own state and answers with ABI-encoded return data or
//! a revert. The chain snapshots every model before a transaction and restores
//! the snapshot when the model reverts.

use std::collections::HashSet;
use std::fmt;

use alloy::primitives::{Address, Bytes, Log, U256};
use alloy::sol_types::{SolEvent, SolValue};
use tokenops::ChainError;

/// A failed contract execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revert {
    pub reason: Option<String>,
}

impl Revert {
    /// `revert("message")` / `require(cond, "message")`.
    pub fn message(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// A custom error, rendered as `Name(arg, ...)`.
    pub fn custom(name: &str, args: &[&dyn fmt::Display]) -> Self {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        Self::message(format!("{name}({})", args.join(", ")))
    }

    /// `Panic(uint256)` raised by checked arithmetic.
    pub fn panic(code: u8) -> Self {
        Self::message(format!("Panic(0x{code:02x})"))
    }

    /// A revert without data, e.g. an unknown selector.
    pub fn empty() -> Self {
        Self { reason: None }
    }
}

impl From<Revert> for ChainError {
    fn from(revert: Revert) -> Self {
        ChainError::Reverted {
            reason: revert.reason,
        }
    }
}

pub type ExecResult<T> = std::result::Result<T, Revert>;

/// `require(condition, reason)`.
pub fn require(condition: bool, reason: &str) -> ExecResult<()> {
    if condition {
        Ok(())
    } else {
        Err(Revert::message(reason))
    }
}

/// ABI-encodes a single return value.
pub fn returns<T: SolValue>(value: T) -> Bytes {
    value.abi_encode().into()
}

/// Checked `a * b`, reverting with the arithmetic overflow panic.
pub fn mul(a: U256, b: U256) -> ExecResult<U256> {
    a.checked_mul(b).ok_or_else(|| Revert::panic(0x11))
}

/// Checked `a + b`, reverting with the arithmetic overflow panic.
pub fn add(a: U256, b: U256) -> ExecResult<U256> {
    a.checked_add(b).ok_or_else(|| Revert::panic(0x11))
}

/// Checked `a - b`, reverting with the arithmetic underflow panic.
pub fn sub(a: U256, b: U256) -> ExecResult<U256> {
    a.checked_sub(b).ok_or_else(|| Revert::panic(0x11))
}

/// Execution environment of one call frame.
#[derive(Debug)]
pub struct CallContext {
    /// Address of the executing contract.
    pub this: Address,
    /// `msg.sender`.
    pub sender: Address,
    /// `msg.value`, already credited to `this`.
    pub value: U256,
    pub block_number: u64,
    code: HashSet<Address>,
    logs: Vec<Log>,
}

impl CallContext {
    pub fn new(
        this: Address,
        sender: Address,
        value: U256,
        block_number: u64,
        code: HashSet<Address>,
    ) -> Self {
        Self {
            this,
            sender,
            value,
            block_number,
            code,
            logs: Vec::new(),
        }
    }

    /// Whether `account` holds contract code.
    pub fn has_code(&self, account: Address) -> bool {
        account == self.this || self.code.contains(&account)
    }

    /// Emits `event` from the executing contract.
    pub fn emit<E: SolEvent>(&mut self, event: &E) {
        self.logs.push(Log {
            address: self.this,
            data: event.encode_log_data(),
        });
    }

    pub fn into_logs(self) -> Vec<Log> {
        self.logs
    }
}

/// Native stand-in for one deployed contract.
pub trait ContractModel: Send + Sync {
    fn contract_name(&self) -> &'static str;

    /// Executes `input` calldata in `ctx`.
    fn execute(&mut self, ctx: &mut CallContext, input: &[u8]) -> ExecResult<Bytes>;

    /// Raw storage word at `slot` under the contract's storage layout.
    fn storage_at(&self, slot: U256) -> U256;

    fn clone_model(&self) -> Box<dyn ContractModel>;
}

impl Clone for Box<dyn ContractModel> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

/// Runs a constructor with ABI-encoded arguments.
pub type ModelFactory = fn(&mut CallContext, &[u8]) -> ExecResult<Box<dyn ContractModel>>;
