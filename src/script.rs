//! Step bookkeeping shared by the interaction scripts.
//!
//! A script is a fixed list of state-changing calls. Each one is submitted,
//! awaited for its receipt and recorded before the next starts; the first
//! failure aborts the run with the step name attached.

use std::future::Future;

use alloy::primitives::{address, Address, B256};
use anyhow::{Context, Result};

use crate::receipt::TxReceipt;

/// Recipient used by the interaction scripts when none is given.
pub const DEFAULT_RECIPIENT: Address = address!("F9bD56EE66BdD4C3F4a82A1a45fF99b48A33A9c7");

/// A confirmed script step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: &'static str,
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
}

/// Ordered record of the steps a script has completed.
#[derive(Debug, Clone, Default)]
pub struct StepLog {
    records: Vec<StepRecord>,
}

impl StepLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Awaits one submission and records it.
    pub async fn run<F>(&mut self, name: &'static str, submission: F) -> Result<TxReceipt>
    where
        F: Future<Output = crate::Result<TxReceipt>>,
    {
        let receipt = submission
            .await
            .with_context(|| format!("step '{name}' failed"))?;

        tracing::debug!(
            target: "tokenops::script",
            step = name,
            tx = %receipt.transaction_hash,
            block = receipt.block_number.unwrap_or(0),
            gas_used = receipt.gas_used,
            "Step confirmed"
        );

        self.records.push(StepRecord {
            name,
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
        });
        Ok(receipt)
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }

    /// Names of the completed steps, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.records.iter().map(|r| r.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChainError;

    fn receipt(block: u64) -> TxReceipt {
        TxReceipt {
            transaction_hash: B256::repeat_byte(block as u8),
            block_number: Some(block),
            status: true,
            gas_used: 21_000,
            contract_address: None,
            logs: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_steps_are_recorded_in_order() {
        let mut log = StepLog::new();
        log.run("mint", async { Ok(receipt(1)) }).await.unwrap();
        log.run("transfer", async { Ok(receipt(2)) }).await.unwrap();

        assert_eq!(log.names(), vec!["mint", "transfer"]);
        assert_eq!(log.records()[1].block_number, Some(2));
    }

    #[tokio::test]
    async fn test_failed_step_carries_name_and_is_not_recorded() {
        let mut log = StepLog::new();
        let err = log
            .run("buy", async { Err(ChainError::reverted("Max limit")) })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "step 'buy' failed");
        assert_eq!(
            err.downcast_ref::<ChainError>().and_then(ChainError::revert_reason),
            Some("Max limit")
        );
        assert!(log.records().is_empty());
    }
}
