//! Deployed-contract handles.

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use alloy::sol_types::{SolCall, SolEvent};

use crate::error::{ChainError, Result};
use crate::ledger::{Ledger, LogQuery, TxRequest};
use crate::receipt::{decode_log, EventRecord, TxReceipt};

/// Address of a deployed contract plus the identity that calls it.
///
/// The interface is supplied per call through `sol!`-generated call and event
/// types; the typed token handles in the family crates wrap this.
#[derive(Clone)]
pub struct ContractHandle {
    ledger: Arc<dyn Ledger>,
    address: Address,
    caller: Address,
}

impl ContractHandle {
    pub fn new(ledger: Arc<dyn Ledger>, address: Address, caller: Address) -> Self {
        Self {
            ledger,
            address,
            caller,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn caller(&self) -> Address {
        self.caller
    }

    pub fn ledger(&self) -> &Arc<dyn Ledger> {
        &self.ledger
    }

    /// Same contract, different signer.
    pub fn connect(&self, caller: Address) -> Self {
        Self {
            ledger: Arc::clone(&self.ledger),
            address: self.address,
            caller,
        }
    }

    /// Submits `call` and waits for the receipt.
    pub async fn send<C: SolCall + Send>(&self, call: C) -> Result<TxReceipt> {
        self.send_with_value(call, U256::ZERO).await
    }

    /// Submits a payable call carrying `value` wei and waits for the receipt.
    pub async fn send_with_value<C: SolCall + Send>(
        &self,
        call: C,
        value: U256,
    ) -> Result<TxReceipt> {
        let request = TxRequest {
            from: self.caller,
            to: self.address,
            input: call.abi_encode().into(),
            value,
        };

        match self.ledger.send(request).await {
            Ok(receipt) => {
                tracing::debug!(
                    target: "tokenops::contract",
                    contract = %self.address,
                    method = C::SIGNATURE,
                    tx = %receipt.transaction_hash,
                    block = receipt.block_number.unwrap_or(0),
                    "Transaction confirmed"
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::debug!(
                    target: "tokenops::contract",
                    contract = %self.address,
                    method = C::SIGNATURE,
                    error = %e,
                    "Transaction failed"
                );
                Err(e)
            }
        }
    }

    /// Executes a view call and decodes its return value.
    pub async fn read<C: SolCall + Send>(&self, call: C) -> Result<C::Return> {
        let request = TxRequest {
            from: self.caller,
            to: self.address,
            input: call.abi_encode().into(),
            value: U256::ZERO,
        };

        let data = self.ledger.call(request).await?;
        C::abi_decode_returns(&data)
            .map_err(|e| ChainError::Decode(format!("{}: {e}", C::SIGNATURE)))
    }

    /// Queries every `E` event this contract emitted from `from_block` on.
    pub async fn history<E: SolEvent>(&self, from_block: u64) -> Result<Vec<EventRecord<E>>> {
        let query = LogQuery::new(self.address, E::SIGNATURE_HASH).from_block(from_block);
        let entries = self.ledger.logs(&query).await?;

        let records: Vec<EventRecord<E>> = entries
            .into_iter()
            .filter_map(|entry| {
                decode_log::<E>(&entry.log).map(|event| EventRecord {
                    event,
                    address: entry.log.address,
                    block_number: entry.block_number,
                    transaction_hash: entry.transaction_hash,
                })
            })
            .collect();

        tracing::debug!(
            target: "tokenops::contract",
            contract = %self.address,
            event = E::SIGNATURE,
            count = records.len(),
            "Fetched event history"
        );

        Ok(records)
    }
}

impl fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractHandle")
            .field("ledger", &self.ledger.name())
            .field("address", &self.address)
            .field("caller", &self.caller)
            .finish()
    }
}
