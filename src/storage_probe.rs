//! Advisory raw-storage balance probe.
//!
//! Recomputes the storage key of a balance mapping entry and reads the word
//! directly. The key depends on the contract's storage layout, which is assumed
//! rather than verified, so the probe is diagnostic only: it is always paired
//! with the contract's own `balanceOf` and a mismatch is reported, not acted on.

use alloy::primitives::{keccak256, Address, U256};

use crate::error::Result;
use crate::ledger::Ledger;

/// Assumed position of a balance mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceLayout {
    /// `mapping(address => uint256)` declared at `slot`.
    Flat { slot: u64 },
    /// `mapping(uint256 => mapping(address => uint256))` declared at `slot`,
    /// read at token `id`.
    Nested { slot: u64, id: U256 },
}

impl BalanceLayout {
    /// Storage key holding `account`'s balance under this layout.
    pub fn key_for(&self, account: Address) -> U256 {
        match *self {
            Self::Flat { slot } => mapping_slot(account, U256::from(slot)),
            Self::Nested { slot, id } => {
                let outer = uint_mapping_slot(id, U256::from(slot));
                mapping_slot(account, outer)
            }
        }
    }
}

/// `keccak256(abi.encode(key, slot))` for an address key.
pub fn mapping_slot(key: Address, slot: U256) -> U256 {
    let mut buf = [0u8; 64];
    buf[12..32].copy_from_slice(key.as_slice());
    buf[32..].copy_from_slice(&slot.to_be_bytes::<32>());
    U256::from_be_bytes(keccak256(buf).0)
}

/// `keccak256(abi.encode(key, slot))` for a uint256 key.
pub fn uint_mapping_slot(key: U256, slot: U256) -> U256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(&key.to_be_bytes::<32>());
    buf[32..].copy_from_slice(&slot.to_be_bytes::<32>());
    U256::from_be_bytes(keccak256(buf).0)
}

/// Result of comparing a raw storage read with the reported balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub key: U256,
    pub storage_value: U256,
    pub reported: U256,
}

impl ProbeOutcome {
    pub fn matches(&self) -> bool {
        self.storage_value == self.reported
    }
}

/// Reads the assumed balance slot of `account` and compares it with `reported`.
pub async fn probe_balance(
    ledger: &dyn Ledger,
    contract: Address,
    account: Address,
    layout: BalanceLayout,
    reported: U256,
) -> Result<ProbeOutcome> {
    let key = layout.key_for(account);
    let storage_value = ledger.storage_at(contract, key).await?;
    let outcome = ProbeOutcome {
        key,
        storage_value,
        reported,
    };

    if outcome.matches() {
        tracing::info!(
            target: "tokenops::storage_probe",
            contract = %contract,
            account = %account,
            key = %format!("{key:#x}"),
            "Raw storage balance of {}: {}",
            account,
            storage_value
        );
    } else {
        tracing::warn!(
            target: "tokenops::storage_probe",
            contract = %contract,
            account = %account,
            key = %format!("{key:#x}"),
            storage_value = %storage_value,
            reported = %reported,
            ?layout,
            "Raw storage read disagrees with balanceOf; assumed layout is likely wrong"
        );
    }

    Ok(outcome)
}
