//! Tokenops - deployment, interaction and test tooling for three token contracts.
//!
//! The contracts (`MyERC20Token`, `MyERC721Token`, `MyERC1155Token`) are
//! pre-compiled and live outside this repository. This crate provides the
//! plumbing every script shares:
//!
//! - [`Ledger`]: the boundary to the execution environment, implemented by
//!   [`RpcLedger`] for JSON-RPC networks and by `tokenops-devnet` for tests.
//! - [`ContractHandle`]: address + caller, with typed send/read/history helpers
//!   driven by `sol!` interfaces.
//! - [`deploy::Deployment`]: deployment descriptors.
//! - [`storage_probe`]: the advisory raw-storage balance probe.
//! - [`explorer`]: source verification against an Etherscan-compatible API.
//! - [`script`]: step bookkeeping for the interaction scripts.
//!
//! Every state-changing call is submitted once and awaited; failures propagate
//! to the caller unchanged.

pub mod artifact;
pub mod contract;
pub mod deploy;
pub mod error;
pub mod explorer;
pub mod ledger;
pub mod network;
pub mod receipt;
pub mod script;
pub mod storage_probe;

// Re-export commonly used types for the family crates
pub use alloy;

pub use contract::ContractHandle;
pub use deploy::{deploy, DeployedContract, Deployment};
pub use error::{ChainError, Result};
pub use ledger::{DeployRequest, Ledger, LogEntry, LogQuery, RpcLedger, TxRequest};
pub use network::{ExplorerConfig, GasPrice, KnownNetwork, NetworkConfig};
pub use receipt::{EventRecord, TxReceipt};
pub use script::{StepLog, StepRecord, DEFAULT_RECIPIENT};
pub use storage_probe::{BalanceLayout, ProbeOutcome};
