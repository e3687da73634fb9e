//! Local chain simulator for tokenops.
//!
//! [`Devnet`] implements [`tokenops::Ledger`] in process: funded dev accounts,
//! automining, CREATE address derivation and historical logs. Contracts are
//! native [`ContractModel`]s that decode the same `sol!` calldata the RPC path
//! sends and emit ABI-encoded logs, so the typed token handles and interaction
//! scripts run unchanged against it.
//!
//! ```rust,ignore
//! use tokenops_devnet::Fixture;
//! use tokenops_erc721::Erc721Deployment;
//!
//! let fx = Fixture::new();
//! let (token, _) = Erc721Deployment::new(fx.owner, U256::from(1u64))
//!     .deploy(fx.ledger(), fx.owner)
//!     .await?;
//! ```

pub mod chain;
pub mod contracts;
pub mod fixture;
pub mod model;

pub use chain::{Devnet, CHAIN_ID, DEV_ACCOUNTS, DEV_ACCOUNT_BALANCE};
pub use fixture::Fixture;
pub use model::{CallContext, ContractModel, ModelFactory, Revert};
