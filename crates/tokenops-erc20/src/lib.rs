//! `MyERC20Token` tooling.
//!
//! - [`bindings`]: `sol!` interface of the deployed contract
//! - [`Erc20Token`]: typed handle over [`tokenops::ContractHandle`]
//! - [`Erc20Deployment`]: constructor arguments and deployment
//! - [`interact`]: the mint / transfer / buy demonstration sequence

pub mod bindings;
pub mod deploy;
pub mod interact;
pub mod token;

pub use bindings::{Approval, MyERC20Token, Transfer};
pub use deploy::{Erc20Deployment, CONTRACT_NAME, DEFAULT_BENEFICIARY};
pub use interact::{InteractionReport, InteractionScript};
pub use token::Erc20Token;
