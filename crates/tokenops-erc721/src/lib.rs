//! `MyERC721Token` tooling.
//!
//! - [`bindings`]: `sol!` interface of the deployed contract
//! - [`Erc721Token`]: typed handle over [`tokenops::ContractHandle`]
//! - [`Erc721Deployment`]: constructor arguments and deployment
//! - [`interact`]: paid mint followed by approved transfers

pub mod bindings;
pub mod deploy;
pub mod interact;
pub mod token;

pub use bindings::{Approval, ApprovalForAll, MyERC721Token, Transfer};
pub use deploy::{Erc721Deployment, CONTRACT_NAME, DEFAULT_BENEFICIARY};
pub use interact::{InteractionReport, InteractionScript};
pub use token::Erc721Token;
