//! `MyERC1155Token` tooling.
//!
//! - [`bindings`]: `sol!` interface of the deployed contract
//! - [`Erc1155Token`]: typed handle over [`tokenops::ContractHandle`]
//! - [`Erc1155Deployment`]: constructor arguments and deployment
//! - [`interact`]: purchases followed by single and batch transfers

pub mod bindings;
pub mod deploy;
pub mod interact;
pub mod token;

pub use bindings::{ApprovalForAll, MyERC1155Token, TransferBatch, TransferSingle};
pub use deploy::{Erc1155Deployment, CONTRACT_NAME, DEFAULT_BENEFICIARY};
pub use interact::{InteractionReport, InteractionScript};
pub use token::{Erc1155Token, NFT_ID, TOKEN_ID};
