//! `MyERC1155Token` ABI.
//!
//! OpenZeppelin ERC1155 + Ownable. Id 0 is a fungible unit sold from the
//! contract's own balance, id 1 a capped collectible minted on purchase.

use alloy::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract MyERC1155Token {
        event TransferSingle(address indexed operator, address indexed from, address indexed to, uint256 id, uint256 value);
        event TransferBatch(address indexed operator, address indexed from, address indexed to, uint256[] ids, uint256[] values);
        event ApprovalForAll(address indexed account, address indexed operator, bool approved);

        function uri(uint256 id) external view returns (string memory);
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function balanceOfBatch(address[] accounts, uint256[] ids) external view returns (uint256[] memory);
        function isApprovedForAll(address account, address operator) external view returns (bool);
        function owner() external view returns (address);
        function price() external view returns (uint256);
        function TOKEN_ID() external view returns (uint256);
        function NFT_ID() external view returns (uint256);
        function MAX_ELEMENTS() external view returns (uint256);

        function setApprovalForAll(address operator, bool approved) external;
        function safeTransferFrom(address from, address to, uint256 id, uint256 value, bytes data) external;
        function safeBatchTransferFrom(address from, address to, uint256[] ids, uint256[] values, bytes data) external;

        function buy(address to, uint256 amount) external payable;
        function buyNFT(address to, uint256 count) external payable;
        function mintBatch(address to, uint256[] ids, uint256[] amounts, bytes data) external;
    }
}

pub use MyERC1155Token::{ApprovalForAll, TransferBatch, TransferSingle};
