//! `MyERC721Token` ABI.
//!
//! OpenZeppelin ERC721 + Ownable with a paid, capped, sequential mint.

use alloy::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract MyERC721Token {
        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
        event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId);
        event ApprovalForAll(address indexed owner, address indexed operator, bool approved);

        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function balanceOf(address owner) external view returns (uint256);
        function ownerOf(uint256 tokenId) external view returns (address);
        function getApproved(uint256 tokenId) external view returns (address);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function owner() external view returns (address);
        function price() external view returns (uint256);
        function totalMint() external view returns (uint256);
        function MAX_ELEMENTS() external view returns (uint256);

        function approve(address to, uint256 tokenId) external;
        function setApprovalForAll(address operator, bool approved) external;
        function transferFrom(address from, address to, uint256 tokenId) external;
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
        function safeTransferFrom(address from, address to, uint256 tokenId, bytes data) external;

        function mint(address to, uint256 count) external payable;
    }
}

pub use MyERC721Token::{Approval, ApprovalForAll, Transfer};
