//! `MyERC20Token` ABI.
//!
//! OpenZeppelin ERC20 + Ownable, extended with a fixed-price sale funded from
//! the contract's own balance and a percentage fee on transfers.

use alloy::sol;

sol! {
    #[derive(Debug, PartialEq, Eq)]
    contract MyERC20Token {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function owner() external view returns (address);
        function price() external view returns (uint256);
        function transferFeePercentage() external view returns (uint256);

        function transfer(address to, uint256 value) external returns (bool);
        function approve(address spender, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
        function safeTransfer(address to, uint256 amount) external returns (bool);

        function mint(address to, uint256 amount) external;
        function safeMint(address to, uint256 amount) external;
        function fundContract(uint256 amount) external;
        function buy() external payable;
        function setTransferFeePercentage(uint256 percentage) external;
    }
}

pub use MyERC20Token::{Approval, Transfer};
