//! `MyERC20Token` model.
//!
//! OpenZeppelin v5 ERC20 + Ownable semantics with the sale and transfer-fee
//! rules of the deployed contract. Storage follows the OpenZeppelin layout:
//! balances at slot 0, allowances at 1, total supply at 2, owner at 5.

use std::collections::HashMap;

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolInterface, SolValue};
use tokenops::storage_probe::mapping_slot;
use tokenops_erc20::bindings::MyERC20Token::MyERC20TokenCalls;
use tokenops_erc20::{Approval, Transfer};

use crate::model::{
    add, mul, require, returns, sub, CallContext, ContractModel, ExecResult, Revert,
};

pub const NAME: &str = "MyERC20Token";
pub const SYMBOL: &str = "MTK";
pub const DECIMALS: u8 = 18;
/// Minted to the owner at construction.
pub const INITIAL_SUPPLY: u64 = 1_000_000;

const BALANCES_SLOT: u64 = 0;
const ALLOWANCES_SLOT: u64 = 1;
const TOTAL_SUPPLY_SLOT: u64 = 2;
const OWNER_SLOT: u64 = 5;
const PRICE_SLOT: u64 = 6;
const FEE_SLOT: u64 = 7;

#[derive(Debug, Clone)]
pub struct Erc20Model {
    owner: Address,
    price: U256,
    fee_percentage: U256,
    total_supply: U256,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

/// `constructor(address beneficiary, uint256 price, uint256 transferFeePercentage)`.
pub fn construct(ctx: &mut CallContext, args: &[u8]) -> ExecResult<Box<dyn ContractModel>> {
    let (owner, price, fee_percentage) = <(Address, U256, U256)>::abi_decode_params(args)
        .map_err(|e| Revert::message(format!("invalid constructor arguments: {e}")))?;
    if owner.is_zero() {
        return Err(Revert::custom("OwnableInvalidOwner", &[&Address::ZERO]));
    }

    let mut model = Erc20Model {
        owner,
        price,
        fee_percentage,
        total_supply: U256::ZERO,
        balances: HashMap::new(),
        allowances: HashMap::new(),
    };
    model.mint(ctx, owner, U256::from(INITIAL_SUPPLY))?;
    Ok(Box::new(model))
}

impl Erc20Model {
    fn balance(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn only_owner(&self, ctx: &CallContext) -> ExecResult<()> {
        if ctx.sender != self.owner {
            return Err(Revert::custom("OwnableUnauthorizedAccount", &[&ctx.sender]));
        }
        Ok(())
    }

    fn mint(&mut self, ctx: &mut CallContext, to: Address, value: U256) -> ExecResult<()> {
        if to.is_zero() {
            return Err(Revert::custom("ERC20InvalidReceiver", &[&Address::ZERO]));
        }
        self.total_supply = add(self.total_supply, value)?;
        *self.balances.entry(to).or_default() += value;
        ctx.emit(&Transfer {
            from: Address::ZERO,
            to,
            value,
        });
        Ok(())
    }

    fn transfer_raw(
        &mut self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        value: U256,
    ) -> ExecResult<()> {
        if from.is_zero() {
            return Err(Revert::custom("ERC20InvalidSender", &[&Address::ZERO]));
        }
        if to.is_zero() {
            return Err(Revert::custom("ERC20InvalidReceiver", &[&Address::ZERO]));
        }
        let balance = self.balance(from);
        if balance < value {
            return Err(Revert::custom(
                "ERC20InsufficientBalance",
                &[&from, &balance, &value],
            ));
        }
        self.balances.insert(from, balance - value);
        *self.balances.entry(to).or_default() += value;
        ctx.emit(&Transfer { from, to, value });
        Ok(())
    }

    /// Moves `value` minus the fee to `to` and the fee to the contract.
    fn transfer_with_fee(
        &mut self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        value: U256,
    ) -> ExecResult<()> {
        let balance = self.balance(from);
        if !from.is_zero() && balance < value {
            return Err(Revert::custom(
                "ERC20InsufficientBalance",
                &[&from, &balance, &value],
            ));
        }

        let fee = mul(value, self.fee_percentage)? / U256::from(100u64);
        self.transfer_raw(ctx, from, to, sub(value, fee)?)?;
        if !fee.is_zero() {
            let this = ctx.this;
            self.transfer_raw(ctx, from, this, fee)?;
        }
        Ok(())
    }

    fn approve(
        &mut self,
        ctx: &mut CallContext,
        owner: Address,
        spender: Address,
        value: U256,
    ) -> ExecResult<()> {
        if spender.is_zero() {
            return Err(Revert::custom("ERC20InvalidSpender", &[&Address::ZERO]));
        }
        self.allowances.insert((owner, spender), value);
        ctx.emit(&Approval {
            owner,
            spender,
            value,
        });
        Ok(())
    }

    fn spend_allowance(&mut self, owner: Address, spender: Address, value: U256) -> ExecResult<()> {
        let current = self.allowance(owner, spender);
        if current == U256::MAX {
            return Ok(());
        }
        if current < value {
            return Err(Revert::custom(
                "ERC20InsufficientAllowance",
                &[&spender, &current, &value],
            ));
        }
        self.allowances.insert((owner, spender), current - value);
        Ok(())
    }

    fn buy(&mut self, ctx: &mut CallContext) -> ExecResult<()> {
        require(ctx.value >= self.price, "Insufficient funds to buy tokens")?;
        let tokens = ctx
            .value
            .checked_div(self.price)
            .ok_or_else(|| Revert::panic(0x12))?;
        require(
            self.balance(ctx.this) >= tokens,
            "Contract doesn't have enough tokens",
        )?;
        let (this, buyer) = (ctx.this, ctx.sender);
        self.transfer_raw(ctx, this, buyer, tokens)
    }
}

impl ContractModel for Erc20Model {
    fn contract_name(&self) -> &'static str {
        NAME
    }

    fn execute(&mut self, ctx: &mut CallContext, input: &[u8]) -> ExecResult<Bytes> {
        let call = MyERC20TokenCalls::abi_decode(input).map_err(|_| Revert::empty())?;
        let payable = matches!(call, MyERC20TokenCalls::buy(_));
        if !payable && !ctx.value.is_zero() {
            return Err(Revert::empty());
        }

        let sender = ctx.sender;
        let out = match call {
            MyERC20TokenCalls::name(_) => returns(NAME.to_string()),
            MyERC20TokenCalls::symbol(_) => returns(SYMBOL.to_string()),
            MyERC20TokenCalls::decimals(_) => returns(U256::from(DECIMALS)),
            MyERC20TokenCalls::totalSupply(_) => returns(self.total_supply),
            MyERC20TokenCalls::balanceOf(c) => returns(self.balance(c.account)),
            MyERC20TokenCalls::allowance(c) => returns(self.allowance(c.owner, c.spender)),
            MyERC20TokenCalls::owner(_) => returns(self.owner),
            MyERC20TokenCalls::price(_) => returns(self.price),
            MyERC20TokenCalls::transferFeePercentage(_) => returns(self.fee_percentage),

            MyERC20TokenCalls::transfer(c) => {
                self.transfer_with_fee(ctx, sender, c.to, c.value)?;
                returns(true)
            }
            MyERC20TokenCalls::approve(c) => {
                self.approve(ctx, sender, c.spender, c.value)?;
                returns(true)
            }
            MyERC20TokenCalls::transferFrom(c) => {
                self.spend_allowance(c.from, sender, c.value)?;
                self.transfer_with_fee(ctx, c.from, c.to, c.value)?;
                returns(true)
            }
            MyERC20TokenCalls::safeTransfer(c) => {
                require(!c.to.is_zero() && c.to != ctx.this, "Invalid recipient")?;
                self.transfer_with_fee(ctx, sender, c.to, c.amount)?;
                returns(true)
            }
            MyERC20TokenCalls::mint(c) => {
                self.only_owner(ctx)?;
                self.mint(ctx, c.to, c.amount)?;
                Bytes::new()
            }
            MyERC20TokenCalls::safeMint(c) => {
                self.only_owner(ctx)?;
                require(!c.amount.is_zero(), "Amount must be greater than zero")?;
                self.mint(ctx, c.to, c.amount)?;
                Bytes::new()
            }
            MyERC20TokenCalls::fundContract(c) => {
                self.only_owner(ctx)?;
                let this = ctx.this;
                self.mint(ctx, this, c.amount)?;
                Bytes::new()
            }
            MyERC20TokenCalls::buy(_) => {
                self.buy(ctx)?;
                Bytes::new()
            }
            MyERC20TokenCalls::setTransferFeePercentage(c) => {
                self.only_owner(ctx)?;
                require(c.percentage <= U256::from(100u64), "Fee percentage too high")?;
                self.fee_percentage = c.percentage;
                Bytes::new()
            }
        };
        Ok(out)
    }

    fn storage_at(&self, slot: U256) -> U256 {
        let fixed = [
            (TOTAL_SUPPLY_SLOT, self.total_supply),
            (OWNER_SLOT, U256::from_be_slice(self.owner.as_slice())),
            (PRICE_SLOT, self.price),
            (FEE_SLOT, self.fee_percentage),
        ];
        if let Some((_, value)) = fixed.iter().find(|(s, _)| U256::from(*s) == slot) {
            return *value;
        }

        let balances = U256::from(BALANCES_SLOT);
        if let Some(value) = self
            .balances
            .iter()
            .find(|(account, _)| mapping_slot(**account, balances) == slot)
            .map(|(_, value)| *value)
        {
            return value;
        }

        let allowances = U256::from(ALLOWANCES_SLOT);
        self.allowances
            .iter()
            .find(|((owner, spender), _)| {
                mapping_slot(*spender, mapping_slot(*owner, allowances)) == slot
            })
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }

    fn clone_model(&self) -> Box<dyn ContractModel> {
        Box::new(self.clone())
    }
}
