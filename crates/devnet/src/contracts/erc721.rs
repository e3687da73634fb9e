//! `MyERC721Token` model.
//!
//! OpenZeppelin v5 ERC721 + Ownable with a paid mint of sequential ids starting
//! at 1, capped at [`MAX_ELEMENTS`]. Owners live at slot 2, balances at slot 3.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolInterface, SolValue};
use tokenops::storage_probe::{mapping_slot, uint_mapping_slot};
use tokenops_erc721::bindings::MyERC721Token::MyERC721TokenCalls;
use tokenops_erc721::{Approval, ApprovalForAll, Transfer};

use crate::model::{add, mul, require, returns, CallContext, ContractModel, ExecResult, Revert};

pub const NAME: &str = "MyERC721Token";
pub const SYMBOL: &str = "MNFT";
pub const MAX_ELEMENTS: u64 = 7;

const OWNERS_SLOT: u64 = 2;
const BALANCES_SLOT: u64 = 3;
const OWNER_SLOT: u64 = 6;
const PRICE_SLOT: u64 = 7;
const TOTAL_MINT_SLOT: u64 = 8;

#[derive(Debug, Clone)]
pub struct Erc721Model {
    owner: Address,
    price: U256,
    total_mint: U256,
    owners: HashMap<U256, Address>,
    balances: HashMap<Address, U256>,
    token_approvals: HashMap<U256, Address>,
    operator_approvals: HashSet<(Address, Address)>,
}

/// `constructor(address beneficiary, uint256 price)`.
pub fn construct(_ctx: &mut CallContext, args: &[u8]) -> ExecResult<Box<dyn ContractModel>> {
    let (owner, price) = <(Address, U256)>::abi_decode_params(args)
        .map_err(|e| Revert::message(format!("invalid constructor arguments: {e}")))?;
    if owner.is_zero() {
        return Err(Revert::custom("OwnableInvalidOwner", &[&Address::ZERO]));
    }

    Ok(Box::new(Erc721Model {
        owner,
        price,
        total_mint: U256::ZERO,
        owners: HashMap::new(),
        balances: HashMap::new(),
        token_approvals: HashMap::new(),
        operator_approvals: HashSet::new(),
    }))
}

impl Erc721Model {
    fn owner_of(&self, token_id: U256) -> Address {
        self.owners.get(&token_id).copied().unwrap_or_default()
    }

    fn require_owned(&self, token_id: U256) -> ExecResult<Address> {
        let owner = self.owner_of(token_id);
        if owner.is_zero() {
            return Err(Revert::custom("ERC721NonexistentToken", &[&token_id]));
        }
        Ok(owner)
    }

    fn balance(&self, owner: Address) -> ExecResult<U256> {
        if owner.is_zero() {
            return Err(Revert::custom("ERC721InvalidOwner", &[&Address::ZERO]));
        }
        Ok(self.balances.get(&owner).copied().unwrap_or_default())
    }

    fn approved(&self, token_id: U256) -> Address {
        self.token_approvals
            .get(&token_id)
            .copied()
            .unwrap_or_default()
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.operator_approvals.contains(&(owner, operator))
    }

    fn is_authorized(&self, owner: Address, spender: Address, token_id: U256) -> bool {
        !spender.is_zero()
            && (owner == spender
                || self.is_approved_for_all(owner, spender)
                || self.approved(token_id) == spender)
    }

    /// Moves `token_id` to `to` (zero burns), checking `auth` when non-zero.
    /// Returns the previous owner.
    fn update(
        &mut self,
        ctx: &mut CallContext,
        to: Address,
        token_id: U256,
        auth: Address,
    ) -> ExecResult<Address> {
        let from = self.owner_of(token_id);

        if !auth.is_zero() && !self.is_authorized(from, auth, token_id) {
            return Err(if from.is_zero() {
                Revert::custom("ERC721NonexistentToken", &[&token_id])
            } else {
                Revert::custom("ERC721InsufficientApproval", &[&auth, &token_id])
            });
        }

        if !from.is_zero() {
            self.token_approvals.remove(&token_id);
            if let Some(balance) = self.balances.get_mut(&from) {
                *balance -= U256::from(1u64);
            }
        }
        if to.is_zero() {
            self.owners.remove(&token_id);
        } else {
            *self.balances.entry(to).or_default() += U256::from(1u64);
            self.owners.insert(token_id, to);
        }

        ctx.emit(&Transfer {
            from,
            to,
            tokenId: token_id,
        });
        Ok(from)
    }

    fn transfer_from(
        &mut self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> ExecResult<()> {
        if to.is_zero() {
            return Err(Revert::custom("ERC721InvalidReceiver", &[&Address::ZERO]));
        }
        let sender = ctx.sender;
        let previous = self.update(ctx, to, token_id, sender)?;
        if previous.is_zero() {
            return Err(Revert::custom("ERC721NonexistentToken", &[&token_id]));
        }
        if previous != from {
            return Err(Revert::custom(
                "ERC721IncorrectOwner",
                &[&from, &token_id, &previous],
            ));
        }
        Ok(())
    }

    /// Contracts receiving tokens must implement `onERC721Received`; none of
    /// the hosted models do.
    fn check_on_received(ctx: &CallContext, to: Address) -> ExecResult<()> {
        if ctx.has_code(to) {
            return Err(Revert::custom("ERC721InvalidReceiver", &[&to]));
        }
        Ok(())
    }

    fn approve(&mut self, ctx: &mut CallContext, to: Address, token_id: U256) -> ExecResult<()> {
        let owner = self.require_owned(token_id)?;
        let auth = ctx.sender;
        if owner != auth && !self.is_approved_for_all(owner, auth) {
            return Err(Revert::custom("ERC721InvalidApprover", &[&auth]));
        }
        self.token_approvals.insert(token_id, to);
        ctx.emit(&Approval {
            owner,
            approved: to,
            tokenId: token_id,
        });
        Ok(())
    }

    fn set_approval_for_all(
        &mut self,
        ctx: &mut CallContext,
        operator: Address,
        approved: bool,
    ) -> ExecResult<()> {
        if operator.is_zero() {
            return Err(Revert::custom("ERC721InvalidOperator", &[&operator]));
        }
        let owner = ctx.sender;
        if approved {
            self.operator_approvals.insert((owner, operator));
        } else {
            self.operator_approvals.remove(&(owner, operator));
        }
        ctx.emit(&ApprovalForAll {
            owner,
            operator,
            approved,
        });
        Ok(())
    }

    fn mint(&mut self, ctx: &mut CallContext, to: Address, count: U256) -> ExecResult<()> {
        let total = add(self.total_mint, count)?;
        require(total <= U256::from(MAX_ELEMENTS), "Max limit")?;
        require(ctx.value >= mul(self.price, count)?, "Value below price")?;

        while self.total_mint < total {
            self.total_mint += U256::from(1u64);
            let token_id = self.total_mint;
            if to.is_zero() {
                return Err(Revert::custom("ERC721InvalidReceiver", &[&Address::ZERO]));
            }
            let previous = self.update(ctx, to, token_id, Address::ZERO)?;
            if !previous.is_zero() {
                return Err(Revert::custom("ERC721InvalidSender", &[&Address::ZERO]));
            }
            Self::check_on_received(ctx, to)?;
        }
        Ok(())
    }
}

impl ContractModel for Erc721Model {
    fn contract_name(&self) -> &'static str {
        NAME
    }

    fn execute(&mut self, ctx: &mut CallContext, input: &[u8]) -> ExecResult<Bytes> {
        let call = MyERC721TokenCalls::abi_decode(input).map_err(|_| Revert::empty())?;
        let payable = matches!(call, MyERC721TokenCalls::mint(_));
        if !payable && !ctx.value.is_zero() {
            return Err(Revert::empty());
        }

        let out = match call {
            MyERC721TokenCalls::name(_) => returns(NAME.to_string()),
            MyERC721TokenCalls::symbol(_) => returns(SYMBOL.to_string()),
            MyERC721TokenCalls::balanceOf(c) => returns(self.balance(c.owner)?),
            MyERC721TokenCalls::ownerOf(c) => returns(self.require_owned(c.tokenId)?),
            MyERC721TokenCalls::getApproved(c) => {
                self.require_owned(c.tokenId)?;
                returns(self.approved(c.tokenId))
            }
            MyERC721TokenCalls::isApprovedForAll(c) => {
                returns(self.is_approved_for_all(c.owner, c.operator))
            }
            MyERC721TokenCalls::owner(_) => returns(self.owner),
            MyERC721TokenCalls::price(_) => returns(self.price),
            MyERC721TokenCalls::totalMint(_) => returns(self.total_mint),
            MyERC721TokenCalls::MAX_ELEMENTS(_) => returns(U256::from(MAX_ELEMENTS)),

            MyERC721TokenCalls::approve(c) => {
                self.approve(ctx, c.to, c.tokenId)?;
                Bytes::new()
            }
            MyERC721TokenCalls::setApprovalForAll(c) => {
                self.set_approval_for_all(ctx, c.operator, c.approved)?;
                Bytes::new()
            }
            MyERC721TokenCalls::transferFrom(c) => {
                self.transfer_from(ctx, c.from, c.to, c.tokenId)?;
                Bytes::new()
            }
            MyERC721TokenCalls::safeTransferFrom_0(c) => {
                self.transfer_from(ctx, c.from, c.to, c.tokenId)?;
                Self::check_on_received(ctx, c.to)?;
                Bytes::new()
            }
            MyERC721TokenCalls::safeTransferFrom_1(c) => {
                self.transfer_from(ctx, c.from, c.to, c.tokenId)?;
                Self::check_on_received(ctx, c.to)?;
                Bytes::new()
            }
            MyERC721TokenCalls::mint(c) => {
                self.mint(ctx, c.to, c.count)?;
                Bytes::new()
            }
        };
        Ok(out)
    }

    fn storage_at(&self, slot: U256) -> U256 {
        let fixed = [
            (OWNER_SLOT, U256::from_be_slice(self.owner.as_slice())),
            (PRICE_SLOT, self.price),
            (TOTAL_MINT_SLOT, self.total_mint),
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

        let owners = U256::from(OWNERS_SLOT);
        self.owners
            .iter()
            .find(|(id, _)| uint_mapping_slot(**id, owners) == slot)
            .map(|(_, owner)| U256::from_be_slice(owner.as_slice()))
            .unwrap_or_default()
    }

    fn clone_model(&self) -> Box<dyn ContractModel> {
        Box::new(self.clone())
    }
}
