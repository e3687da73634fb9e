//! `MyERC1155Token` model.
//!
//! OpenZeppelin v5 ERC1155 + Ownable. The constructor mints
//! [`INITIAL_STOCK`] of id 0 to the contract, which `buy` sells from; `buyNFT`
//! mints id 1 up to [`MAX_ELEMENTS`]. Balances live in the nested mapping at
//! slot 0, the owner at slot 3.

use std::collections::{HashMap, HashSet};

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolInterface, SolValue};
use tokenops::storage_probe::{mapping_slot, uint_mapping_slot};
use tokenops_erc1155::bindings::MyERC1155Token::MyERC1155TokenCalls;
use tokenops_erc1155::{ApprovalForAll, TransferBatch, TransferSingle, NFT_ID, TOKEN_ID};

use crate::model::{add, mul, require, returns, CallContext, ContractModel, ExecResult, Revert};

pub const NAME: &str = "MyERC1155Token";
pub const URI: &str = "https://ipfs.io/ipfs/QmfGCCNUfTCd7thUP5FGd9AuvdRQ4MmNDcH13aGBbGAae9/";
pub const MAX_ELEMENTS: u64 = 7;
/// Units of id 0 the contract holds for sale after construction.
pub const INITIAL_STOCK: u128 = 1_000_000_000_000_000_000;

const BALANCES_SLOT: u64 = 0;
const OWNER_SLOT: u64 = 3;
const PRICE_SLOT: u64 = 4;
const NFT_MINTED_SLOT: u64 = 5;

#[derive(Debug, Clone)]
pub struct Erc1155Model {
    owner: Address,
    price: U256,
    nft_minted: U256,
    balances: HashMap<(U256, Address), U256>,
    operator_approvals: HashSet<(Address, Address)>,
}

/// `constructor(address beneficiary, uint256 price)`.
pub fn construct(ctx: &mut CallContext, args: &[u8]) -> ExecResult<Box<dyn ContractModel>> {
    let (owner, price) = <(Address, U256)>::abi_decode_params(args)
        .map_err(|e| Revert::message(format!("invalid constructor arguments: {e}")))?;
    if owner.is_zero() {
        return Err(Revert::custom("OwnableInvalidOwner", &[&Address::ZERO]));
    }

    let mut model = Erc1155Model {
        owner,
        price,
        nft_minted: U256::ZERO,
        balances: HashMap::new(),
        operator_approvals: HashSet::new(),
    };
    let this = ctx.this;
    model.update_with_acceptance_check(
        ctx,
        Address::ZERO,
        this,
        &[U256::from(TOKEN_ID)],
        &[U256::from(INITIAL_STOCK)],
    )?;
    Ok(Box::new(model))
}

impl Erc1155Model {
    fn balance(&self, account: Address, id: U256) -> U256 {
        self.balances
            .get(&(id, account))
            .copied()
            .unwrap_or_default()
    }

    fn is_approved_for_all(&self, account: Address, operator: Address) -> bool {
        self.operator_approvals.contains(&(account, operator))
    }

    fn only_owner(&self, ctx: &CallContext) -> ExecResult<()> {
        if ctx.sender != self.owner {
            return Err(Revert::custom("OwnableUnauthorizedAccount", &[&ctx.sender]));
        }
        Ok(())
    }

    /// Moves or mints `values` of `ids`, emitting the single or batch event.
    /// The operator is `ctx.sender`.
    fn update(
        &mut self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        ids: &[U256],
        values: &[U256],
    ) -> ExecResult<()> {
        if ids.len() != values.len() {
            return Err(Revert::custom(
                "ERC1155InvalidArrayLength",
                &[&ids.len(), &values.len()],
            ));
        }

        for (&id, &value) in ids.iter().zip(values) {
            if !from.is_zero() {
                let balance = self.balance(from, id);
                if balance < value {
                    return Err(Revert::custom(
                        "ERC1155InsufficientBalance",
                        &[&from, &balance, &value, &id],
                    ));
                }
                self.balances.insert((id, from), balance - value);
            }
            if !to.is_zero() {
                let balance = self.balance(to, id);
                self.balances.insert((id, to), add(balance, value)?);
            }
        }

        let operator = ctx.sender;
        if ids.len() == 1 {
            ctx.emit(&TransferSingle {
                operator,
                from,
                to,
                id: ids[0],
                value: values[0],
            });
        } else {
            ctx.emit(&TransferBatch {
                operator,
                from,
                to,
                ids: ids.to_vec(),
                values: values.to_vec(),
            });
        }
        Ok(())
    }

    /// Contracts other than this one must implement the receiver hooks; none of
    /// the hosted models do.
    fn update_with_acceptance_check(
        &mut self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        ids: &[U256],
        values: &[U256],
    ) -> ExecResult<()> {
        self.update(ctx, from, to, ids, values)?;
        if !to.is_zero() && to != ctx.this && ctx.has_code(to) {
            return Err(Revert::custom("ERC1155InvalidReceiver", &[&to]));
        }
        Ok(())
    }

    fn safe_transfer(
        &mut self,
        ctx: &mut CallContext,
        from: Address,
        to: Address,
        ids: &[U256],
        values: &[U256],
    ) -> ExecResult<()> {
        let sender = ctx.sender;
        if from != sender && !self.is_approved_for_all(from, sender) {
            return Err(Revert::custom(
                "ERC1155MissingApprovalForAll",
                &[&sender, &from],
            ));
        }
        if to.is_zero() {
            return Err(Revert::custom("ERC1155InvalidReceiver", &[&Address::ZERO]));
        }
        if from.is_zero() {
            return Err(Revert::custom("ERC1155InvalidSender", &[&Address::ZERO]));
        }
        self.update_with_acceptance_check(ctx, from, to, ids, values)
    }

    fn mint(
        &mut self,
        ctx: &mut CallContext,
        to: Address,
        ids: &[U256],
        values: &[U256],
    ) -> ExecResult<()> {
        if to.is_zero() {
            return Err(Revert::custom("ERC1155InvalidReceiver", &[&Address::ZERO]));
        }
        self.update_with_acceptance_check(ctx, Address::ZERO, to, ids, values)
    }

    /// Sells `amount` of id 0 from the contract's stock. The transfer is made
    /// by the contract itself, so it is both operator and sender.
    fn buy(&mut self, ctx: &mut CallContext, to: Address, amount: U256) -> ExecResult<()> {
        require(
            ctx.value >= mul(self.price, amount)?,
            "Insufficient funds to buy the tokens",
        )?;
        if to.is_zero() {
            return Err(Revert::custom("ERC1155InvalidReceiver", &[&Address::ZERO]));
        }

        let buyer = ctx.sender;
        let this = ctx.this;
        ctx.sender = this;
        let result =
            self.update_with_acceptance_check(ctx, this, to, &[U256::from(TOKEN_ID)], &[amount]);
        ctx.sender = buyer;
        result
    }

    fn buy_nft(&mut self, ctx: &mut CallContext, to: Address, count: U256) -> ExecResult<()> {
        let minted = add(self.nft_minted, count)?;
        require(minted <= U256::from(MAX_ELEMENTS), "Max limit exceeded")?;
        require(
            ctx.value >= mul(self.price, count)?,
            "Insufficient funds to buy the tokens",
        )?;
        self.nft_minted = minted;
        self.mint(ctx, to, &[U256::from(NFT_ID)], &[count])
    }

    fn set_approval_for_all(
        &mut self,
        ctx: &mut CallContext,
        operator: Address,
        approved: bool,
    ) -> ExecResult<()> {
        if operator.is_zero() {
            return Err(Revert::custom("ERC1155InvalidOperator", &[&Address::ZERO]));
        }
        let account = ctx.sender;
        if approved {
            self.operator_approvals.insert((account, operator));
        } else {
            self.operator_approvals.remove(&(account, operator));
        }
        ctx.emit(&ApprovalForAll {
            account,
            operator,
            approved,
        });
        Ok(())
    }
}

impl ContractModel for Erc1155Model {
    fn contract_name(&self) -> &'static str {
        NAME
    }

    fn execute(&mut self, ctx: &mut CallContext, input: &[u8]) -> ExecResult<Bytes> {
        let call = MyERC1155TokenCalls::abi_decode(input).map_err(|_| Revert::empty())?;
        let payable = matches!(
            call,
            MyERC1155TokenCalls::buy(_) | MyERC1155TokenCalls::buyNFT(_)
        );
        if !payable && !ctx.value.is_zero() {
            return Err(Revert::empty());
        }

        let out = match call {
            MyERC1155TokenCalls::uri(_) => returns(URI.to_string()),
            MyERC1155TokenCalls::balanceOf(c) => returns(self.balance(c.account, c.id)),
            MyERC1155TokenCalls::balanceOfBatch(c) => {
                if c.accounts.len() != c.ids.len() {
                    return Err(Revert::custom(
                        "ERC1155InvalidArrayLength",
                        &[&c.ids.len(), &c.accounts.len()],
                    ));
                }
                let balances: Vec<U256> = c
                    .accounts
                    .iter()
                    .zip(&c.ids)
                    .map(|(&account, &id)| self.balance(account, id))
                    .collect();
                returns(balances)
            }
            MyERC1155TokenCalls::isApprovedForAll(c) => {
                returns(self.is_approved_for_all(c.account, c.operator))
            }
            MyERC1155TokenCalls::owner(_) => returns(self.owner),
            MyERC1155TokenCalls::price(_) => returns(self.price),
            MyERC1155TokenCalls::TOKEN_ID(_) => returns(U256::from(TOKEN_ID)),
            MyERC1155TokenCalls::NFT_ID(_) => returns(U256::from(NFT_ID)),
            MyERC1155TokenCalls::MAX_ELEMENTS(_) => returns(U256::from(MAX_ELEMENTS)),

            MyERC1155TokenCalls::setApprovalForAll(c) => {
                self.set_approval_for_all(ctx, c.operator, c.approved)?;
                Bytes::new()
            }
            MyERC1155TokenCalls::safeTransferFrom(c) => {
                self.safe_transfer(ctx, c.from, c.to, &[c.id], &[c.value])?;
                Bytes::new()
            }
            MyERC1155TokenCalls::safeBatchTransferFrom(c) => {
                self.safe_transfer(ctx, c.from, c.to, &c.ids, &c.values)?;
                Bytes::new()
            }
            MyERC1155TokenCalls::buy(c) => {
                self.buy(ctx, c.to, c.amount)?;
                Bytes::new()
            }
            MyERC1155TokenCalls::buyNFT(c) => {
                self.buy_nft(ctx, c.to, c.count)?;
                Bytes::new()
            }
            MyERC1155TokenCalls::mintBatch(c) => {
                self.only_owner(ctx)?;
                self.mint(ctx, c.to, &c.ids, &c.amounts)?;
                Bytes::new()
            }
        };
        Ok(out)
    }

    fn storage_at(&self, slot: U256) -> U256 {
        let fixed = [
            (OWNER_SLOT, U256::from_be_slice(self.owner.as_slice())),
            (PRICE_SLOT, self.price),
            (NFT_MINTED_SLOT, self.nft_minted),
        ];
        if let Some((_, value)) = fixed.iter().find(|(s, _)| U256::from(*s) == slot) {
            return *value;
        }

        let balances = U256::from(BALANCES_SLOT);
        self.balances
            .iter()
            .find(|((id, account), _)| {
                mapping_slot(*account, uint_mapping_slot(*id, balances)) == slot
            })
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }

    fn clone_model(&self) -> Box<dyn ContractModel> {
        Box::new(self.clone())
    }
}
