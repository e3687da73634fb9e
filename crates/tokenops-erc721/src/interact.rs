//! Fixed demonstration sequence against a deployed `MyERC721Token`.

use std::ops::RangeInclusive;

use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use tokenops::storage_probe::{probe_balance, BalanceLayout, ProbeOutcome};
use tokenops::{EventRecord, StepLog, StepRecord, DEFAULT_RECIPIENT};

use crate::bindings::Transfer;
use crate::token::Erc721Token;

/// Assumed slot of the `balances` mapping.
pub const BALANCE_SLOT: u64 = 3;

/// Options of one interaction run.
#[derive(Debug, Clone)]
pub struct InteractionScript {
    pub recipient: Address,
    /// Tokens minted in the first step. The second and third of them are
    /// transferred to the recipient.
    pub mint_count: U256,
    pub probe_storage: bool,
    pub from_block: u64,
}

impl Default for InteractionScript {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT,
            mint_count: U256::from(4u64),
            probe_storage: false,
            from_block: 0,
        }
    }
}

/// What a completed run observed.
#[derive(Debug, Clone)]
pub struct InteractionReport {
    pub steps: Vec<StepRecord>,
    /// Ids minted by this run.
    pub minted: RangeInclusive<U256>,
    pub transferred: Vec<U256>,
    pub caller_balance: U256,
    pub recipient_balance: U256,
    pub probe: Option<ProbeOutcome>,
    pub transfers: Vec<EventRecord<Transfer>>,
}

/// Runs the sequence with `token`'s caller as the acting account.
pub async fn run(token: &Erc721Token, script: &InteractionScript) -> Result<InteractionReport> {
    let caller = token.caller();
    let recipient = script.recipient;
    let mut steps = StepLog::new();

    anyhow::ensure!(
        script.mint_count >= U256::from(3u64),
        "mint count must be at least 3, got {}",
        script.mint_count
    );

    tracing::info!(
        target: "tokenops_erc721::interact",
        contract = %token.address(),
        caller = %caller,
        "Attached to MyERC721Token"
    );

    let price = token.price().await.context("price()")?;
    let already_minted = token.total_mint().await.context("totalMint()")?;
    let cost = price
        .checked_mul(script.mint_count)
        .context("mint cost overflows uint256")?;
    let id = |offset: U256| {
        already_minted
            .checked_add(offset)
            .context("token id overflows uint256")
    };
    let minted = id(U256::from(1u64))?..=id(script.mint_count)?;
    let by_transfer_from = id(U256::from(2u64))?;
    let by_safe_transfer = id(U256::from(3u64))?;

    steps
        .run("mint", token.mint(caller, script.mint_count, cost))
        .await?;
    tracing::info!(target: "tokenops_erc721::interact", "Minted {} tokens to {}", script.mint_count, caller);

    steps
        .run("approve", token.approve(caller, by_transfer_from))
        .await?;
    steps
        .run(
            "transferFrom",
            token.transfer_from(caller, recipient, by_transfer_from),
        )
        .await?;
    tracing::info!(target: "tokenops_erc721::interact", "Transferred token {} using transferFrom", by_transfer_from);

    steps
        .run("approve", token.approve(caller, by_safe_transfer))
        .await?;
    steps
        .run(
            "safeTransferFrom",
            token.safe_transfer_from(caller, recipient, by_safe_transfer),
        )
        .await?;
    tracing::info!(target: "tokenops_erc721::interact", "Transferred token {} using safeTransferFrom", by_safe_transfer);

    let caller_balance = token.balance_of(caller).await.context("balanceOf(caller)")?;
    let recipient_balance = token
        .balance_of(recipient)
        .await
        .context("balanceOf(recipient)")?;
    for id in [by_transfer_from, by_safe_transfer] {
        let owner = token.owner_of(id).await.context("ownerOf")?;
        tracing::info!(target: "tokenops_erc721::interact", "Owner of token {}: {}", id, owner);
    }
    tracing::info!(
        target: "tokenops_erc721::interact",
        caller = %caller_balance,
        recipient = %recipient_balance,
        "Balances"
    );

    let probe = if script.probe_storage {
        let outcome = probe_balance(
            token.handle().ledger().as_ref(),
            token.address(),
            caller,
            BalanceLayout::Flat { slot: BALANCE_SLOT },
            caller_balance,
        )
        .await
        .context("storage probe")?;
        Some(outcome)
    } else {
        None
    };

    let transfers = token
        .transfers(script.from_block)
        .await
        .context("Transfer history")?;
    tracing::info!(target: "tokenops_erc721::interact", "Transfer events: {}", transfers.len());
    for record in &transfers {
        tracing::info!(
            target: "tokenops_erc721::interact",
            block = record.block_number.unwrap_or(0),
            "From: {}, To: {}, Token ID: {}",
            record.event.from,
            record.event.to,
            record.event.tokenId
        );
    }

    Ok(InteractionReport {
        steps: steps.into_records(),
        minted,
        transferred: vec![by_transfer_from, by_safe_transfer],
        caller_balance,
        recipient_balance,
        probe,
        transfers,
    })
}
