//! Fixed demonstration sequence against a deployed `MyERC1155Token`.

use alloy::primitives::{Address, Bytes, U256};
use anyhow::{Context, Result};
use tokenops::storage_probe::{probe_balance, BalanceLayout, ProbeOutcome};
use tokenops::{EventRecord, StepLog, StepRecord, DEFAULT_RECIPIENT};

use crate::bindings::{TransferBatch, TransferSingle};
use crate::token::{Erc1155Token, NFT_ID, TOKEN_ID};

/// Assumed slot of the `id => account => balance` mapping.
pub const BALANCE_SLOT: u64 = 0;

/// Amounts and options of one interaction run.
#[derive(Debug, Clone)]
pub struct InteractionScript {
    pub recipient: Address,
    pub nft_count: U256,
    pub buy_amount: U256,
    /// Units of [`TOKEN_ID`] moved by `safeTransferFrom`.
    pub single_transfer_amount: U256,
    /// Units of ([`TOKEN_ID`], [`NFT_ID`]) moved by `safeBatchTransferFrom`.
    pub batch_transfer_amounts: (U256, U256),
    pub probe_storage: bool,
    pub from_block: u64,
}

impl Default for InteractionScript {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT,
            nft_count: U256::from(3u64),
            buy_amount: U256::from(10u64),
            single_transfer_amount: U256::from(5u64),
            batch_transfer_amounts: (U256::from(5u64), U256::from(1u64)),
            probe_storage: false,
            from_block: 0,
        }
    }
}

/// What a completed run observed.
#[derive(Debug, Clone)]
pub struct InteractionReport {
    pub steps: Vec<StepRecord>,
    /// Caller balances of ([`TOKEN_ID`], [`NFT_ID`]).
    pub caller_balances: (U256, U256),
    /// Recipient balances of ([`TOKEN_ID`], [`NFT_ID`]).
    pub recipient_balances: (U256, U256),
    pub probe: Option<ProbeOutcome>,
    pub transfers_single: Vec<EventRecord<TransferSingle>>,
    pub transfers_batch: Vec<EventRecord<TransferBatch>>,
}

/// Runs the sequence with `token`'s caller as the acting account.
pub async fn run(token: &Erc1155Token, script: &InteractionScript) -> Result<InteractionReport> {
    let caller = token.caller();
    let recipient = script.recipient;
    let token_id = U256::from(TOKEN_ID);
    let nft_id = U256::from(NFT_ID);
    let mut steps = StepLog::new();

    tracing::info!(
        target: "tokenops_erc1155::interact",
        contract = %token.address(),
        caller = %caller,
        "Attached to MyERC1155Token"
    );

    let price = token.price().await.context("price()")?;
    let cost = |amount: U256| {
        price
            .checked_mul(amount)
            .context("purchase cost overflows uint256")
    };

    steps
        .run(
            "buyNFT",
            token.buy_nft(caller, script.nft_count, cost(script.nft_count)?),
        )
        .await?;
    tracing::info!(target: "tokenops_erc1155::interact", "Minted {} NFTs to {}", script.nft_count, caller);

    steps
        .run(
            "buy",
            token.buy(caller, script.buy_amount, cost(script.buy_amount)?),
        )
        .await?;
    tracing::info!(target: "tokenops_erc1155::interact", "Bought {} tokens to {}", script.buy_amount, caller);

    steps
        .run("setApprovalForAll", token.set_approval_for_all(caller, true))
        .await?;
    tracing::info!(target: "tokenops_erc1155::interact", "Approved {} to manage tokens", caller);

    steps
        .run(
            "safeTransferFrom",
            token.safe_transfer_from(
                caller,
                recipient,
                token_id,
                script.single_transfer_amount,
                Bytes::new(),
            ),
        )
        .await?;
    tracing::info!(
        target: "tokenops_erc1155::interact",
        "Transferred {} tokens of id {} using safeTransferFrom",
        script.single_transfer_amount,
        TOKEN_ID
    );

    let (fungible, collectible) = script.batch_transfer_amounts;
    steps
        .run(
            "safeBatchTransferFrom",
            token.safe_batch_transfer_from(
                caller,
                recipient,
                vec![token_id, nft_id],
                vec![fungible, collectible],
                Bytes::new(),
            ),
        )
        .await?;
    tracing::info!(
        target: "tokenops_erc1155::interact",
        "Transferred {} of id {} and {} of id {} using safeBatchTransferFrom",
        fungible,
        TOKEN_ID,
        collectible,
        NFT_ID
    );

    let balances = token
        .balance_of_batch(
            vec![caller, caller, recipient, recipient],
            vec![token_id, nft_id, token_id, nft_id],
        )
        .await
        .context("balanceOfBatch")?;
    let [caller_fungible, caller_nft, recipient_fungible, recipient_nft] = balances[..] else {
        anyhow::bail!("balanceOfBatch returned {} values, expected 4", balances.len());
    };
    tracing::info!(
        target: "tokenops_erc1155::interact",
        caller = %format!("{caller_fungible}/{caller_nft}"),
        recipient = %format!("{recipient_fungible}/{recipient_nft}"),
        "Balances (id {}/id {})",
        TOKEN_ID,
        NFT_ID
    );

    let probe = if script.probe_storage {
        let outcome = probe_balance(
            token.handle().ledger().as_ref(),
            token.address(),
            caller,
            BalanceLayout::Nested {
                slot: BALANCE_SLOT,
                id: token_id,
            },
            caller_fungible,
        )
        .await
        .context("storage probe")?;
        Some(outcome)
    } else {
        None
    };

    let transfers_single = token
        .transfers_single(script.from_block)
        .await
        .context("TransferSingle history")?;
    tracing::info!(target: "tokenops_erc1155::interact", "TransferSingle events: {}", transfers_single.len());
    for record in &transfers_single {
        let e = &record.event;
        tracing::info!(
            target: "tokenops_erc1155::interact",
            block = record.block_number.unwrap_or(0),
            "Operator: {}, From: {}, To: {}, ID: {}, Amount: {}",
            e.operator,
            e.from,
            e.to,
            e.id,
            e.value
        );
    }

    let transfers_batch = token
        .transfers_batch(script.from_block)
        .await
        .context("TransferBatch history")?;
    tracing::info!(target: "tokenops_erc1155::interact", "TransferBatch events: {}", transfers_batch.len());
    for record in &transfers_batch {
        let e = &record.event;
        tracing::info!(
            target: "tokenops_erc1155::interact",
            block = record.block_number.unwrap_or(0),
            "Operator: {}, From: {}, To: {}, IDs: {:?}, Amounts: {:?}",
            e.operator,
            e.from,
            e.to,
            e.ids,
            e.values
        );
    }

    Ok(InteractionReport {
        steps: steps.into_records(),
        caller_balances: (caller_fungible, caller_nft),
        recipient_balances: (recipient_fungible, recipient_nft),
        probe,
        transfers_single,
        transfers_batch,
    })
}
