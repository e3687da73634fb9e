//! Fixed demonstration sequence against a deployed `MyERC20Token`.

use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use tokenops::storage_probe::{probe_balance, BalanceLayout, ProbeOutcome};
use tokenops::{EventRecord, StepLog, StepRecord, DEFAULT_RECIPIENT};

use crate::bindings::Transfer;
use crate::token::Erc20Token;

/// Assumed slot of the `balances` mapping.
pub const BALANCE_SLOT: u64 = 0;

/// Amounts and options of one interaction run.
#[derive(Debug, Clone)]
pub struct InteractionScript {
    pub recipient: Address,
    pub mint_amount: U256,
    pub transfer_amount: U256,
    pub transfer_from_amount: U256,
    /// Minimum top-up minted to the contract when its inventory cannot
    /// cover `buy`.
    pub fund_amount: U256,
    /// Wei sent with `buy`.
    pub buy_value: U256,
    pub safe_transfer_amount: U256,
    pub safe_mint_amount: U256,
    /// Cross-check `balanceOf` against a raw storage read.
    pub probe_storage: bool,
    /// First block of the `Transfer` history query.
    pub from_block: u64,
}

impl Default for InteractionScript {
    fn default() -> Self {
        Self {
            recipient: DEFAULT_RECIPIENT,
            mint_amount: U256::from(100u64),
            transfer_amount: U256::from(50u64),
            transfer_from_amount: U256::from(50u64),
            fund_amount: U256::from(10u64),
            buy_value: U256::from(10u64),
            safe_transfer_amount: U256::from(10u64),
            safe_mint_amount: U256::from(10u64),
            probe_storage: false,
            from_block: 0,
        }
    }
}

/// What a completed run observed.
#[derive(Debug, Clone)]
pub struct InteractionReport {
    pub steps: Vec<StepRecord>,
    pub caller_balance: U256,
    pub recipient_balance: U256,
    pub contract_balance: U256,
    pub probe: Option<ProbeOutcome>,
    pub transfers: Vec<EventRecord<Transfer>>,
}

/// Runs the sequence with `token`'s caller as the acting account.
pub async fn run(token: &Erc20Token, script: &InteractionScript) -> Result<InteractionReport> {
    let caller = token.caller();
    let recipient = script.recipient;
    let mut steps = StepLog::new();

    tracing::info!(
        target: "tokenops_erc20::interact",
        contract = %token.address(),
        caller = %caller,
        "Attached to MyERC20Token"
    );

    steps
        .run("mint", token.mint(caller, script.mint_amount))
        .await?;
    tracing::info!(target: "tokenops_erc20::interact", "Minted {} tokens to {}", script.mint_amount, caller);

    steps
        .run("transfer", token.transfer(recipient, script.transfer_amount))
        .await?;
    tracing::info!(target: "tokenops_erc20::interact", "Transferred {} tokens to {}", script.transfer_amount, recipient);

    steps
        .run("approve", token.approve(caller, script.transfer_from_amount))
        .await?;
    steps
        .run(
            "transferFrom",
            token.transfer_from(caller, recipient, script.transfer_from_amount),
        )
        .await?;
    tracing::info!(target: "tokenops_erc20::interact", "Transferred {} tokens using transferFrom", script.transfer_from_amount);

    let price = token.price().await.context("price()")?;
    let needed = script
        .buy_value
        .checked_div(price)
        .context("token price is zero")?;
    let inventory = token
        .balance_of(token.address())
        .await
        .context("balanceOf(contract)")?;
    if inventory < needed {
        let amount = script.fund_amount.max(needed - inventory);
        steps
            .run("fundContract", token.fund_contract(amount))
            .await?;
        tracing::info!(target: "tokenops_erc20::interact", "Funded contract with {} tokens", amount);
    } else {
        tracing::info!(target: "tokenops_erc20::interact", inventory = %inventory, "Contract inventory covers the purchase");
    }

    steps.run("buy", token.buy(script.buy_value)).await?;
    tracing::info!(target: "tokenops_erc20::interact", "Bought tokens for {} wei", script.buy_value);

    steps
        .run(
            "safeTransfer",
            token.safe_transfer(recipient, script.safe_transfer_amount),
        )
        .await?;
    tracing::info!(target: "tokenops_erc20::interact", "Safe transferred {} tokens", script.safe_transfer_amount);

    steps
        .run("safeMint", token.safe_mint(caller, script.safe_mint_amount))
        .await?;
    tracing::info!(target: "tokenops_erc20::interact", "Safe minted {} tokens", script.safe_mint_amount);

    let caller_balance = token.balance_of(caller).await.context("balanceOf(caller)")?;
    let recipient_balance = token
        .balance_of(recipient)
        .await
        .context("balanceOf(recipient)")?;
    let contract_balance = token
        .balance_of(token.address())
        .await
        .context("balanceOf(contract)")?;
    tracing::info!(
        target: "tokenops_erc20::interact",
        caller = %caller_balance,
        recipient = %recipient_balance,
        contract = %contract_balance,
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
    tracing::info!(target: "tokenops_erc20::interact", "Transfer events: {}", transfers.len());
    for record in &transfers {
        tracing::info!(
            target: "tokenops_erc20::interact",
            block = record.block_number.unwrap_or(0),
            "From: {}, To: {}, Amount: {}",
            record.event.from,
            record.event.to,
            record.event.value
        );
    }

    Ok(InteractionReport {
        steps: steps.into_records(),
        caller_balance,
        recipient_balance,
        contract_balance,
        probe,
        transfers,
    })
}
