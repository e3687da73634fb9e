//! The interaction sequences run end-to-end against freshly deployed contracts.

use alloy::primitives::U256;
use tokenops::DEFAULT_RECIPIENT;
use tokenops_devnet::Fixture;
use tokenops_erc1155::Erc1155Deployment;
use tokenops_erc20::Erc20Deployment;
use tokenops_erc721::Erc721Deployment;

fn u(value: u64) -> U256 {
    U256::from(value)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_erc20_interaction() {
    init_tracing();
    let fx = Fixture::new();
    let (token, _) = Erc20Deployment::new(fx.owner, u(1), u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let script = tokenops_erc20::InteractionScript {
        probe_storage: true,
        ..Default::default()
    };
    let report = tokenops_erc20::interact::run(&token, &script).await.unwrap();

    let names: Vec<&str> = report.steps.iter().map(|step| step.name).collect();
    assert_eq!(
        names,
        [
            "mint",
            "transfer",
            "approve",
            "transferFrom",
            "fundContract",
            "buy",
            "safeTransfer",
            "safeMint"
        ]
    );
    assert!(report
        .steps
        .windows(2)
        .all(|pair| pair[0].block_number < pair[1].block_number));

    // 1% of 50 and of 10 round down to no fee.
    assert_eq!(report.caller_balance, u(1_000_010));
    assert_eq!(report.recipient_balance, u(110));
    assert_eq!(report.contract_balance, U256::ZERO);

    let probe = report.probe.unwrap();
    assert!(probe.matches());
    assert_eq!(probe.storage_value, u(1_000_010));

    // Initial supply plus one Transfer per token-moving step.
    assert_eq!(report.transfers.len(), 8);
    assert_eq!(report.transfers[2].event.to, DEFAULT_RECIPIENT);
}

#[tokio::test]
async fn test_erc20_interaction_skips_funding_with_inventory() {
    let fx = Fixture::new();
    let (token, _) = Erc20Deployment::new(fx.owner, u(1), u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();
    token.fund_contract(u(100)).await.unwrap();

    let report = tokenops_erc20::interact::run(&token, &Default::default())
        .await
        .unwrap();

    assert!(report.steps.iter().all(|step| step.name != "fundContract"));
    assert_eq!(report.steps.len(), 7);
    assert_eq!(report.contract_balance, u(90));
}

#[tokio::test]
async fn test_erc20_interaction_stops_at_first_failure() {
    let fx = Fixture::new();
    let (token, _) = Erc20Deployment::new(fx.owner, u(1), u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let err = tokenops_erc20::interact::run(&token.connect(fx.addr1), &Default::default())
        .await
        .unwrap_err();

    assert!(format!("{err:#}").starts_with("step 'mint' failed"));
    assert_eq!(token.balance_of(DEFAULT_RECIPIENT).await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_erc721_interaction() {
    init_tracing();
    let fx = Fixture::new();
    let (token, _) = Erc721Deployment::new(fx.owner, u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let script = tokenops_erc721::InteractionScript {
        recipient: fx.addr2,
        probe_storage: true,
        ..Default::default()
    };
    let report = tokenops_erc721::interact::run(&token, &script).await.unwrap();

    assert_eq!(report.minted, u(1)..=u(4));
    assert_eq!(report.transferred, vec![u(2), u(3)]);
    assert_eq!(report.caller_balance, u(2));
    assert_eq!(report.recipient_balance, u(2));
    assert_eq!(token.owner_of(u(3)).await.unwrap(), fx.addr2);
    assert!(report.probe.unwrap().matches());
    assert_eq!(report.transfers.len(), 6);
}

#[tokio::test]
async fn test_erc721_interaction_continues_numbering() {
    let fx = Fixture::new();
    let (token, _) = Erc721Deployment::new(fx.owner, u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();
    token.mint(fx.owner, u(2), u(2)).await.unwrap();

    let script = tokenops_erc721::InteractionScript {
        mint_count: u(3),
        ..Default::default()
    };
    let report = tokenops_erc721::interact::run(&token, &script).await.unwrap();

    assert_eq!(report.minted, u(3)..=u(5));
    assert_eq!(report.transferred, vec![u(4), u(5)]);

    // A second run would pass the cap of 7.
    let err = tokenops_erc721::interact::run(&token, &script).await.unwrap_err();
    assert!(format!("{err:#}").contains("Max limit"));
}

#[tokio::test]
async fn test_erc721_interaction_rejects_small_mint_count() {
    let fx = Fixture::new();
    let (token, _) = Erc721Deployment::new(fx.owner, u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let script = tokenops_erc721::InteractionScript {
        mint_count: u(2),
        ..Default::default()
    };
    assert!(tokenops_erc721::interact::run(&token, &script).await.is_err());
    assert_eq!(token.total_mint().await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_erc721_interaction_huge_mint_count_reverts() {
    let fx = Fixture::new();
    let (token, _) = Erc721Deployment::new(fx.owner, u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let script = tokenops_erc721::InteractionScript {
        mint_count: u(u64::MAX),
        ..Default::default()
    };
    let err = tokenops_erc721::interact::run(&token, &script).await.unwrap_err();

    assert!(format!("{err:#}").contains("Max limit"));
    assert_eq!(token.total_mint().await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_erc1155_interaction() {
    init_tracing();
    let fx = Fixture::new();
    let (token, _) = Erc1155Deployment::new(fx.owner, u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let script = tokenops_erc1155::InteractionScript {
        recipient: fx.addr2,
        batch_transfer_amounts: (u(2), u(1)),
        probe_storage: true,
        ..Default::default()
    };
    let report = tokenops_erc1155::interact::run(&token, &script).await.unwrap();

    assert_eq!(report.steps.len(), 5);
    assert_eq!(report.caller_balances, (u(3), u(2)));
    assert_eq!(report.recipient_balances, (u(7), u(1)));

    let probe = report.probe.unwrap();
    assert!(probe.matches());
    assert_eq!(probe.storage_value, u(3));

    // Constructor stock, buyNFT, buy, safeTransferFrom.
    assert_eq!(report.transfers_single.len(), 4);
    assert_eq!(report.transfers_batch.len(), 1);
    assert_eq!(report.transfers_batch[0].event.values, vec![u(2), u(1)]);
}

#[tokio::test]
async fn test_history_respects_from_block() {
    let fx = Fixture::new();
    let (token, deployed) = Erc1155Deployment::new(fx.owner, u(1))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();
    let deployed_at = deployed.block_number.unwrap();

    let script = tokenops_erc1155::InteractionScript {
        from_block: deployed_at + 1,
        ..Default::default()
    };
    let report = tokenops_erc1155::interact::run(&token, &script).await.unwrap();

    assert_eq!(report.transfers_single.len(), 3);
    assert!(report
        .transfers_single
        .iter()
        .all(|record| record.block_number.unwrap() > deployed_at));
}
