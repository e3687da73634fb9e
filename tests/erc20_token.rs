use alloy::primitives::U256;
use tokenops::Ledger;
use tokenops_devnet::Fixture;
use tokenops_erc20::{Erc20Deployment, Erc20Token, Transfer};

fn u(value: u64) -> U256 {
    U256::from(value)
}

/// Price 10 wei, 2% transfer fee, 1000 tokens of sale inventory.
async fn setup() -> (Fixture, Erc20Token) {
    let fx = Fixture::new();
    let (token, _) = Erc20Deployment::new(fx.owner, u(10), u(2))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();
    token.fund_contract(u(1000)).await.unwrap();
    (fx, token)
}

#[tokio::test]
async fn test_deployment_state() {
    let (fx, token) = setup().await;

    assert_eq!(token.owner().await.unwrap(), fx.owner);
    assert_eq!(token.name().await.unwrap(), "MyERC20Token");
    assert_eq!(token.symbol().await.unwrap(), "MTK");
    assert_eq!(token.decimals().await.unwrap(), 18);
    assert_eq!(token.price().await.unwrap(), u(10));
    assert_eq!(token.transfer_fee_percentage().await.unwrap(), u(2));
    assert_eq!(token.balance_of(fx.owner).await.unwrap(), u(1_000_000));
    assert_eq!(token.balance_of(token.address()).await.unwrap(), u(1000));
    assert_eq!(token.total_supply().await.unwrap(), u(1_001_000));
}

#[tokio::test]
async fn test_buy_tokens() {
    let (fx, token) = setup().await;
    let buyer = token.connect(fx.addr1);

    let receipt = buyer.buy(u(30)).await.unwrap();

    assert_eq!(token.balance_of(fx.addr1).await.unwrap(), u(3));
    assert_eq!(token.balance_of(token.address()).await.unwrap(), u(997));
    assert_eq!(
        receipt.decode::<Transfer>(),
        vec![Transfer {
            from: token.address(),
            to: fx.addr1,
            value: u(3),
        }]
    );
    assert_eq!(
        fx.devnet.native_balance(token.address()).await.unwrap(),
        u(30)
    );
}

#[tokio::test]
async fn test_buy_more_than_inventory_reverts() {
    let (fx, token) = setup().await;

    let err = token.connect(fx.addr1).buy(u(1_000_000)).await.unwrap_err();

    assert_eq!(err.revert_reason(), Some("Contract doesn't have enough tokens"));
    assert_eq!(token.balance_of(token.address()).await.unwrap(), u(1000));
}

#[tokio::test]
async fn test_buy_without_value_reverts() {
    let (fx, token) = setup().await;

    let err = token.connect(fx.addr1).buy(U256::ZERO).await.unwrap_err();

    assert!(err.is_revert());
    assert_eq!(err.revert_reason(), Some("Insufficient funds to buy tokens"));
}

#[tokio::test]
async fn test_set_transfer_fee_percentage() {
    let (_fx, token) = setup().await;

    token.set_transfer_fee_percentage(u(5)).await.unwrap();

    assert_eq!(token.transfer_fee_percentage().await.unwrap(), u(5));
}

#[tokio::test]
async fn test_fee_above_hundred_percent_reverts() {
    let (_fx, token) = setup().await;

    let err = token.set_transfer_fee_percentage(u(101)).await.unwrap_err();

    assert_eq!(err.revert_reason(), Some("Fee percentage too high"));
    assert_eq!(token.transfer_fee_percentage().await.unwrap(), u(2));
}

#[tokio::test]
async fn test_constructor_fee_above_hundred_panics_on_transfer() {
    let fx = Fixture::new();
    let (token, _) = Erc20Deployment::new(fx.owner, u(10), u(200))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();

    let err = token.transfer(fx.addr1, u(100)).await.unwrap_err();

    assert_eq!(err.revert_reason(), Some("Panic(0x11)"));
    assert_eq!(token.balance_of(fx.addr1).await.unwrap(), U256::ZERO);
    assert_eq!(token.balance_of(fx.owner).await.unwrap(), u(1_000_000));
}

#[tokio::test]
async fn test_transfer_charges_fee() {
    let (fx, token) = setup().await;

    let receipt = token.transfer(fx.addr1, u(1000)).await.unwrap();

    assert_eq!(token.balance_of(fx.addr1).await.unwrap(), u(980));
    assert_eq!(token.balance_of(token.address()).await.unwrap(), u(1020));
    assert_eq!(token.balance_of(fx.owner).await.unwrap(), u(999_000));

    let transfers = receipt.decode::<Transfer>();
    assert_eq!(transfers.len(), 2);
    assert_eq!(transfers[0].to, fx.addr1);
    assert_eq!(transfers[0].value, u(980));
    assert_eq!(transfers[1].to, token.address());
    assert_eq!(transfers[1].value, u(20));
}

#[tokio::test]
async fn test_transfer_from_charges_fee() {
    let (fx, token) = setup().await;

    token.approve(fx.addr1, u(1000)).await.unwrap();
    assert_eq!(token.allowance(fx.owner, fx.addr1).await.unwrap(), u(1000));

    token
        .connect(fx.addr1)
        .transfer_from(fx.owner, fx.addr1, u(1000))
        .await
        .unwrap();

    assert_eq!(token.balance_of(fx.addr1).await.unwrap(), u(980));
    assert_eq!(token.balance_of(token.address()).await.unwrap(), u(1020));
    assert_eq!(token.allowance(fx.owner, fx.addr1).await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_transfer_from_without_allowance_reverts() {
    let (fx, token) = setup().await;

    let err = token
        .connect(fx.addr1)
        .transfer_from(fx.owner, fx.addr1, u(1))
        .await
        .unwrap_err();

    assert_eq!(
        err.revert_reason(),
        Some(format!("ERC20InsufficientAllowance({}, 0, 1)", fx.addr1).as_str())
    );
}

#[tokio::test]
async fn test_admin_calls_are_owner_only() {
    let (fx, token) = setup().await;
    let stranger = token.connect(fx.addr1);
    let expected = format!("OwnableUnauthorizedAccount({})", fx.addr1);

    let err = stranger.mint(fx.addr1, u(1)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some(expected.as_str()));

    let err = stranger.set_transfer_fee_percentage(u(5)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some(expected.as_str()));

    let err = stranger.fund_contract(u(1)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_safe_transfer_and_safe_mint_guards() {
    let (fx, token) = setup().await;

    let err = token.safe_transfer(token.address(), u(1)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some("Invalid recipient"));

    let err = token.safe_mint(fx.addr1, U256::ZERO).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some("Amount must be greater than zero"));

    token.safe_mint(fx.addr1, u(10)).await.unwrap();
    assert_eq!(token.balance_of(fx.addr1).await.unwrap(), u(10));
}

#[tokio::test]
async fn test_transfer_history() {
    let (fx, token) = setup().await;
    token.transfer(fx.addr2, u(100)).await.unwrap();

    let history = token.transfers(0).await.unwrap();

    // Initial supply, inventory, then the transfer and its fee.
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].event.to, fx.owner);
    assert_eq!(history[1].event.to, token.address());
    assert_eq!(history[2].event.to, fx.addr2);
    assert_eq!(history[2].event.value, u(98));
    assert!(history
        .windows(2)
        .all(|pair| pair[0].block_number <= pair[1].block_number));
}
