use alloy::primitives::{Address, Bytes, U256};
use tokenops_devnet::contracts::erc1155::{INITIAL_STOCK, URI};
use tokenops_devnet::Fixture;
use tokenops_erc1155::{Erc1155Deployment, Erc1155Token, TransferBatch, TransferSingle, NFT_ID, TOKEN_ID};

fn u(value: u64) -> U256 {
    U256::from(value)
}

fn token_id() -> U256 {
    U256::from(TOKEN_ID)
}

fn nft_id() -> U256 {
    U256::from(NFT_ID)
}

/// Price 10 wei per unit.
async fn setup() -> (Fixture, Erc1155Token) {
    let fx = Fixture::new();
    let (token, _) = Erc1155Deployment::new(fx.owner, u(10))
        .deploy(fx.ledger(), fx.owner)
        .await
        .unwrap();
    (fx, token)
}

/// `addr1` holds 10 units of the fungible id and 2 of the NFT id.
async fn setup_with_holdings() -> (Fixture, Erc1155Token) {
    let (fx, token) = setup().await;
    let buyer = token.connect(fx.addr1);
    buyer.buy(fx.addr1, u(10), u(100)).await.unwrap();
    buyer.buy_nft(fx.addr1, u(2), u(20)).await.unwrap();
    (fx, token)
}

#[tokio::test]
async fn test_deployment_state() {
    let (fx, token) = setup().await;

    assert_eq!(token.owner().await.unwrap(), fx.owner);
    assert_eq!(token.price().await.unwrap(), u(10));
    assert_eq!(token.max_elements().await.unwrap(), u(7));
    assert_eq!(
        token.balance_of(token.address(), token_id()).await.unwrap(),
        U256::from(INITIAL_STOCK)
    );
    assert_eq!(token.uri(token_id()).await.unwrap(), URI);
}

#[tokio::test]
async fn test_buy_sells_from_contract_stock() {
    let (fx, token) = setup().await;

    let receipt = token
        .connect(fx.addr1)
        .buy(fx.addr1, u(10), u(100))
        .await
        .unwrap();

    assert_eq!(
        receipt.first::<TransferSingle>(),
        Some(TransferSingle {
            operator: token.address(),
            from: token.address(),
            to: fx.addr1,
            id: token_id(),
            value: u(10),
        })
    );
    assert_eq!(token.balance_of(fx.addr1, token_id()).await.unwrap(), u(10));
    assert_eq!(
        token.balance_of(token.address(), token_id()).await.unwrap(),
        U256::from(INITIAL_STOCK) - u(10)
    );
}

#[tokio::test]
async fn test_buy_below_price_reverts() {
    let (fx, token) = setup().await;

    let err = token
        .connect(fx.addr1)
        .buy(fx.addr1, u(10), u(99))
        .await
        .unwrap_err();

    assert_eq!(err.revert_reason(), Some("Insufficient funds to buy the tokens"));
    assert_eq!(token.balance_of(fx.addr1, token_id()).await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_buy_nft_mints_nft_id() {
    let (fx, token) = setup().await;

    let receipt = token
        .connect(fx.addr1)
        .buy_nft(fx.addr1, u(3), u(30))
        .await
        .unwrap();

    assert_eq!(
        receipt.first::<TransferSingle>(),
        Some(TransferSingle {
            operator: fx.addr1,
            from: Address::ZERO,
            to: fx.addr1,
            id: nft_id(),
            value: u(3),
        })
    );
    assert_eq!(token.balance_of(fx.addr1, nft_id()).await.unwrap(), u(3));
}

#[tokio::test]
async fn test_buy_nft_past_cap_reverts() {
    let (fx, token) = setup().await;
    let buyer = token.connect(fx.addr1);

    let err = buyer.buy_nft(fx.addr1, u(8), u(80)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some("Max limit exceeded"));

    buyer.buy_nft(fx.addr1, u(5), u(50)).await.unwrap();
    let err = buyer.buy_nft(fx.addr1, u(3), u(30)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some("Max limit exceeded"));

    let err = buyer.buy_nft(fx.addr1, u(2), u(10)).await.unwrap_err();
    assert_eq!(err.revert_reason(), Some("Insufficient funds to buy the tokens"));

    assert_eq!(token.balance_of(fx.addr1, nft_id()).await.unwrap(), u(5));
}

#[tokio::test]
async fn test_safe_transfer_moves_only_named_id() {
    let (fx, token) = setup_with_holdings().await;

    token
        .connect(fx.addr1)
        .safe_transfer_from(fx.addr1, fx.addr2, token_id(), u(4), Bytes::new())
        .await
        .unwrap();

    let balances = token
        .balance_of_batch(
            vec![fx.addr1, fx.addr1, fx.addr2, fx.addr2],
            vec![token_id(), nft_id(), token_id(), nft_id()],
        )
        .await
        .unwrap();
    assert_eq!(balances, vec![u(6), u(2), u(4), U256::ZERO]);
}

#[tokio::test]
async fn test_safe_batch_transfer() {
    let (fx, token) = setup_with_holdings().await;

    let receipt = token
        .connect(fx.addr1)
        .safe_batch_transfer_from(
            fx.addr1,
            fx.addr2,
            vec![token_id(), nft_id()],
            vec![u(5), u(1)],
            Bytes::new(),
        )
        .await
        .unwrap();

    let batch = receipt.first::<TransferBatch>().unwrap();
    assert_eq!(batch.operator, fx.addr1);
    assert_eq!(batch.ids, vec![token_id(), nft_id()]);
    assert_eq!(batch.values, vec![u(5), u(1)]);

    assert_eq!(token.balance_of(fx.addr1, token_id()).await.unwrap(), u(5));
    assert_eq!(token.balance_of(fx.addr1, nft_id()).await.unwrap(), u(1));
    assert_eq!(token.balance_of(fx.addr2, token_id()).await.unwrap(), u(5));
    assert_eq!(token.balance_of(fx.addr2, nft_id()).await.unwrap(), u(1));
}

#[tokio::test]
async fn test_overdraw_reverts() {
    let (fx, token) = setup_with_holdings().await;
    let holder = token.connect(fx.addr1);

    let err = holder
        .safe_transfer_from(fx.addr1, fx.addr2, token_id(), u(11), Bytes::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.revert_reason(),
        Some(format!("ERC1155InsufficientBalance({}, 10, 11, 0)", fx.addr1).as_str())
    );

    let err = holder
        .safe_batch_transfer_from(
            fx.addr1,
            fx.addr2,
            vec![token_id(), nft_id()],
            vec![u(1), u(3)],
            Bytes::new(),
        )
        .await
        .unwrap_err();
    assert!(err.is_revert());

    // The reverted batch moved nothing, not even the first id.
    assert_eq!(token.balance_of(fx.addr1, token_id()).await.unwrap(), u(10));
    assert_eq!(token.balance_of(fx.addr2, token_id()).await.unwrap(), U256::ZERO);
}

#[tokio::test]
async fn test_operator_transfers_need_approval() {
    let (fx, token) = setup_with_holdings().await;
    let operator = token.connect(fx.addr2);

    let err = operator
        .safe_transfer_from(fx.addr1, fx.addr2, token_id(), u(1), Bytes::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.revert_reason(),
        Some(format!("ERC1155MissingApprovalForAll({}, {})", fx.addr2, fx.addr1).as_str())
    );

    token
        .connect(fx.addr1)
        .set_approval_for_all(fx.addr2, true)
        .await
        .unwrap();
    assert!(token.is_approved_for_all(fx.addr1, fx.addr2).await.unwrap());

    operator
        .safe_transfer_from(fx.addr1, fx.addr2, token_id(), u(1), Bytes::new())
        .await
        .unwrap();
    assert_eq!(token.balance_of(fx.addr2, token_id()).await.unwrap(), u(1));
}

#[tokio::test]
async fn test_owner_mint_batch() {
    let (fx, token) = setup().await;
    let ids = vec![u(2), u(3), u(4)];
    let amounts = vec![u(1), u(1), u(1)];

    let receipt = token
        .mint_batch(fx.addr1, ids.clone(), amounts.clone(), Bytes::new())
        .await
        .unwrap();

    assert_eq!(
        receipt.first::<TransferBatch>(),
        Some(TransferBatch {
            operator: fx.owner,
            from: Address::ZERO,
            to: fx.addr1,
            ids,
            values: amounts,
        })
    );
    assert_eq!(token.balance_of(fx.addr1, u(3)).await.unwrap(), u(1));

    let err = token
        .connect(fx.addr1)
        .mint_batch(fx.addr1, vec![u(2)], vec![u(1)], Bytes::new())
        .await
        .unwrap_err();
    assert_eq!(
        err.revert_reason(),
        Some(format!("OwnableUnauthorizedAccount({})", fx.addr1).as_str())
    );
}

#[tokio::test]
async fn test_transfer_history() {
    let (fx, token) = setup_with_holdings().await;
    token
        .connect(fx.addr1)
        .safe_batch_transfer_from(
            fx.addr1,
            fx.addr2,
            vec![token_id(), nft_id()],
            vec![u(1), u(1)],
            Bytes::new(),
        )
        .await
        .unwrap();

    let singles = token.transfers_single(0).await.unwrap();
    let batches = token.transfers_batch(0).await.unwrap();

    // Constructor stock, buy, buyNFT.
    assert_eq!(singles.len(), 3);
    assert_eq!(singles[0].event.to, token.address());
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].event.to, fx.addr2);
}
