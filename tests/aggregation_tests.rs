use std::collections::HashSet;
use tokio_stream::StreamExt;
use wallet::application::aggregation::{PROGRESS_BATCH_SIZE, Progress, is_mobile};
use wallet::application::wallet::Wallet;
use wallet::domain::money::Money;
use wallet::error::WalletError;

mod common;

fn ids(payments: &[wallet::domain::payment::Payment]) -> HashSet<String> {
    payments.iter().map(|payment| payment.id.clone()).collect()
}

#[tokio::test]
async fn test_sum_of_eleven_payments() {
    let wallet = Wallet::new();
    let account_id = common::funded_account(&wallet, "+992000000001", 66).await;
    for amount in 1..=11 {
        wallet.pay(account_id, Money::new(amount), "auto").await.unwrap();
    }

    for workers in 0..=15 {
        assert_eq!(wallet.sum_payments(workers).await.unwrap(), Money::new(66));
    }
}

#[tokio::test]
async fn test_sum_independent_of_worker_count() {
    let (wallet, _) = common::seeded_wallet(7, 5, 1_000).await;
    let expected: Money = wallet.snapshot().await.payments.iter().map(|p| p.amount).sum();

    for workers in [1, 2, 3, 7, 16, 999, 1_000, 1_001, 2_500] {
        assert_eq!(
            wallet.sum_payments(workers).await.unwrap(),
            expected,
            "workers = {workers}"
        );
    }
}

#[tokio::test]
async fn test_filter_payments_independent_of_worker_count() {
    let (wallet, accounts) = common::seeded_wallet(11, 4, 500).await;
    let snapshot = wallet.snapshot().await;

    for account_id in accounts {
        let expected: HashSet<String> = snapshot
            .payments
            .iter()
            .filter(|p| p.account_id == account_id)
            .map(|p| p.id.clone())
            .collect();

        for workers in [1, 3, 8, 600] {
            let filtered = wallet.filter_payments(account_id, workers).await.unwrap();
            assert_eq!(filtered.len(), expected.len());
            assert_eq!(ids(&filtered), expected);
            assert!(filtered.iter().all(|p| p.account_id == account_id));
        }
    }
}

#[tokio::test]
async fn test_filter_payments_unknown_account_for_any_worker_count() {
    let (wallet, _) = common::seeded_wallet(3, 2, 20).await;
    for workers in [0, 1, 4, 100] {
        assert!(matches!(
            wallet.filter_payments(404, workers).await,
            Err(WalletError::AccountNotFound(404))
        ));
    }
}

#[tokio::test]
async fn test_filter_payments_by_fn() {
    let (wallet, _) = common::seeded_wallet(5, 3, 400).await;
    let expected: HashSet<String> = wallet
        .snapshot()
        .await
        .payments
        .iter()
        .filter(|p| is_mobile(p))
        .map(|p| p.id.clone())
        .collect();
    assert!(!expected.is_empty());

    for workers in [1, 2, 5, 13, 401] {
        let filtered = wallet.filter_payments_by_fn(is_mobile, workers).await.unwrap();
        assert_eq!(ids(&filtered), expected);
    }

    let large = wallet
        .filter_payments_by_fn(|p| p.amount > Money::new(5_000), 4)
        .await
        .unwrap();
    assert!(large.iter().all(|p| p.amount > Money::new(5_000)));
}

#[tokio::test]
async fn test_aggregations_see_consistent_ledger_during_writes() {
    let wallet = Wallet::new();
    let account_id = common::funded_account(&wallet, "+992000000001", 1_000_000).await;

    let writer = {
        let wallet = wallet.clone();
        tokio::spawn(async move {
            for _ in 0..200 {
                wallet.pay(account_id, Money::new(5), "food").await.unwrap();
            }
        })
    };

    let mut readers = Vec::new();
    for workers in 1..=8 {
        let wallet = wallet.clone();
        readers.push(tokio::spawn(async move {
            let sum = wallet.sum_payments(workers).await.unwrap();
            let filtered = wallet.filter_payments(account_id, workers).await.unwrap();
            (sum, filtered.len())
        }));
    }

    writer.await.unwrap();
    for reader in readers {
        let (sum, _) = reader.await.unwrap();
        assert_eq!(sum.cents() % 5, 0);
        assert!(sum <= Money::new(1_000));
    }
    assert_eq!(wallet.sum_payments(4).await.unwrap(), Money::new(1_000));
}

#[tokio::test]
async fn test_progress_spans_multiple_batches() {
    let wallet = Wallet::new();
    let total = PROGRESS_BATCH_SIZE as i64 + 1;
    let account_id = common::funded_account(&wallet, "+992000000001", total).await;
    for _ in 0..total {
        wallet.pay(account_id, Money::new(1), "auto").await.unwrap();
    }

    let progress: Vec<Progress> = wallet.sum_payments_with_progress().await.collect().await;
    assert_eq!(
        progress,
        vec![
            Progress {
                part: 0,
                result: Money::new(PROGRESS_BATCH_SIZE as i64)
            },
            Progress {
                part: 1,
                result: Money::new(1)
            },
        ]
    );
}
