use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wallet::application::wallet::Wallet;
use wallet::domain::money::Money;
use wallet::domain::payment::PaymentStatus;
use wallet::error::WalletError;

mod common;

#[tokio::test]
async fn test_balance_matches_operation_history() {
    let mut rng = StdRng::seed_from_u64(42);
    let wallet = Wallet::new();
    let account_id = common::funded_account(&wallet, "+992000000001", 0).await;

    let mut deposits = 0i64;
    let mut paid = 0i64;
    let mut refunded = 0i64;
    let mut payment_ids = Vec::new();

    for _ in 0..500 {
        match rng.gen_range(0..3) {
            0 => {
                let amount = rng.gen_range(1..=5_000);
                wallet.deposit(account_id, Money::new(amount)).await.unwrap();
                deposits += amount;
            }
            1 => {
                let amount = rng.gen_range(1..=5_000);
                match wallet.pay(account_id, Money::new(amount), "food").await {
                    Ok(payment) => {
                        paid += amount;
                        payment_ids.push(payment.id);
                    }
                    Err(WalletError::NotEnoughBalance) => {}
                    Err(e) => panic!("unexpected error: {e}"),
                }
            }
            _ => {
                if payment_ids.is_empty() {
                    continue;
                }
                let id = &payment_ids[rng.gen_range(0..payment_ids.len())];
                let payment = wallet.find_payment_by_id(id).await.unwrap();
                wallet.reject(id).await.unwrap();
                refunded += payment.amount.cents();
            }
        }
    }

    assert_eq!(
        wallet.balance(account_id).await.unwrap(),
        Money::new(deposits - paid + refunded)
    );
}

#[tokio::test]
async fn test_failed_pay_does_not_mutate() {
    let wallet = Wallet::new();
    let account_id = common::funded_account(&wallet, "+992000000001", 1_000).await;

    for amount in [0, -100] {
        assert!(matches!(
            wallet.pay(account_id, Money::new(amount), "auto").await,
            Err(WalletError::AmountMustBePositive)
        ));
    }
    assert!(matches!(
        wallet.pay(account_id, Money::new(1_001), "auto").await,
        Err(WalletError::NotEnoughBalance)
    ));

    assert_eq!(wallet.balance(account_id).await.unwrap(), Money::new(1_000));
    assert!(wallet.snapshot().await.payments.is_empty());
}

#[tokio::test]
async fn test_duplicate_phone_does_not_advance_ids() {
    let wallet = Wallet::new();
    let first = wallet.register_account("+992000000001").await.unwrap();
    assert!(matches!(
        wallet.register_account("+992000000001").await,
        Err(WalletError::PhoneAlreadyRegistered(_))
    ));
    assert_eq!(wallet.next_account_id().await, first.id);

    let second = wallet.register_account("+992000000002").await.unwrap();
    assert_eq!(second.id, first.id + 1);
}

#[tokio::test]
async fn test_reject_repeat_favorite_flow() {
    let wallet = Wallet::new();
    let account_id = common::funded_account(&wallet, "+992000000001", 10_000_00).await;

    let payment = wallet.pay(account_id, Money::new(1_000_00), "mobile").await.unwrap();
    let favorite = wallet.favorite_payment(&payment.id, "phone").await.unwrap();

    wallet.reject(&payment.id).await.unwrap();
    assert_eq!(
        wallet.find_payment_by_id(&payment.id).await.unwrap().status,
        PaymentStatus::Fail
    );
    assert_eq!(wallet.balance(account_id).await.unwrap(), Money::new(10_000_00));

    let repeated = wallet.repeat(&payment.id).await.unwrap();
    assert_eq!(repeated.status, PaymentStatus::InProgress);
    assert_eq!(
        wallet.find_payment_by_id(&payment.id).await.unwrap().status,
        PaymentStatus::Fail
    );

    let from_favorite = wallet.pay_from_favorite(&favorite.id).await.unwrap();
    assert_eq!(from_favorite.amount, payment.amount);
    assert_eq!(from_favorite.category, payment.category);
    assert_eq!(wallet.balance(account_id).await.unwrap(), Money::new(8_000_00));

    let history = wallet.export_account_history(account_id).await.unwrap();
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_favorite_balance_checked_at_payment_time() {
    let wallet = Wallet::new();
    let account_id = common::funded_account(&wallet, "+992000000001", 1_000).await;
    let payment = wallet.pay(account_id, Money::new(400), "food").await.unwrap();
    let favorite = wallet.favorite_payment(&payment.id, "lunch").await.unwrap();

    wallet.pay(account_id, Money::new(500), "food").await.unwrap();

    assert!(matches!(
        wallet.pay_from_favorite(&favorite.id).await,
        Err(WalletError::NotEnoughBalance)
    ));
    assert_eq!(wallet.snapshot().await.payments.len(), 2);
}
