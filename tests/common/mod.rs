use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wallet::application::wallet::Wallet;
use wallet::domain::money::Money;

const CATEGORIES: [&str; 4] = ["auto", "food", "mobile", "utilities"];

/// Registers an account and deposits `balance` into it.
pub async fn funded_account(wallet: &Wallet, phone: &str, balance: i64) -> i64 {
    let account = wallet.register_account(phone).await.unwrap();
    if balance > 0 {
        wallet.deposit(account.id, Money::new(balance)).await.unwrap();
    }
    account.id
}

/// Builds a wallet with `accounts` accounts and `payments` random payments spread
/// over them. Returns the wallet and the ids of the accounts.
#[allow(dead_code)]
pub async fn seeded_wallet(seed: u64, accounts: usize, payments: usize) -> (Wallet, Vec<i64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let wallet = Wallet::new();

    let mut ids = Vec::with_capacity(accounts);
    for i in 0..accounts {
        let phone = format!("+9920000{i:05}");
        ids.push(funded_account(&wallet, &phone, 1_000_000_000).await);
    }

    for _ in 0..payments {
        let account_id = ids[rng.gen_range(0..ids.len())];
        let amount = Money::new(rng.gen_range(1..=10_000));
        let category = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
        wallet.pay(account_id, amount, category).await.unwrap();
    }

    (wallet, ids)
}
