use crate::domain::account::Account;
use crate::domain::ledger::{Ledger, LedgerSnapshot};
use crate::domain::money::Money;
use crate::domain::payment::Payment;
use crate::error::{Result, WalletError};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// The wallet service.
///
/// Owns the ledger behind a single `RwLock`. Mutating operations hold the write
/// lock for their whole duration; aggregations hold a read lock until their last
/// worker finishes, so the payment collection never changes under a scan.
///
/// Cloning is cheap and every clone shares the same ledger.
#[derive(Default, Clone)]
pub struct Wallet {
    pub(crate) ledger: Arc<RwLock<Ledger>>,
}

impl Wallet {
    /// Creates a wallet with an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new account for `phone` with a zero balance.
    pub async fn register_account(&self, phone: &str) -> Result<Account> {
        let account = self.ledger.write().await.register_account(phone)?;
        info!(account_id = account.id, "account registered");
        Ok(account)
    }

    /// Credits `amount` to the account.
    pub async fn deposit(&self, account_id: i64, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(WalletError::AmountMustBePositive);
        }
        let mut ledger = self.ledger.write().await;
        ledger.find_account_mut(account_id)?.deposit(amount)?;
        info!(account_id, amount = amount.cents(), "deposit applied");
        Ok(())
    }

    pub async fn find_account_by_id(&self, account_id: i64) -> Result<Account> {
        self.ledger.read().await.find_account(account_id).cloned()
    }

    pub async fn balance(&self, account_id: i64) -> Result<Money> {
        Ok(self.ledger.read().await.find_account(account_id)?.balance)
    }

    /// Returns copies of every payment made from the account, oldest first.
    pub async fn export_account_history(&self, account_id: i64) -> Result<Vec<Payment>> {
        let ledger = self.ledger.read().await;
        ledger.find_account(account_id)?;
        Ok(ledger
            .payments()
            .iter()
            .filter(|payment| payment.account_id == account_id)
            .cloned()
            .collect())
    }

    pub async fn next_account_id(&self) -> i64 {
        self.ledger.read().await.next_account_id()
    }

    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.read().await.snapshot()
    }

    /// Upserts a snapshot into the ledger (used by the dump importers).
    pub async fn restore(&self, snapshot: LedgerSnapshot) -> Result<()> {
        let (accounts, payments, favorites) = (
            snapshot.accounts.len(),
            snapshot.payments.len(),
            snapshot.favorites.len(),
        );
        self.ledger.write().await.restore(snapshot)?;
        info!(accounts, payments, favorites, "ledger restored");
        Ok(())
    }
}
