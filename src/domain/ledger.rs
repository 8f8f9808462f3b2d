use super::account::Account;
use super::money::Money;
use super::payment::{Favorite, Payment};
use crate::error::{Result, WalletError};

/// Full copy of the ledger contents, as consumed and produced by the dump codecs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub accounts: Vec<Account>,
    pub payments: Vec<Payment>,
    pub favorites: Vec<Favorite>,
}

/// In-memory store of accounts, payments and favorites.
///
/// Collections keep insertion order; lookups scan linearly and IDs are unique, so
/// the first match is the only match. The aggregation engine partitions
/// `payments()` by index, which is why payments live in a `Vec`.
#[derive(Debug, Default)]
pub struct Ledger {
    next_account_id: i64,
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account with zero balance under the next sequential ID.
    ///
    /// The ID counter only advances when registration succeeds.
    pub fn register_account(&mut self, phone: &str) -> Result<Account> {
        if self.accounts.iter().any(|account| account.phone == phone) {
            return Err(WalletError::PhoneAlreadyRegistered(phone.to_string()));
        }
        let id = self
            .next_account_id
            .checked_add(1)
            .ok_or(WalletError::AccountIdsExhausted)?;
        let account = Account::new(id, phone);
        self.next_account_id = id;
        self.accounts.push(account.clone());
        Ok(account)
    }

    pub fn find_account(&self, id: i64) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|account| account.id == id)
            .ok_or(WalletError::AccountNotFound(id))
    }

    pub fn find_account_mut(&mut self, id: i64) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or(WalletError::AccountNotFound(id))
    }

    pub fn find_payment(&self, id: &str) -> Result<&Payment> {
        self.payments
            .iter()
            .find(|payment| payment.id == id)
            .ok_or_else(|| WalletError::PaymentNotFound(id.to_string()))
    }

    pub fn find_payment_mut(&mut self, id: &str) -> Result<&mut Payment> {
        self.payments
            .iter_mut()
            .find(|payment| payment.id == id)
            .ok_or_else(|| WalletError::PaymentNotFound(id.to_string()))
    }

    pub fn find_favorite(&self, id: &str) -> Result<&Favorite> {
        self.favorites
            .iter()
            .find(|favorite| favorite.id == id)
            .ok_or_else(|| WalletError::FavoriteNotFound(id.to_string()))
    }

    pub fn push_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    pub fn push_favorite(&mut self, favorite: Favorite) {
        self.favorites.push(favorite);
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn next_account_id(&self) -> i64 {
        self.next_account_id
    }

    pub fn upsert_account(&mut self, account: Account) {
        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => self.accounts.push(account),
        }
    }

    pub fn upsert_payment(&mut self, payment: Payment) {
        match self.payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => *existing = payment,
            None => self.payments.push(payment),
        }
    }

    pub fn upsert_favorite(&mut self, favorite: Favorite) {
        match self.favorites.iter_mut().find(|f| f.id == favorite.id) {
            Some(existing) => *existing = favorite,
            None => self.favorites.push(favorite),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            accounts: self.accounts.clone(),
            payments: self.payments.clone(),
            favorites: self.favorites.clone(),
        }
    }

    /// Upserts every entity of `snapshot`, then resets the ID counter to the
    /// highest account ID present.
    ///
    /// A snapshot holding an account with a negative balance is rejected as a
    /// whole and leaves the ledger untouched. Phone uniqueness is not re-checked.
    pub fn restore(&mut self, snapshot: LedgerSnapshot) -> Result<()> {
        if let Some(account) = snapshot.accounts.iter().find(|a| a.balance < Money::ZERO) {
            return Err(WalletError::NegativeBalance(account.id));
        }
        for account in snapshot.accounts {
            self.upsert_account(account);
        }
        for payment in snapshot.payments {
            self.upsert_payment(payment);
        }
        for favorite in snapshot.favorites {
            self.upsert_favorite(favorite);
        }
        self.next_account_id = self.accounts.iter().map(|a| a.id).max().unwrap_or(0);
        Ok(())
    }
}
