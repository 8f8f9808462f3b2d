use super::money::Money;
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};

/// A registered wallet account.
///
/// The balance never goes negative: debits that would overdraw the account are
/// rejected, never clamped.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    /// Sequential identifier assigned by the ledger, never reused.
    pub id: i64,
    /// Phone number, unique across all accounts.
    pub phone: String,
    /// Current balance in minor units.
    pub balance: Money,
}

impl Account {
    pub fn new(id: i64, phone: impl Into<String>) -> Self {
        Self {
            id,
            phone: phone.into(),
            balance: Money::ZERO,
        }
    }

    /// Credits the balance
    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Debits the balance if sufficient
    pub fn withdraw(&mut self, amount: Money) -> Result<()> {
        if self.balance < amount {
            return Err(WalletError::NotEnoughBalance);
        }
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }
}
