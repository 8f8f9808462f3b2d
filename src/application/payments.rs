use super::wallet::Wallet;
use crate::domain::ledger::Ledger;
use crate::domain::money::Money;
use crate::domain::payment::{Favorite, Payment, PaymentStatus};
use crate::error::{Result, WalletError};
use tracing::{info, warn};

impl Wallet {
    /// Debits the account and records a new `InProgress` payment.
    pub async fn pay(&self, account_id: i64, amount: Money, category: &str) -> Result<Payment> {
        let mut ledger = self.ledger.write().await;
        pay_locked(&mut ledger, account_id, amount, category)
    }

    /// Marks the payment as failed and refunds its full amount.
    ///
    /// Rejecting an already failed payment refunds again.
    pub async fn reject(&self, payment_id: &str) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        let (account_id, amount, status) = {
            let payment = ledger.find_payment(payment_id)?;
            (payment.account_id, payment.amount, payment.status)
        };
        ledger.find_account_mut(account_id)?.deposit(amount)?;
        ledger.find_payment_mut(payment_id)?.status = PaymentStatus::Fail;

        if status == PaymentStatus::Fail {
            warn!(payment_id, account_id, "payment rejected more than once, refunded again");
        }
        info!(payment_id, account_id, amount = amount.cents(), "payment rejected");
        Ok(())
    }

    /// Makes a new payment with the account, amount and category of an existing one.
    pub async fn repeat(&self, payment_id: &str) -> Result<Payment> {
        let mut ledger = self.ledger.write().await;
        let original = ledger.find_payment(payment_id)?.clone();
        pay_locked(
            &mut ledger,
            original.account_id,
            original.amount,
            &original.category,
        )
    }

    pub async fn favorite_payment(&self, payment_id: &str, name: &str) -> Result<Favorite> {
        let mut ledger = self.ledger.write().await;
        let favorite = Favorite::from_payment(ledger.find_payment(payment_id)?, name);
        ledger.push_favorite(favorite.clone());
        info!(favorite_id = %favorite.id, payment_id, "favorite created");
        Ok(favorite)
    }

    pub async fn pay_from_favorite(&self, favorite_id: &str) -> Result<Payment> {
        let mut ledger = self.ledger.write().await;
        let favorite = ledger.find_favorite(favorite_id)?.clone();
        pay_locked(
            &mut ledger,
            favorite.account_id,
            favorite.amount,
            &favorite.category,
        )
    }

    pub async fn find_payment_by_id(&self, payment_id: &str) -> Result<Payment> {
        self.ledger.read().await.find_payment(payment_id).cloned()
    }

    pub async fn find_favorite_by_id(&self, favorite_id: &str) -> Result<Favorite> {
        self.ledger.read().await.find_favorite(favorite_id).cloned()
    }
}

/// Debit and append under one write guard; nothing is mutated on failure.
fn pay_locked(
    ledger: &mut Ledger,
    account_id: i64,
    amount: Money,
    category: &str,
) -> Result<Payment> {
    if !amount.is_positive() {
        return Err(WalletError::AmountMustBePositive);
    }
    ledger.find_account_mut(account_id)?.withdraw(amount)?;

    let payment = Payment::new(account_id, amount, category);
    ledger.push_payment(payment.clone());
    info!(
        payment_id = %payment.id,
        account_id,
        amount = amount.cents(),
        category,
        "payment created"
    );
    Ok(payment)
}
