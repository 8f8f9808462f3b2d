use super::money::Money;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum PaymentStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "FAIL")]
    Fail,
    #[default]
    #[serde(rename = "INPROGRESS")]
    InProgress,
}

/// A debit made from an account.
///
/// Starts out `InProgress`; rejection moves it to `Fail` and refunds the amount.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Payment {
    pub id: String,
    pub account_id: i64,
    pub amount: Money,
    pub category: String,
    pub status: PaymentStatus,
}

impl Payment {
    pub fn new(account_id: i64, amount: Money, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id,
            amount,
            category: category.into(),
            status: PaymentStatus::InProgress,
        }
    }
}

/// A named snapshot of a payment's account, amount and category.
///
/// Holds no link back to the payment it was taken from.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Favorite {
    pub id: String,
    pub account_id: i64,
    pub name: String,
    pub amount: Money,
    pub category: String,
}

impl Favorite {
    pub fn from_payment(payment: &Payment, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: payment.account_id,
            name: name.into(),
            amount: payment.amount,
            category: payment.category.clone(),
        }
    }
}
