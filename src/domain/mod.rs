//! Domain types: money, accounts, payments, favorites and the ledger that owns them.

pub mod account;
pub mod ledger;
pub mod money;
pub mod payment;
