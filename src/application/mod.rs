//! Application layer: the `Wallet` service and its operations.
//!
//! `Wallet` owns the ledger behind a `tokio` read/write lock. Account and payment
//! operations mutate it under the write lock; the aggregation engine scans the
//! payment collection with concurrent workers under a shared read lock.

pub mod aggregation;
pub mod payments;
pub mod wallet;

