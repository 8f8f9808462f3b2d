use super::{read_records, reader_builder, write_records, writer_builder};
use crate::application::wallet::Wallet;
use crate::domain::account::Account;
use crate::domain::ledger::LedgerSnapshot;
use crate::error::Result;
use std::path::Path;

/// Single-file account dumps use `|` between records instead of newlines.
const RECORD_TERMINATOR: csv::Terminator = csv::Terminator::Any(b'|');

/// Writes every account to `path` as `id;phone;balance|` records.
pub async fn export_accounts_to_file(wallet: &Wallet, path: impl AsRef<Path>) -> Result<()> {
    let accounts = wallet.snapshot().await.accounts;
    let writer = writer_builder()
        .terminator(RECORD_TERMINATOR)
        .from_path(path)?;
    write_records(writer, &accounts)
}

/// Upserts the accounts stored in `path`.
pub async fn import_accounts_from_file(wallet: &Wallet, path: impl AsRef<Path>) -> Result<()> {
    let reader = reader_builder()
        .terminator(RECORD_TERMINATOR)
        .from_path(path)?;
    let accounts: Vec<Account> = read_records(reader)?;
    wallet
        .restore(LedgerSnapshot {
            accounts,
            ..Default::default()
        })
        .await
}
