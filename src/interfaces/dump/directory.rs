use super::{
    ACCOUNTS_FILE, FAVORITES_FILE, PAYMENTS_FILE, read_records, reader_builder, write_records,
    writer_builder,
};
use crate::application::wallet::Wallet;
use crate::domain::ledger::LedgerSnapshot;
use crate::error::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes the ledger into `accounts.dump`, `payments.dump` and `favorites.dump`
/// inside `dir`, creating the directory if needed.
///
/// Empty collections produce no file.
pub async fn export(wallet: &Wallet, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let snapshot = wallet.snapshot().await;
    export_collection(&dir.join(ACCOUNTS_FILE), &snapshot.accounts)?;
    export_collection(&dir.join(PAYMENTS_FILE), &snapshot.payments)?;
    export_collection(&dir.join(FAVORITES_FILE), &snapshot.favorites)?;

    info!(dir = %dir.display(), "ledger exported");
    Ok(())
}

/// Loads whichever dump files exist in `dir` and upserts them into the wallet.
///
/// Fails if `dir` itself does not exist.
pub async fn import(wallet: &Wallet, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::metadata(dir)?;

    let snapshot = LedgerSnapshot {
        accounts: import_collection(&dir.join(ACCOUNTS_FILE))?,
        payments: import_collection(&dir.join(PAYMENTS_FILE))?,
        favorites: import_collection(&dir.join(FAVORITES_FILE))?,
    };
    wallet.restore(snapshot).await?;

    info!(dir = %dir.display(), "ledger imported");
    Ok(())
}

fn export_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    write_records(writer_builder().from_path(path)?, records)
}

fn import_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_records(reader_builder().from_path(path)?)
}
