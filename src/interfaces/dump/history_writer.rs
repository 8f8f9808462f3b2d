use super::{PAYMENTS_FILE, write_records, writer_builder};
use crate::domain::payment::Payment;
use crate::error::{Result, WalletError};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Writes `payments` into `dir` in files of at most `records` payments each.
///
/// A list that fits into one file goes to `payments.dump`; longer lists are split
/// into `payments1.dump`, `payments2.dump`, ... with the remainder in the last file.
pub fn history_to_files(payments: &[Payment], dir: impl AsRef<Path>, records: usize) -> Result<()> {
    if records == 0 {
        return Err(WalletError::InvalidChunkSize);
    }
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    if payments.is_empty() {
        return Ok(());
    }
    if payments.len() <= records {
        return write_records(writer_builder().from_path(dir.join(PAYMENTS_FILE))?, payments);
    }

    for (index, chunk) in payments.chunks(records).enumerate() {
        let path = dir.join(format!("payments{}.dump", index + 1));
        debug!(path = %path.display(), payments = chunk.len(), "writing history chunk");
        write_records(writer_builder().from_path(path)?, chunk)?;
    }
    Ok(())
}
