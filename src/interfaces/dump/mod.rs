//! Delimited-text dumps of the ledger.
//!
//! Records are `;`-separated with no header row, written and parsed with the `csv`
//! crate. Fields follow the declaration order of the domain structs:
//!
//! * accounts: `id;phone;balance`
//! * payments: `id;account_id;amount;category;status`
//! * favorites: `id;account_id;name;amount;category`

pub mod accounts_file;
pub mod directory;
pub mod history_writer;

use crate::error::{Result, WalletError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

const DELIMITER: u8 = b';';

fn writer_builder() -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder.delimiter(DELIMITER).has_headers(false);
    builder
}

fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(DELIMITER).has_headers(false);
    builder
}

fn write_records<W: Write, T: Serialize>(mut writer: csv::Writer<W>, records: &[T]) -> Result<()> {
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn read_records<R: Read, T: DeserializeOwned>(reader: csv::Reader<R>) -> Result<Vec<T>> {
    reader
        .into_deserialize()
        .map(|result| result.map_err(WalletError::from))
        .collect()
}
