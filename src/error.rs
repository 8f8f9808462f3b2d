use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("phone {0} already registered")]
    PhoneAlreadyRegistered(String),
    #[error("amount must be greater than zero")]
    AmountMustBePositive,
    #[error("account {0} not found")]
    AccountNotFound(i64),
    #[error("payment {0} not found")]
    PaymentNotFound(String),
    #[error("favorite {0} not found")]
    FavoriteNotFound(String),
    #[error("not enough balance")]
    NotEnoughBalance,
    #[error("balance overflow")]
    BalanceOverflow,
    #[error("account ids exhausted")]
    AccountIdsExhausted,
    #[error("account {0} has a negative balance")]
    NegativeBalance(i64),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("records per file must be greater than zero")]
    InvalidChunkSize,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("aggregation worker failed: {0}")]
    WorkerFailed(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, WalletError>;
