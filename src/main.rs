use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;
use wallet::application::wallet::Wallet;
use wallet::domain::money::Money;
use wallet::interfaces::dump::{accounts_file, directory, history_writer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the ledger dump files
    #[arg(long, env = "WALLET_DATA_DIR", default_value = "wallet-data")]
    data_dir: PathBuf,

    /// Number of concurrent workers used by aggregations
    #[arg(long, env = "WALLET_WORKERS", default_value_t = default_workers())]
    workers: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new account for a phone number
    Register { phone: String },
    /// Deposit an amount (major units, e.g. 12.50) into an account
    Deposit { account_id: i64, amount: Money },
    /// Print the balance of an account
    Balance { account_id: i64 },
    /// Pay an amount from an account
    Pay {
        account_id: i64,
        amount: Money,
        category: String,
    },
    /// Reject a payment and refund its amount
    Reject { payment_id: String },
    /// Repeat an existing payment
    Repeat { payment_id: String },
    /// Save a payment as a named favorite
    Favorite { payment_id: String, name: String },
    /// Pay using a saved favorite
    PayFavorite { favorite_id: String },
    /// Print or write out the payment history of an account
    History {
        account_id: i64,
        /// Write the history into this directory instead of printing it
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Payments per file when writing to a directory
        #[arg(long, default_value_t = 100)]
        records: usize,
    },
    /// Sum all payments
    Sum,
    /// List the payments of an account
    Filter { account_id: i64 },
    /// List the payments of a category
    FilterCategory { category: String },
    /// Print partial sums per batch of payments
    Progress,
    /// Write all accounts into a single file
    ExportAccounts { path: PathBuf },
    /// Load accounts from a single file
    ImportAccounts { path: PathBuf },
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Register { .. }
                | Command::Deposit { .. }
                | Command::Pay { .. }
                | Command::Reject { .. }
                | Command::Repeat { .. }
                | Command::Favorite { .. }
                | Command::PayFavorite { .. }
                | Command::ImportAccounts { .. }
        )
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value).into_diagnostic()?);
    Ok(())
}

async fn run(wallet: &Wallet, command: Command, workers: usize) -> Result<()> {
    match command {
        Command::Register { phone } => {
            print_json(&wallet.register_account(&phone).await.into_diagnostic()?)?;
        }
        Command::Deposit { account_id, amount } => {
            wallet.deposit(account_id, amount).await.into_diagnostic()?;
            print_json(&wallet.find_account_by_id(account_id).await.into_diagnostic()?)?;
        }
        Command::Balance { account_id } => {
            println!("{}", wallet.balance(account_id).await.into_diagnostic()?);
        }
        Command::Pay {
            account_id,
            amount,
            category,
        } => {
            print_json(&wallet.pay(account_id, amount, &category).await.into_diagnostic()?)?;
        }
        Command::Reject { payment_id } => {
            wallet.reject(&payment_id).await.into_diagnostic()?;
            print_json(&wallet.find_payment_by_id(&payment_id).await.into_diagnostic()?)?;
        }
        Command::Repeat { payment_id } => {
            print_json(&wallet.repeat(&payment_id).await.into_diagnostic()?)?;
        }
        Command::Favorite { payment_id, name } => {
            print_json(&wallet.favorite_payment(&payment_id, &name).await.into_diagnostic()?)?;
        }
        Command::PayFavorite { favorite_id } => {
            print_json(&wallet.pay_from_favorite(&favorite_id).await.into_diagnostic()?)?;
        }
        Command::History {
            account_id,
            out_dir,
            records,
        } => {
            let payments = wallet
                .export_account_history(account_id)
                .await
                .into_diagnostic()?;
            match out_dir {
                Some(dir) => {
                    history_writer::history_to_files(&payments, dir, records).into_diagnostic()?
                }
                None => {
                    for payment in &payments {
                        print_json(payment)?;
                    }
                }
            }
        }
        Command::Sum => {
            println!("{}", wallet.sum_payments(workers).await.into_diagnostic()?);
        }
        Command::Filter { account_id } => {
            let payments = wallet
                .filter_payments(account_id, workers)
                .await
                .into_diagnostic()?;
            for payment in &payments {
                print_json(payment)?;
            }
        }
        Command::FilterCategory { category } => {
            let payments = wallet
                .filter_payments_by_fn(move |payment| payment.category == category, workers)
                .await
                .into_diagnostic()?;
            for payment in &payments {
                print_json(payment)?;
            }
        }
        Command::Progress => {
            let mut progress = wallet.sum_payments_with_progress().await;
            while let Some(entry) = progress.next().await {
                println!("{}: {}", entry.part, entry.result);
            }
        }
        Command::ExportAccounts { path } => {
            accounts_file::export_accounts_to_file(wallet, path)
                .await
                .into_diagnostic()?;
        }
        Command::ImportAccounts { path } => {
            accounts_file::import_accounts_from_file(wallet, path)
                .await
                .into_diagnostic()?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let wallet = Wallet::new();

    if cli.data_dir.exists() {
        directory::import(&wallet, &cli.data_dir)
            .await
            .into_diagnostic()?;
    }

    let mutates = cli.command.mutates();
    run(&wallet, cli.command, cli.workers).await?;

    if mutates {
        directory::export(&wallet, &cli.data_dir)
            .await
            .into_diagnostic()?;
    }
    Ok(())
}
