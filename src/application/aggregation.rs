use super::wallet::Wallet;
use crate::domain::ledger::Ledger;
use crate::domain::money::Money;
use crate::domain::payment::Payment;
use crate::error::Result;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockReadGuard, mpsc};
use tokio::task::JoinSet;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

/// Number of payments summed per entry of [`Wallet::sum_payments_with_progress`].
pub const PROGRESS_BATCH_SIZE: usize = 100_000;

/// Partial sum of one batch of payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub part: usize,
    pub result: Money,
}

type SharedLedger = Arc<OwnedRwLockReadGuard<Ledger>>;

/// Splits `total` items into one contiguous range per worker.
///
/// Each partition is `total / workers + 1` wide and clipped to `total`, so trailing
/// workers may get an empty range. A worker count of zero is treated as one.
pub fn partition_ranges(total: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let size = total / workers + 1;
    (0..workers)
        .map(|i| {
            let start = i.saturating_mul(size).min(total);
            let end = start.saturating_add(size).min(total);
            start..end
        })
        .collect()
}

/// Splits `total` items into `1 + total / batch_size` consecutive batches.
pub fn batch_ranges(total: usize, batch_size: usize) -> Vec<Range<usize>> {
    let batch_size = batch_size.max(1);
    (0..1 + total / batch_size)
        .map(|i| {
            let start = (i * batch_size).min(total);
            let end = ((i + 1) * batch_size).min(total);
            start..end
        })
        .collect()
}

/// Matches payments in the `mobile` category.
pub fn is_mobile(payment: &Payment) -> bool {
    payment.category == "mobile"
}

fn sum_amounts(payments: &[Payment]) -> Money {
    payments.iter().map(|payment| payment.amount).sum()
}

impl Wallet {
    /// Sums the amounts of all payments using `workers` concurrent workers.
    pub async fn sum_payments(&self, workers: usize) -> Result<Money> {
        let ledger = self.read_shared().await;
        let partials = scan_partitions(ledger, workers, sum_amounts).await?;
        Ok(partials.into_iter().sum())
    }

    /// Returns every payment of `account_id`, in no particular order.
    pub async fn filter_payments(&self, account_id: i64, workers: usize) -> Result<Vec<Payment>> {
        let ledger = self.read_shared().await;
        ledger.find_account(account_id)?;
        let partials = scan_partitions(ledger, workers, move |payments: &[Payment]| {
            payments
                .iter()
                .filter(|payment| payment.account_id == account_id)
                .cloned()
                .collect::<Vec<_>>()
        })
        .await?;
        Ok(partials.into_iter().flatten().collect())
    }

    /// Returns every payment matching `predicate`, in no particular order.
    ///
    /// The predicate runs concurrently on several workers.
    pub async fn filter_payments_by_fn<F>(
        &self,
        predicate: F,
        workers: usize,
    ) -> Result<Vec<Payment>>
    where
        F: Fn(&Payment) -> bool + Send + Sync + 'static,
    {
        let ledger = self.read_shared().await;
        let partials = scan_partitions(ledger, workers, move |payments: &[Payment]| {
            payments
                .iter()
                .filter(|&payment| predicate(payment))
                .cloned()
                .collect::<Vec<_>>()
        })
        .await?;
        Ok(partials.into_iter().flatten().collect())
    }

    /// Streams the partial sum of each fixed-size batch of payments, in batch order.
    ///
    /// Batches are summed one at a time by a background producer and each entry is
    /// sent as soon as it is ready. The ledger stays read-locked until the last
    /// batch is done or the stream is dropped.
    pub async fn sum_payments_with_progress(&self) -> ReceiverStream<Progress> {
        self.sum_payments_in_batches(PROGRESS_BATCH_SIZE).await
    }

    pub(crate) async fn sum_payments_in_batches(
        &self,
        batch_size: usize,
    ) -> ReceiverStream<Progress> {
        let ledger = self.read_shared().await;
        let batches = batch_ranges(ledger.payments().len(), batch_size);
        let (tx, rx) = mpsc::channel(batches.len());

        tokio::spawn(async move {
            for (part, range) in batches.into_iter().enumerate() {
                let batch = Arc::clone(&ledger);
                let worker =
                    tokio::task::spawn_blocking(move || sum_amounts(&batch.payments()[range]));
                let result = match worker.await {
                    Ok(sum) => sum,
                    Err(e) => {
                        error!(part, error = %e, "progress worker failed");
                        break;
                    }
                };
                if tx.send(Progress { part, result }).await.is_err() {
                    debug!(part, "progress receiver dropped");
                    break;
                }
            }
        });

        ReceiverStream::new(rx)
    }

    async fn read_shared(&self) -> SharedLedger {
        Arc::new(Arc::clone(&self.ledger).read_owned().await)
    }
}

/// Runs `scan` over every partition on its own blocking worker and collects the
/// partial results once all workers have finished.
async fn scan_partitions<T, F>(ledger: SharedLedger, workers: usize, scan: F) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(&[Payment]) -> T + Send + Sync + 'static,
{
    let ranges = partition_ranges(ledger.payments().len(), workers);
    debug!(
        payments = ledger.payments().len(),
        workers = ranges.len(),
        "scanning payment partitions"
    );

    let scan = Arc::new(scan);
    let mut set = JoinSet::new();
    for range in ranges {
        let ledger = Arc::clone(&ledger);
        let scan = Arc::clone(&scan);
        set.spawn_blocking(move || scan(&ledger.payments()[range]));
    }

    let mut partials = Vec::with_capacity(set.len());
    while let Some(partial) = set.join_next().await {
        partials.push(partial?);
    }
    Ok(partials)
}
