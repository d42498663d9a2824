//! Background removal of expired links.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::repositories::{LinkStore, StoreError};

/// Retries per sweep for transient store failures.
const SWEEP_RETRIES: usize = 3;

/// Periodically deletes expired links until the task is dropped.
///
/// The first sweep runs immediately. Failures are logged and the worker keeps
/// going; the next tick simply tries again.
pub async fn run_sweep_worker<S: LinkStore + ?Sized>(store: Arc<S>, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs = interval.as_secs(), "Sweep worker started");

    loop {
        ticker.tick().await;
        let _ = sweep_once(store.as_ref()).await;
    }
}

/// Runs one sweep, retrying transient failures with exponential backoff.
///
/// Sweeping is idempotent, so a retry after an ambiguous failure is harmless.
pub async fn sweep_once<S: LinkStore + ?Sized>(store: &S) -> Result<u64, StoreError> {
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(SWEEP_RETRIES);

    let result = RetryIf::start(
        strategy,
        || store.sweep_expired(Utc::now()),
        |e: &StoreError| e.is_transient(),
    )
    .await;

    match &result {
        Ok(0) => debug!("Sweep found no expired links"),
        Ok(removed) => info!(removed, "Swept expired links"),
        Err(e) => error!(error = %e, "Expired link sweep failed"),
    }

    result
}
