//! Racing pending work against the shutdown flag.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

/// How often a pending await re-reads the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Resolve once `flag` is set.
pub async fn shutdown_requested(flag: &AtomicBool) {
    let mut ticker = interval(POLL_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if flag.load(Ordering::SeqCst) {
            return;
        }
    }
}

/// Run `work` unless `flag` is set first.
///
/// Returns `None` when the shutdown flag won; `work` is dropped at its
/// current await point.
pub async fn until_shutdown<F: Future>(flag: &AtomicBool, work: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        output = work => Some(output),
        _ = shutdown_requested(flag) => None,
    }
}
