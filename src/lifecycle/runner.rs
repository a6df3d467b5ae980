//! Single-watch driver loop.
//!
//! Re-invokes a watcher sequentially, forwards every event to a sink, and
//! waits with backoff after a failed cycle. Shutdown drops the in-flight poll,
//! which cancels any outstanding blocking query.

use tokio::sync::broadcast;

use crate::config::RetryConfig;
use crate::health::Watcher;
use crate::protocol::Response;
use crate::resilience::Backoff;

/// Counters describing a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub emitted: u64,
    pub errors: u64,
}

/// Drive `watcher` until shutdown, or until the first published event when `once` is set.
pub async fn run_watch<W, F>(
    mut watcher: W,
    retry: &RetryConfig,
    mut shutdown: broadcast::Receiver<()>,
    once: bool,
    mut sink: F,
) -> RunSummary
where
    W: Watcher,
    F: FnMut(&Response),
{
    let key = watcher.key();
    let mut backoff = Backoff::new(retry);
    let mut summary = RunSummary::default();

    tracing::info!(
        key = %key,
        backend = %watcher.backend_type(),
        mutable = watcher.is_mutable(),
        "Watch started"
    );

    loop {
        let result = tokio::select! {
            result = watcher.poll() => result,
            _ = shutdown.recv() => break,
        };
        summary.cycles += 1;

        match result {
            Ok(Some(response)) => {
                backoff.reset();
                summary.emitted += 1;
                sink(&response);
                if once {
                    break;
                }
            }
            Ok(None) => backoff.reset(),
            Err(e) => {
                summary.errors += 1;
                sink(&Response::error(&e));

                let delay = backoff.next_delay();
                tracing::debug!(
                    key = %key,
                    failures = backoff.failures(),
                    delay = ?delay,
                    "Waiting before next poll"
                );
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown.recv() => break,
                }
            }
        }
    }

    tracing::info!(
        key = %key,
        cycles = summary.cycles,
        emitted = summary.emitted,
        errors = summary.errors,
        "Watch stopped"
    );
    summary
}
