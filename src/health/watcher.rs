//! Allocation health watcher.
//!
//! # Poll Cycle
//! ```text
//! resolve node name (once, cached)
//!     → blocking health query with the cursor
//!     → index did not advance?  → no-op
//!     → correlate records to the allocation
//!     → aggregate into a snapshot
//!     → emission policy against the last published snapshot
//!     → publish (snapshot becomes the new baseline) or suppress
//! ```
//!
//! The cursor never moves backwards. If the directory's index resets (for
//! example after a snapshot restore), every later query keeps sending the
//! old, higher index and the watcher publishes nothing until the directory's
//! index passes it again. The `Directory index went backwards` warning marks
//! the start of such a stall; recreate the watcher to recover sooner.
//!
//! A failed step aborts the cycle before any state is touched. Dropping the
//! future returned by [`Watcher::poll`] cancels an in-flight query with the
//! same guarantee.

use std::future::Future;

use crate::config::WatchConfig;
use crate::directory::{HealthDirectory, NodeDirectory};
use crate::health::aggregate::{aggregate, AggregateHealthSnapshot};
use crate::health::change::EmissionPolicy;
use crate::health::correlate::correlate;
use crate::health::resolver::NodeIdentityResolver;
use crate::health::types::{CursorAdvance, WatchCursor, WatchError, WatchResult};
use crate::observability::metrics::{self, PollOutcome};
use crate::protocol::{Action, BackendType, Response, WatchRequest, FETCHED_HEALTH};

/// A resource watcher driven by an external dispatcher.
pub trait Watcher: Send {
    /// Deduplication and routing key.
    fn key(&self) -> String;

    /// Whether the watcher ever issues mutating calls.
    fn is_mutable(&self) -> bool;

    fn backend_type(&self) -> BackendType;

    /// Run one cycle. `Ok(None)` means nothing to publish this time.
    fn poll(&mut self) -> impl Future<Output = WatchResult<Option<Response>>> + Send;
}

/// Watches the aggregate health of one allocation on one node.
#[derive(Debug)]
pub struct AllocationHealthWatcher<N, H> {
    request: WatchRequest,
    resolver: NodeIdentityResolver<N>,
    health: H,
    cursor: WatchCursor,
    previous: Option<AggregateHealthSnapshot>,
    policy: EmissionPolicy,
}

impl<N: NodeDirectory, H: HealthDirectory> AllocationHealthWatcher<N, H> {
    pub fn new(request: WatchRequest, nodes: N, health: H, config: &WatchConfig) -> Self {
        if config.emission == EmissionPolicy::SuppressChanged {
            tracing::warn!(
                key = %request.key(),
                policy = config.emission.as_str(),
                "Emission policy holds back changed snapshots; set watch.emission = \"emit_on_change\" to publish transitions"
            );
        }

        let resolver = NodeIdentityResolver::new(nodes, request.node_id.clone());
        Self {
            request,
            resolver,
            health,
            cursor: WatchCursor::default(),
            previous: None,
            policy: config.emission,
        }
    }

    /// Build a watcher from a watch action, validating its payload.
    pub fn from_action(
        action: &Action,
        nodes: N,
        health: H,
        config: &WatchConfig,
    ) -> WatchResult<Self> {
        let request = WatchRequest::from_action(action)?;
        Ok(Self::new(request, nodes, health, config))
    }

    pub fn request(&self) -> &WatchRequest {
        &self.request
    }

    pub fn cursor(&self) -> WatchCursor {
        self.cursor
    }

    /// The last published snapshot.
    pub fn previous(&self) -> Option<&AggregateHealthSnapshot> {
        self.previous.as_ref()
    }

    /// The resolved node name, once resolution has succeeded.
    pub fn node_name(&self) -> Option<&str> {
        self.resolver.cached()
    }

    async fn run_cycle(&mut self) -> WatchResult<Option<Response>> {
        let node_name = self.resolver.resolve().await?;

        let query = self
            .health
            .node_checks(&node_name, self.cursor.index())
            .await
            .map_err(|source| WatchError::HealthQuery {
                node_name: node_name.clone(),
                source,
            })?;

        let mut cursor = self.cursor;
        match cursor.advance(query.index) {
            CursorAdvance::Advanced => {}
            CursorAdvance::Unchanged => {
                tracing::debug!(
                    key = %self.request.key(),
                    index = query.index,
                    "Index unchanged, nothing to publish"
                );
                metrics::record_poll(PollOutcome::UnchangedIndex);
                return Ok(None);
            }
            CursorAdvance::Regressed => {
                tracing::warn!(
                    key = %self.request.key(),
                    cursor = self.cursor.index(),
                    index = query.index,
                    "Directory index went backwards, keeping cursor"
                );
                metrics::record_poll(PollOutcome::UnchangedIndex);
                return Ok(None);
            }
        }

        let allocation_id = &self.request.allocation_id;
        let snapshot = aggregate(correlate(&query.records, allocation_id), allocation_id);
        metrics::record_verdict(allocation_id, snapshot.verdict);

        if !self.policy.should_emit(&snapshot, self.previous.as_ref()) {
            tracing::debug!(
                key = %self.request.key(),
                verdict = %snapshot.verdict,
                policy = self.policy.as_str(),
                "Snapshot suppressed"
            );
            metrics::record_poll(PollOutcome::Suppressed);
            self.cursor = cursor;
            return Ok(None);
        }

        let response = Response::with_index(FETCHED_HEALTH, &snapshot, cursor.index())?;

        tracing::info!(
            key = %self.request.key(),
            index = cursor.index(),
            total = snapshot.total,
            verdict = %snapshot.verdict,
            "Allocation health published"
        );
        metrics::record_poll(PollOutcome::Emitted);
        self.cursor = cursor;
        self.previous = Some(snapshot);

        Ok(Some(response))
    }
}

impl<N: NodeDirectory, H: HealthDirectory> Watcher for AllocationHealthWatcher<N, H> {
    fn key(&self) -> String {
        self.request.key()
    }

    fn is_mutable(&self) -> bool {
        false
    }

    fn backend_type(&self) -> BackendType {
        BackendType::Nomad
    }

    async fn poll(&mut self) -> WatchResult<Option<Response>> {
        let result = self.run_cycle().await;
        if let Err(e) = &result {
            tracing::warn!(key = %self.request.key(), error = %e, "Poll cycle failed");
            metrics::record_poll(PollOutcome::Error);
        }
        result
    }
}
