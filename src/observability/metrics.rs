//! Metrics collection and exposition.
//!
//! # Metrics
//! - `alloc_health_polls_total` (counter): poll cycles by outcome
//! - `alloc_health_query_duration_seconds` (histogram): blocking query latency
//! - `alloc_health_verdict` (gauge): -1=unknown, 0=unhealthy, 1=healthy
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::aggregate::Verdict;

/// How a poll cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A response was produced.
    Emitted,
    /// A snapshot was computed but the emission policy held it back.
    Suppressed,
    /// The directory returned without a newer index.
    UnchangedIndex,
    /// The cycle failed.
    Error,
}

impl PollOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollOutcome::Emitted => "emitted",
            PollOutcome::Suppressed => "suppressed",
            PollOutcome::UnchangedIndex => "unchanged_index",
            PollOutcome::Error => "error",
        }
    }
}

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_poll(outcome: PollOutcome) {
    metrics::counter!("alloc_health_polls_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_query_duration(elapsed: Duration) {
    metrics::histogram!("alloc_health_query_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_verdict(allocation_id: &str, verdict: Verdict) {
    let value = match verdict {
        Verdict::Unknown => -1.0,
        Verdict::Unhealthy => 0.0,
        Verdict::Healthy => 1.0,
    };
    metrics::gauge!("alloc_health_verdict", "allocation" => allocation_id.to_string()).set(value);
}
