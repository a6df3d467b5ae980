//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Watcher and directory clients produce:
//!     → logging.rs (structured log events, stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Events go to stdout, logs to stderr, so the two never interleave
//! - Metrics are disabled unless configured

pub mod logging;
pub mod metrics;
