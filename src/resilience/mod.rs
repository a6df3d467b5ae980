//! Resilience helpers for the driver loop.
//!
//! # Data Flow
//! ```text
//! Failed poll cycle:
//!     → backoff.rs (delay grows with consecutive failures, jittered)
//!     → next poll after the delay
//! Successful cycle:
//!     → backoff reset
//! ```
//!
//! The watcher itself never retries; only the driver that re-invokes it
//! consults these helpers.

pub mod backoff;

pub use backoff::Backoff;
