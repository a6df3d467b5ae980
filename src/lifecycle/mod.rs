//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Init logging/metrics → Build watcher → runner.rs
//!
//! Run (runner.rs):
//!     poll → event sink → (backoff on error) → poll ...
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → broadcast → runner drops in-flight poll → exit
//! ```

pub mod runner;
pub mod shutdown;

pub use runner::{run_watch, RunSummary};
pub use shutdown::Shutdown;
