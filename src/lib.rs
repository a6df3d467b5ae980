//! Allocation health watcher library.
//!
//! Correlates one allocation with the health checks the health directory
//! reports for its node and publishes an aggregate verdict.

pub mod config;
pub mod directory;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod protocol;
pub mod resilience;

pub use config::WatcherConfig;
pub use health::{AllocationHealthWatcher, Watcher};
pub use lifecycle::Shutdown;
