//! Clients for the two external directories the watcher correlates.
//!
//! # Data Flow
//! ```text
//! node id
//!     → nomad.rs (node-info lookup)      → node name
//! node name + cursor
//!     → consul.rs (blocking health query) → check records + new index
//! ```
//!
//! # Design Decisions
//! - Both directories sit behind traits so the watcher can be driven by
//!   in-memory fakes
//! - No retries here; a failed request surfaces immediately
//! - Every request carries a deadline

use std::future::Future;

pub mod consul;
pub mod nomad;
pub mod types;

pub use consul::ConsulClient;
pub use nomad::NomadClient;
pub use types::{DirectoryError, DirectoryResult, HealthCheckRecord, HealthQuery, NodeInfo};

/// Resolves a node identifier to the name the health directory knows it by.
pub trait NodeDirectory: Send + Sync {
    fn node_name(&self, node_id: &str) -> impl Future<Output = DirectoryResult<String>> + Send;
}

/// Issues blocking health queries scoped to a single node.
pub trait HealthDirectory: Send + Sync {
    /// Return every check registered on `node_name` once the directory's
    /// change index moves past `index`, or when the wait ceiling elapses.
    fn node_checks(
        &self,
        node_name: &str,
        index: u64,
    ) -> impl Future<Output = DirectoryResult<HealthQuery>> + Send;
}
