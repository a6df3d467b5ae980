//! Allocation health watching.
//!
//! # Data Flow
//! ```text
//! resolver.rs   node id → node name (cached)
//! correlate.rs  node checks → checks owned by the allocation
//! aggregate.rs  checks → AggregateHealthSnapshot + Verdict
//! change.rs     snapshot vs. last published → publish or suppress
//! watcher.rs    one poll cycle tying the above together
//! ```
//!
//! # Design Decisions
//! - One watcher per (allocation, node); `poll` takes `&mut self`, so cycles
//!   are sequential without locks
//! - Cursor, node name and last published snapshot are instance state only
//! - No retries: a failed cycle is reported and the caller decides when to
//!   poll again

pub mod aggregate;
pub mod change;
pub mod correlate;
pub mod resolver;
pub mod types;
pub mod watcher;

pub use aggregate::{AggregateHealthSnapshot, Verdict};
pub use change::EmissionPolicy;
pub use types::{WatchCursor, WatchError, WatchResult};
pub use watcher::{AllocationHealthWatcher, Watcher};
