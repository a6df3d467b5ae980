//! Messages exchanged with the dispatcher.
//!
//! # Data Flow
//! ```text
//! client → Action { type, payload }   (action.rs, typed decode)
//!        → watcher poll cycle
//!        → Response { type, payload, index }   (response.rs)
//! ```

pub mod action;
pub mod response;

pub use action::{Action, WatchRequest, UNWATCH_HEALTH, WATCH_HEALTH};
pub use response::{Response, ERROR_EVENT, FETCHED_HEALTH};

/// Backend integration a watcher reads from, used by the dispatcher for routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    Nomad,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Nomad => "nomad",
        }
    }
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
