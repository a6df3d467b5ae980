//! Watcher-level types and error definitions.

use thiserror::Error;

use crate::directory::DirectoryError;

/// Errors that abort a poll cycle.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The node id could not be resolved to a node name.
    #[error("failed to resolve node {node_id}: {source}")]
    NodeLookup {
        node_id: String,
        #[source]
        source: DirectoryError,
    },

    /// The blocking health query failed.
    #[error("health query for node {node_name} failed: {source}")]
    HealthQuery {
        node_name: String,
        #[source]
        source: DirectoryError,
    },

    /// The watch payload is missing required fields or has the wrong shape.
    #[error("invalid watch payload: {0}")]
    InputContract(String),

    /// A snapshot could not be encoded into a response payload.
    #[error("failed to encode response payload: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for watcher operations.
pub type WatchResult<T> = Result<T, WatchError>;

/// Last change index observed from the health directory for one node scope.
///
/// Never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WatchCursor(u64);

/// What a freshly returned change index means for the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorAdvance {
    /// The index moved forward; the cursor now holds it.
    Advanced,
    /// The index equals the cursor: the wait ceiling elapsed without change.
    Unchanged,
    /// The index went backwards (directory state was reset). Cursor kept.
    Regressed,
}

impl WatchCursor {
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u64 {
        self.0
    }

    /// Fold in the index returned by a successful query.
    pub fn advance(&mut self, index: u64) -> CursorAdvance {
        match index.cmp(&self.0) {
            std::cmp::Ordering::Greater => {
                self.0 = index;
                CursorAdvance::Advanced
            }
            std::cmp::Ordering::Equal => CursorAdvance::Unchanged,
            std::cmp::Ordering::Less => CursorAdvance::Regressed,
        }
    }
}

impl From<WatchCursor> for u64 {
    fn from(cursor: WatchCursor) -> Self {
        cursor.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_is_monotonic() {
        let mut cursor = WatchCursor::default();
        assert_eq!(cursor.advance(10), CursorAdvance::Advanced);
        assert_eq!(cursor.index(), 10);

        assert_eq!(cursor.advance(10), CursorAdvance::Unchanged);
        assert_eq!(cursor.advance(3), CursorAdvance::Regressed);
        assert_eq!(cursor.index(), 10);

        assert_eq!(cursor.advance(11), CursorAdvance::Advanced);
        assert_eq!(u64::from(cursor), 11);
    }

    #[test]
    fn test_error_display() {
        let err = WatchError::NodeLookup {
            node_id: "n-1".to_string(),
            source: DirectoryError::Status {
                status: 404,
                body: "node not found".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "failed to resolve node n-1: directory returned status 404: node not found"
        );

        let err = WatchError::InputContract("missing field `client`".to_string());
        assert!(err.to_string().contains("missing field"));
    }
}
