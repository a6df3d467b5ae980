//! Events emitted by watchers.

use serde::Serialize;
use serde_json::Value;

use crate::health::types::{WatchError, WatchResult};

/// Allocation health snapshot was fetched.
pub const FETCHED_HEALTH: &str = "NOMAD_FETCHED_ALLOCATION_HEALTH";
/// A poll cycle failed.
pub const ERROR_EVENT: &str = "ERROR";

/// A tagged event forwarded to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: Value,
    /// Directory change index the payload was computed at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
}

impl Response {
    /// Wrap a payload together with the change index it reflects.
    pub fn with_index<T: Serialize>(kind: &str, payload: &T, index: u64) -> WatchResult<Self> {
        Ok(Self {
            kind: kind.to_string(),
            payload: serde_json::to_value(payload)?,
            index: Some(index),
        })
    }

    /// The single event a failed cycle produces.
    pub fn error(err: &WatchError) -> Self {
        Self {
            kind: ERROR_EVENT.to_string(),
            payload: serde_json::json!({ "error": err.to_string() }),
            index: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ERROR_EVENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_response_shape() {
        let payload = serde_json::json!({"Total": 0});
        let response = Response::with_index(FETCHED_HEALTH, &payload, 42).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "NOMAD_FETCHED_ALLOCATION_HEALTH",
                "payload": {"Total": 0},
                "index": 42,
            })
        );
    }

    #[test]
    fn test_error_response_has_no_index() {
        let err = WatchError::InputContract("missing field `id`".to_string());
        let response = Response::error(&err);
        assert!(response.is_error());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("index").is_none());
        assert_eq!(json["payload"]["error"], "invalid watch payload: missing field `id`");
    }
}
