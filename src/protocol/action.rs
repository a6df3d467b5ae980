//! Control messages and typed payload decoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::health::types::{WatchError, WatchResult};

/// Start watching an allocation's health.
pub const WATCH_HEALTH: &str = "NOMAD_WATCH_ALLOCATION_HEALTH";
/// Stop watching an allocation's health.
pub const UNWATCH_HEALTH: &str = "NOMAD_UNWATCH_ALLOCATION_HEALTH";

/// A control message as received from a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
}

impl Action {
    /// Build a watch message for `allocation_id` on `node_id`.
    pub fn watch(allocation_id: &str, node_id: &str) -> Self {
        Self {
            kind: WATCH_HEALTH.to_string(),
            payload: serde_json::json!({ "id": allocation_id, "client": node_id }),
        }
    }

    /// Build the matching unwatch message.
    pub fn unwatch(allocation_id: &str, node_id: &str) -> Self {
        Self {
            kind: UNWATCH_HEALTH.to_string(),
            ..Self::watch(allocation_id, node_id)
        }
    }
}

/// Identity of one allocation health watch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchRequest {
    #[serde(rename = "id")]
    pub allocation_id: String,
    #[serde(rename = "client")]
    pub node_id: String,
}

impl WatchRequest {
    /// Decode and validate an untyped action payload.
    pub fn from_payload(payload: &Value) -> WatchResult<Self> {
        let request = Self::deserialize(payload)
            .map_err(|e| WatchError::InputContract(e.to_string()))?;

        if request.allocation_id.is_empty() {
            return Err(WatchError::InputContract("`id` must not be empty".to_string()));
        }
        if request.node_id.is_empty() {
            return Err(WatchError::InputContract("`client` must not be empty".to_string()));
        }

        Ok(request)
    }

    /// Decode the payload of a watch or unwatch action.
    pub fn from_action(action: &Action) -> WatchResult<Self> {
        if action.kind != WATCH_HEALTH && action.kind != UNWATCH_HEALTH {
            return Err(WatchError::InputContract(format!(
                "unexpected action type `{}`",
                action.kind
            )));
        }
        Self::from_payload(&action.payload)
    }

    /// Deduplication and routing key for this watch.
    pub fn key(&self) -> String {
        format!("/allocation/{}/health?client={}", self.allocation_id, self.node_id)
    }
}
