//! Wire types and error definitions shared by the directory clients.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Check status the health directory reports for a passing check.
pub const STATUS_PASSING: &str = "passing";

/// A single health check as reported by the health directory for a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthCheckRecord {
    /// Human readable check name, unique within an allocation's check set.
    #[serde(rename = "Name")]
    pub name: String,

    /// Opaque status string (`passing`, `warning`, `critical`, ...).
    #[serde(rename = "Status")]
    pub status: String,

    /// Identifier of the service owning this check. Empty for node checks.
    #[serde(rename = "ServiceID", default)]
    pub service_id: String,
}

impl HealthCheckRecord {
    pub fn new(
        name: impl Into<String>,
        status: impl Into<String>,
        service_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: status.into(),
            service_id: service_id.into(),
        }
    }

    pub fn is_passing(&self) -> bool {
        self.status == STATUS_PASSING
    }
}

/// Result of one blocking health query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthQuery {
    /// Every check currently registered on the node.
    pub records: Vec<HealthCheckRecord>,
    /// Change index the directory reported alongside the records.
    pub index: u64,
}

/// Node description returned by the scheduler's node-info endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeInfo {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Datacenter", default)]
    pub datacenter: String,
}

/// Errors raised while talking to the node-info or health directories.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport failure or undecodable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The directory answered with a non-success status.
    #[error("directory returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// A blocking query response carried no change index header.
    #[error("response is missing the change index header")]
    MissingIndex,

    /// The change index header could not be parsed.
    #[error("invalid change index: {0}")]
    InvalidIndex(String),

    /// The configured directory address could not be joined with a path.
    #[error("invalid directory URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Append percent-encoded path segments to a configured API address.
pub fn endpoint(base: &Url, segments: &[&str]) -> DirectoryResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DirectoryError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
