//! Blocking health queries against the health directory.
//!
//! # Responsibilities
//! - Issue `GET /v1/health/node/<name>` with `index` and `wait` parameters
//! - Read the new change index from `X-Consul-Index`
//! - Bound every request by the wait ceiling plus the server's jitter
//!
//! # Design Decisions
//! - The server adds up to `wait / 16` of random jitter to a blocking query,
//!   so the client timeout covers the wait, the jitter and a fixed slack
//! - An index of 0 asks for the current state without blocking

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::Client;
use url::Url;

use crate::config::ConsulConfig;
use crate::directory::types::{
    endpoint, DirectoryError, DirectoryResult, HealthCheckRecord, HealthQuery,
};
use crate::directory::HealthDirectory;
use crate::observability::metrics;

/// Response header carrying the directory's change index.
pub const INDEX_HEADER: &str = "X-Consul-Index";

/// HTTP client for node-scoped blocking health queries.
#[derive(Clone)]
pub struct ConsulClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    datacenter: Option<String>,
    wait: Duration,
}

impl ConsulClient {
    pub fn new(config: &ConsulConfig) -> DirectoryResult<Self> {
        let base_url = Url::parse(&config.address)?;
        let wait = Duration::from_secs(config.wait_secs);
        let client = Client::builder()
            .timeout(request_timeout(wait, Duration::from_secs(config.timeout_slack_secs)))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            datacenter: config.datacenter.clone(),
            wait,
        })
    }

    /// Build the query URL for a node scope and cursor.
    fn query_url(&self, node_name: &str, index: u64) -> DirectoryResult<Url> {
        let mut url = endpoint(&self.base_url, &["v1", "health", "node", node_name])?;
        {
            let mut query = url.query_pairs_mut();
            if index > 0 {
                query.append_pair("index", &index.to_string());
                query.append_pair("wait", &format!("{}s", self.wait.as_secs()));
            }
            if let Some(dc) = &self.datacenter {
                query.append_pair("dc", dc);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }
}

impl HealthDirectory for ConsulClient {
    async fn node_checks(&self, node_name: &str, index: u64) -> DirectoryResult<HealthQuery> {
        let url = self.query_url(node_name, index)?;

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("X-Consul-Token", token);
        }

        tracing::debug!(node_name = %node_name, index, "Issuing blocking health query");
        let started = Instant::now();

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let new_index = parse_index(response.headers())?;
        let records = response.json::<Vec<HealthCheckRecord>>().await?;

        metrics::record_query_duration(started.elapsed());
        tracing::debug!(
            node_name = %node_name,
            index = new_index,
            checks = records.len(),
            "Blocking health query returned"
        );

        Ok(HealthQuery {
            records,
            index: new_index,
        })
    }
}

impl std::fmt::Debug for ConsulClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsulClient")
            .field("base_url", &self.base_url.as_str())
            .field("datacenter", &self.datacenter)
            .field("wait_secs", &self.wait.as_secs())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Client-side deadline for a blocking query.
fn request_timeout(wait: Duration, slack: Duration) -> Duration {
    wait + wait / 16 + slack
}

/// Extract the change index from a blocking query response.
fn parse_index(headers: &HeaderMap) -> DirectoryResult<u64> {
    let value = headers.get(INDEX_HEADER).ok_or(DirectoryError::MissingIndex)?;
    let text = value
        .to_str()
        .map_err(|_| DirectoryError::InvalidIndex(format!("{:?}", value)))?;
    text.trim()
        .parse::<u64>()
        .map_err(|_| DirectoryError::InvalidIndex(text.to_string()))
}
