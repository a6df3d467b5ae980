//! Node-info lookups against the scheduler's HTTP API.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::NomadConfig;
use crate::directory::types::{endpoint, DirectoryError, DirectoryResult, NodeInfo};
use crate::directory::NodeDirectory;

/// HTTP client for `GET /v1/node/<id>`.
#[derive(Clone)]
pub struct NomadClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl NomadClient {
    pub fn new(config: &NomadConfig) -> DirectoryResult<Self> {
        let base_url = Url::parse(&config.address)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Fetch the full node description.
    pub async fn node_info(&self, node_id: &str) -> DirectoryResult<NodeInfo> {
        let url = endpoint(&self.base_url, &["v1", "node", node_id])?;

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("X-Nomad-Token", token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<NodeInfo>().await?)
    }
}

impl NodeDirectory for NomadClient {
    async fn node_name(&self, node_id: &str) -> DirectoryResult<String> {
        let info = self.node_info(node_id).await?;
        tracing::debug!(
            node_id = %node_id,
            node_name = %info.name,
            datacenter = %info.datacenter,
            "Node info fetched"
        );
        Ok(info.name)
    }
}

impl std::fmt::Debug for NomadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NomadClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
