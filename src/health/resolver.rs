//! Node identity resolution with an instance-scoped cache.

use crate::directory::NodeDirectory;
use crate::health::types::{WatchError, WatchResult};

/// Resolves the watched node id to the name the health directory uses.
///
/// Only a successful lookup is cached. The cache lives as long as the
/// resolver and is never invalidated.
#[derive(Debug)]
pub struct NodeIdentityResolver<N> {
    directory: N,
    node_id: String,
    node_name: Option<String>,
}

impl<N: NodeDirectory> NodeIdentityResolver<N> {
    pub fn new(directory: N, node_id: impl Into<String>) -> Self {
        Self {
            directory,
            node_id: node_id.into(),
            node_name: None,
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The cached name, if a lookup has succeeded.
    pub fn cached(&self) -> Option<&str> {
        self.node_name.as_deref()
    }

    /// Return the node name, looking it up on first use.
    pub async fn resolve(&mut self) -> WatchResult<String> {
        if let Some(name) = &self.node_name {
            tracing::debug!(node_id = %self.node_id, node_name = %name, "Node name cache hit");
            return Ok(name.clone());
        }

        let name = self
            .directory
            .node_name(&self.node_id)
            .await
            .map_err(|source| WatchError::NodeLookup {
                node_id: self.node_id.clone(),
                source,
            })?;

        tracing::info!(node_id = %self.node_id, node_name = %name, "Resolved node name");
        self.node_name = Some(name.clone());
        Ok(name)
    }
}
