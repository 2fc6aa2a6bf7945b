//! ZooKeeper-backed coordination store

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use zookeeper_client as zk;

use roost_core::{CoordinationStore, NodeKind, StoreError};

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("no coordination endpoints configured")]
    NoEndpoints,
    #[error("failed to connect to {cluster}: {message}")]
    Unreachable { cluster: String, message: String },
}

/// One ZooKeeper session. Opened at startup, closed when dropped.
pub struct ZkStore {
    client: zk::Client,
}

impl ZkStore {
    /// Connect to the ensemble. Endpoints are tried in order by the
    /// client; the session spans all of them.
    pub async fn connect(endpoints: &[String]) -> Result<Self, ConnectError> {
        if endpoints.is_empty() {
            return Err(ConnectError::NoEndpoints);
        }
        let cluster = endpoints.join(",");
        let client = zk::Client::connect(&cluster)
            .await
            .map_err(|e| ConnectError::Unreachable {
                cluster: cluster.clone(),
                message: e.to_string(),
            })?;
        info!(servers = %cluster, "Connected to ZooKeeper ensemble");
        Ok(Self { client })
    }
}

/// Session-level failures are fatal to the agent; anything else is
/// scoped to the failed operation.
fn store_error(path: &str, err: zk::Error) -> StoreError {
    match err {
        e @ (zk::Error::ConnectionLoss | zk::Error::SessionExpired) => {
            StoreError::ConnectionLost(e.to_string())
        }
        other => StoreError::Operation {
            path: path.to_string(),
            message: other.to_string(),
        },
    }
}

#[async_trait]
impl CoordinationStore for ZkStore {
    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        match self.client.check_stat(path).await {
            Ok(stat) => Ok(stat.is_some()),
            Err(err) => Err(store_error(path, err)),
        }
    }

    async fn create(
        &self,
        path: &str,
        payload: &[u8],
        kind: NodeKind,
    ) -> Result<(), StoreError> {
        let mode = match kind {
            NodeKind::Persistent => zk::CreateMode::Persistent,
            NodeKind::Ephemeral => zk::CreateMode::Ephemeral,
        };
        let options = mode.with_acls(zk::Acls::anyone_all());
        match self.client.create(path, payload, &options).await {
            Ok(_) => Ok(()),
            // Another writer won the check-then-create race.
            Err(zk::Error::NodeExists) => {
                debug!(path = %path, "Node already exists");
                Ok(())
            }
            Err(err) => Err(store_error(path, err)),
        }
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        // Any version: last observed state wins on a single-writer path.
        match self.client.delete(path, None).await {
            Ok(()) | Err(zk::Error::NoNode) => Ok(()),
            Err(err) => Err(store_error(path, err)),
        }
    }

    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self.client.get_data(path).await {
            Ok((payload, _stat)) => Ok(Some(payload)),
            Err(zk::Error::NoNode) => Ok(None),
            Err(err) => Err(store_error(path, err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_empty_endpoint_list() {
        assert!(matches!(
            ZkStore::connect(&[]).await,
            Err(ConnectError::NoEndpoints)
        ));
    }
}
