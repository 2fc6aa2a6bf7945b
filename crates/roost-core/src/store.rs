//! Coordination store capability trait

use async_trait::async_trait;
use thiserror::Error;

/// Lifetime of a created node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Remains until explicitly deleted, independent of any session.
    Persistent,
    /// Removed by the store when the creating session ends.
    Ephemeral,
}

/// Errors from store operations after a session is established.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The session to the store is gone. Fatal to the agent; retrying
    /// individual operations cannot help.
    #[error("coordination store connection lost: {0}")]
    ConnectionLost(String),

    /// A single operation failed. The current reconciliation pass
    /// aborts and the next tick retries from a fresh read of state.
    #[error("store operation failed on {path}: {message}")]
    Operation { path: String, message: String },
}

impl StoreError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::ConnectionLost(_))
    }
}

/// Capability interface over a remote hierarchical node store.
///
/// Paths are absolute and slash-delimited. Mutations are idempotent at
/// this seam: `create` on an existing node and `delete` on a missing
/// node both succeed. That keeps the caller's check-then-create safe
/// when a concurrent writer (e.g. a stale agent from a prior run) wins
/// the race.
#[async_trait]
pub trait CoordinationStore: Send + Sync {
    /// Whether a node exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool, StoreError>;

    /// Create a node with the given payload. Succeeds if the node
    /// already exists, leaving the existing node untouched.
    async fn create(&self, path: &str, payload: &[u8], kind: NodeKind)
        -> Result<(), StoreError>;

    /// Delete a node. Succeeds if the node does not exist.
    async fn delete(&self, path: &str) -> Result<(), StoreError>;

    /// Read a node's payload, or `None` if the node does not exist.
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>, StoreError>;
}
