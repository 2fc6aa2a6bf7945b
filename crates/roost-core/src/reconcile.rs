//! Presence reconciliation
//!
//! One pass per tick: compare the probed local device state against the
//! registered remote state and issue the minimal set of store mutations
//! to make them match.

use tracing::info;

use crate::path::RegistrationPath;
use crate::serial::DeviceSerial;
use crate::store::{CoordinationStore, NodeKind, StoreError};

/// Reconciles probed device presence into the coordination store.
///
/// Holds no state between ticks beyond the registration path; each
/// `reconcile` call is a function of the probed serial and the current
/// store contents.
pub struct Reconciler<S> {
    store: S,
    path: RegistrationPath,
}

impl<S: CoordinationStore> Reconciler<S> {
    pub fn new(store: S, path: RegistrationPath) -> Self {
        Self { store, path }
    }

    pub fn path(&self) -> &RegistrationPath {
        &self.path
    }

    /// Run one reconciliation pass. An error aborts only this pass; the
    /// caller decides whether it is fatal.
    pub async fn reconcile(&self, serial: Option<&DeviceSerial>) -> Result<(), StoreError> {
        match serial {
            Some(serial) => self.register(serial).await,
            None => self.withdraw().await,
        }
    }

    /// Ensure the full registration path exists and the leaf carries the
    /// given serial.
    async fn register(&self, serial: &DeviceSerial) -> Result<(), StoreError> {
        // Ancestors strictly parent-first; the store rejects child-first
        // creation.
        for ancestor in self.path.ancestors() {
            if !self.store.exists(&ancestor).await? {
                self.store
                    .create(&ancestor, &[], NodeKind::Persistent)
                    .await?;
                info!(path = %ancestor, "Created registration path segment");
            }
        }

        let leaf = self.path.leaf();
        if self.store.exists(&leaf).await? {
            match self.store.read(&leaf).await? {
                Some(payload) if payload == serial.as_bytes() => return Ok(()),
                // Stale or vanished payload: replace it so the stored
                // value always reflects the live serial.
                _ => {
                    self.store.delete(&leaf).await?;
                    info!(path = %leaf, "Removed stale device registration");
                }
            }
        }

        self.store
            .create(&leaf, serial.as_bytes(), NodeKind::Ephemeral)
            .await?;
        info!(path = %leaf, serial = %serial, "Registered device");
        Ok(())
    }

    /// Drop the presence leaf. Ancestors stay: the hostname and project
    /// nodes may be shared or of historical interest.
    async fn withdraw(&self) -> Result<(), StoreError> {
        let leaf = self.path.leaf();
        if self.store.exists(&leaf).await? {
            self.store.delete(&leaf).await?;
            info!(path = %leaf, "Removed device registration");
        }
        Ok(())
    }
}
