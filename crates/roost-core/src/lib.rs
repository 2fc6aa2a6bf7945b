//! Roost Core - device presence types and reconciliation
//!
//! This crate provides the foundational pieces of the roost agent:
//! - `DeviceSerial` and `RegistrationPath` domain types
//! - The `CoordinationStore` capability trait over the remote node store
//! - The `Reconciler` that maps probed device state onto store mutations

pub mod path;
pub mod reconcile;
pub mod serial;
pub mod store;

pub use path::{PathError, RegistrationPath, DEVICE_NODE, ROOT_DIR};
pub use reconcile::Reconciler;
pub use serial::DeviceSerial;
pub use store::{CoordinationStore, NodeKind, StoreError};
