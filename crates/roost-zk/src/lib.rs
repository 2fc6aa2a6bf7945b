//! Roost ZooKeeper - coordination store adapter
//!
//! This crate wraps zookeeper-client to provide the `CoordinationStore`
//! capability over a single ZooKeeper session.

pub mod client;

pub use client::{ConnectError, ZkStore};
