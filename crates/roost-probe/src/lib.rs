//! Roost Probe - local device enumeration
//!
//! This crate shells out to the platform `adb` tool and extracts at most
//! one attached-device serial from its tabular output.

pub mod adb;

pub use adb::{AdbProbe, ProbeError};
