//! adb device enumeration

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use roost_core::DeviceSerial;

/// Program invoked to enumerate attached devices.
pub const DEFAULT_PROGRAM: &str = "adb";

/// Subcommand producing the device table.
const LIST_SUBCOMMAND: &str = "devices";

/// Marker token ending an attached-device line.
const DEVICE_MARKER: &str = "device";

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Probes for an attached device by shelling out to `adb devices`.
#[derive(Debug, Clone)]
pub struct AdbProbe {
    program: String,
}

impl Default for AdbProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl AdbProbe {
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Use a different enumeration binary (absolute path or name on
    /// `PATH`).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Current local device state. Every failure folds to "no device
    /// attached" after logging; a failed probe must never stop the loop.
    pub async fn probe(&self) -> Option<DeviceSerial> {
        match self.try_probe().await {
            Ok(serial) => serial,
            Err(err) => {
                warn!(error = %err, "Device probe failed, treating as no device");
                None
            }
        }
    }

    async fn try_probe(&self) -> Result<Option<DeviceSerial>, ProbeError> {
        // output() waits for the process to exit, so the read is bounded
        // by the command's own termination.
        let output = Command::new(&self.program)
            .arg(LIST_SUBCOMMAND)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: self.program.clone(),
                status: output.status,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let serial = first_attached_serial(&stdout);
        if serial.is_none() {
            debug!(program = %self.program, "No attached device in enumeration output");
        }
        Ok(serial)
    }
}

/// First line of the form `<serial><whitespace>device`. The marker must
/// be preceded by whitespace, so a bare `device` line does not match.
fn first_attached_serial(output: &str) -> Option<DeviceSerial> {
    output.lines().find_map(parse_device_line)
}

fn parse_device_line(line: &str) -> Option<DeviceSerial> {
    let prefix = line.strip_suffix(DEVICE_MARKER)?;
    if !prefix.ends_with(char::is_whitespace) {
        return None;
    }
    DeviceSerial::parse(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_attached_serial() {
        let output = "List of devices attached\n0123456789ABCDEF\tdevice\n\n";
        let serial = first_attached_serial(output).unwrap();
        assert_eq!(serial.as_str(), "0123456789ABCDEF");
    }

    #[test]
    fn test_skips_non_device_states() {
        let output =
            "List of devices attached\nemulator-5554\toffline\n0123456789ABCDEF\tunauthorized\n";
        assert!(first_attached_serial(output).is_none());
    }

    #[test]
    fn test_marker_requires_preceding_whitespace() {
        assert!(first_attached_serial("device\n").is_none());
        assert!(first_attached_serial("somedevice\n").is_none());
    }

    #[test]
    fn test_first_matching_line_wins() {
        let output = "List of devices attached\nFIRST\tdevice\nSECOND\tdevice\n";
        let serial = first_attached_serial(output).unwrap();
        assert_eq!(serial.as_str(), "FIRST");
    }

    #[test]
    fn test_empty_output() {
        assert!(first_attached_serial("").is_none());
    }

    #[tokio::test]
    async fn test_missing_program_folds_to_no_device() {
        let probe = AdbProbe::with_program("roost-test-no-such-binary");
        assert!(probe.probe().await.is_none());
    }

    #[tokio::test]
    async fn test_output_without_match_folds_to_no_device() {
        // Runs `echo devices`; the output has no attached-device line.
        let probe = AdbProbe::with_program("echo");
        assert!(probe.probe().await.is_none());
    }
}
