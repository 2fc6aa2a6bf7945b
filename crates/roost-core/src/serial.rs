//! Device serial identifier

use std::fmt;

/// Serial of an attached test device, as reported by the enumeration
/// command. Opaque beyond whitespace trimming; recomputed on every probe
/// and never cached across ticks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceSerial(String);

impl DeviceSerial {
    /// Build a serial from raw probe output. Surrounding whitespace is
    /// trimmed; an empty result yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Payload bytes as stored in the coordination store.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for DeviceSerial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let serial = DeviceSerial::parse("  0123456789ABCDEF\t").unwrap();
        assert_eq!(serial.as_str(), "0123456789ABCDEF");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(DeviceSerial::parse("").is_none());
        assert!(DeviceSerial::parse("   \t ").is_none());
    }
}
