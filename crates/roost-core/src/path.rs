//! Registration paths in the coordination store

use thiserror::Error;

/// Root directory all projects register under.
pub const ROOT_DIR: &str = "TestDeviceProjects";

/// Name of the leaf node recording device presence.
pub const DEVICE_NODE: &str = "device";

#[derive(Error, Debug)]
pub enum PathError {
    #[error("{0} must not be empty")]
    EmptySegment(&'static str),
    #[error("{0} must not contain '/': {1:?}")]
    InvalidSegment(&'static str, String),
}

/// Location in the coordination store where one host's device presence
/// is recorded: `/TestDeviceProjects/<project>/<hostname>/device`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationPath {
    project: String,
    hostname: String,
}

impl RegistrationPath {
    /// Build a path from the configured project name and the resolved
    /// hostname. Both segments must be non-empty and slash-free; no
    /// reconciliation may happen without a valid path.
    pub fn new(project: &str, hostname: &str) -> Result<Self, PathError> {
        for (name, value) in [("project name", project), ("hostname", hostname)] {
            if value.is_empty() {
                return Err(PathError::EmptySegment(name));
            }
            if value.contains('/') {
                return Err(PathError::InvalidSegment(name, value.to_string()));
            }
        }
        Ok(Self {
            project: project.to_string(),
            hostname: hostname.to_string(),
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Ancestor paths of the leaf, parent before child. The store
    /// rejects a child whose parent does not exist, so creation must
    /// follow this order.
    pub fn ancestors(&self) -> [String; 3] {
        let root = format!("/{}", ROOT_DIR);
        let project = format!("{}/{}", root, self.project);
        let host = format!("{}/{}", project, self.hostname);
        [root, project, host]
    }

    /// Full path of the presence leaf.
    pub fn leaf(&self) -> String {
        format!(
            "/{}/{}/{}/{}",
            ROOT_DIR, self.project, self.hostname, DEVICE_NODE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_path() {
        let path = RegistrationPath::new("Tegra", "bench-07").unwrap();
        assert_eq!(path.leaf(), "/TestDeviceProjects/Tegra/bench-07/device");
    }

    #[test]
    fn test_ancestors_parent_before_child() {
        let path = RegistrationPath::new("Tegra", "bench-07").unwrap();
        assert_eq!(
            path.ancestors(),
            [
                "/TestDeviceProjects".to_string(),
                "/TestDeviceProjects/Tegra".to_string(),
                "/TestDeviceProjects/Tegra/bench-07".to_string(),
            ]
        );
    }

    #[test]
    fn test_rejects_empty_segments() {
        assert!(matches!(
            RegistrationPath::new("", "bench-07"),
            Err(PathError::EmptySegment("project name"))
        ));
        assert!(matches!(
            RegistrationPath::new("Tegra", ""),
            Err(PathError::EmptySegment("hostname"))
        ));
    }

    #[test]
    fn test_rejects_slash_in_segment() {
        assert!(matches!(
            RegistrationPath::new("a/b", "bench-07"),
            Err(PathError::InvalidSegment("project name", _))
        ));
    }
}
