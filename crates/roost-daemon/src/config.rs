//! Configuration loading and validation

use std::path::{Path, PathBuf};
use std::time::Duration;

use quick_xml::de::from_str;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Poll interval applied when the file omits one or gives a
/// non-positive value.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] quick_xml::DeError),
    #[error("config lists no ZooKeeper endpoints")]
    NoEndpoints,
    #[error("ProjectName must not be empty")]
    MissingProjectName,
}

/// Agent configuration, loaded once at startup and immutable for the
/// process lifetime.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// ZooKeeper endpoints, in the order listed in the file.
    pub endpoints: Vec<String>,
    /// Project this host registers under.
    pub project_name: String,
    /// Delay between reconciliation ticks.
    pub poll_interval: Duration,
}

/// On-disk XML shape:
///
/// ```xml
/// <config>
///   <zookeepers>
///     <zookeeper>zk1.example.com:2181</zookeeper>
///     <zookeeper>zk2.example.com:2181</zookeeper>
///   </zookeepers>
///   <ProjectName>Tegra</ProjectName>
///   <IntervalTime>60</IntervalTime>
/// </config>
/// ```
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    zookeepers: Zookeepers,
    #[serde(rename = "ProjectName", default)]
    project_name: String,
    #[serde(rename = "IntervalTime")]
    interval_time: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct Zookeepers {
    #[serde(rename = "zookeeper", default)]
    zookeeper: Vec<String>,
}

/// Load and validate configuration from `path`.
pub fn load_config(path: &Path) -> Result<AgentConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let raw: RawConfig = from_str(&content)?;
    let config = validate(raw)?;
    info!(
        path = %path.display(),
        project = %config.project_name,
        endpoints = config.endpoints.len(),
        "Loaded configuration"
    );
    Ok(config)
}

fn validate(raw: RawConfig) -> Result<AgentConfig, ConfigError> {
    let endpoints: Vec<String> = raw
        .zookeepers
        .zookeeper
        .iter()
        .map(|addr| addr.trim().to_string())
        .filter(|addr| !addr.is_empty())
        .collect();
    if endpoints.is_empty() {
        return Err(ConfigError::NoEndpoints);
    }

    let project_name = raw.project_name.trim().to_string();
    if project_name.is_empty() {
        return Err(ConfigError::MissingProjectName);
    }

    let poll_interval = match raw.interval_time {
        Some(secs) if secs > 0 => Duration::from_secs(secs as u64),
        _ => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
    };

    Ok(AgentConfig {
        endpoints,
        project_name,
        poll_interval,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parses_full_config() {
        let file = write_config(
            "<config>\
               <zookeepers>\
                 <zookeeper>zk1.example.com:2181</zookeeper>\
                 <zookeeper>zk2.example.com:2181</zookeeper>\
               </zookeepers>\
               <ProjectName>Tegra</ProjectName>\
               <IntervalTime>30</IntervalTime>\
             </config>",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.endpoints,
            vec!["zk1.example.com:2181", "zk2.example.com:2181"]
        );
        assert_eq!(config.project_name, "Tegra");
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_interval_defaults() {
        let file = write_config(
            "<config>\
               <zookeepers><zookeeper>zk:2181</zookeeper></zookeepers>\
               <ProjectName>Tegra</ProjectName>\
             </config>",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.poll_interval,
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_non_positive_interval_defaults() {
        let file = write_config(
            "<config>\
               <zookeepers><zookeeper>zk:2181</zookeeper></zookeepers>\
               <ProjectName>Tegra</ProjectName>\
               <IntervalTime>0</IntervalTime>\
             </config>",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.poll_interval,
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
        );
    }

    #[test]
    fn test_missing_project_name_rejected() {
        let file = write_config(
            "<config>\
               <zookeepers><zookeeper>zk:2181</zookeeper></zookeepers>\
             </config>",
        );
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::MissingProjectName)
        ));
    }

    #[test]
    fn test_empty_endpoint_list_rejected() {
        let file = write_config(
            "<config>\
               <zookeepers><zookeeper>  </zookeeper></zookeepers>\
               <ProjectName>Tegra</ProjectName>\
             </config>",
        );
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::NoEndpoints)
        ));
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(matches!(
            load_config(Path::new("/no/such/roost.xml")),
            Err(ConfigError::NotFound(_))
        ));
    }
}
