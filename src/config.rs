//! Store configuration
//!
//! Settings for whatever constructs the storage client. Resolved in three
//! layers: an optional YAML file, then `GOALPOST_*` environment variables,
//! then command-line flags. Nothing here reaches the pagination core.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-east-1";

/// Default table name
pub const DEFAULT_TABLE: &str = "player_stats_v1";

/// Default name of the `(pk, goals)` secondary index
pub const DEFAULT_INDEX: &str = "GSI1";

/// Which storage client to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// In-process table, lost on exit
    #[default]
    Memory,
    /// DynamoDB (or DynamoDB Local via `endpoint`)
    Dynamo,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "dynamo" | "dynamodb" => Ok(Self::Dynamo),
            other => Err(Error::config(format!("Unknown backend: {other}"))),
        }
    }
}

/// Storage client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage backend
    #[serde(default)]
    pub backend: Backend,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Endpoint override, e.g. `http://localhost:8000` for DynamoDB Local
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Table name
    #[serde(default = "default_table")]
    pub table_name: String,

    /// Secondary index name
    #[serde(default = "default_index")]
    pub index_name: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            region: default_region(),
            endpoint: None,
            table_name: default_table(),
            index_name: default_index(),
        }
    }
}

impl StoreConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Apply `GOALPOST_*` environment overrides
    pub fn with_env(self) -> Result<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(backend) = lookup("GOALPOST_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(region) = lookup("GOALPOST_REGION") {
            self.region = region;
        }
        if let Some(endpoint) = lookup("GOALPOST_ENDPOINT") {
            self.endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }
        if let Some(table) = lookup("GOALPOST_TABLE") {
            self.table_name = table;
        }
        if let Some(index) = lookup("GOALPOST_INDEX") {
            self.index_name = index;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check required fields
    pub fn validate(&self) -> Result<()> {
        if self.region.is_empty() {
            return Err(Error::config("region must not be empty"));
        }
        if self.table_name.is_empty() {
            return Err(Error::config("table_name must not be empty"));
        }
        if self.index_name.is_empty() {
            return Err(Error::config("index_name must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.table_name, "player_stats_v1");
        assert_eq!(config.index_name, "GSI1");
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = StoreConfig::from_yaml(
            "backend: dynamo\nendpoint: http://localhost:8000\n",
        )
        .unwrap();
        assert_eq!(config.backend, Backend::Dynamo);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.table_name, DEFAULT_TABLE);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region: eu-west-1\ntable_name: stats").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.table_name, "stats");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = StoreConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("GOALPOST_BACKEND", "dynamodb"),
            ("GOALPOST_ENDPOINT", "http://localhost:8000"),
            ("GOALPOST_INDEX", "by_goals"),
        ]
        .into_iter()
        .collect();

        let config = StoreConfig::default()
            .with_overrides(|name| vars.get(name).map(ToString::to_string))
            .unwrap();
        assert_eq!(config.backend, Backend::Dynamo);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.index_name, "by_goals");
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn test_invalid_overrides() {
        let err = StoreConfig::default()
            .with_overrides(|name| (name == "GOALPOST_BACKEND").then(|| "redis".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown backend"));

        let err = StoreConfig::default()
            .with_overrides(|name| (name == "GOALPOST_TABLE").then(String::new))
            .unwrap_err();
        assert!(err.to_string().contains("table_name"));
    }
}
