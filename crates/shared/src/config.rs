//! Configuration types for the agency server
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. The binary layers CLI flags and environment
//! variables on top of whatever is loaded here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AgencyError, Result};

/// Top-level configuration (agency.yaml / agency.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgencyConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub breeds: BreedsConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string; `None` means no database configured
    pub url: Option<String>,
    pub max_connections: u32,
    /// Apply embedded migrations on startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreedsConfig {
    /// Endpoint returning a JSON array of `{"name": ...}` objects
    pub source_url: String,
}

impl Default for BreedsConfig {
    fn default() -> Self {
        Self {
            source_url: "https://api.thecatapi.com/v1/breeds".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `agency_adapter=debug,info`
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AgencyConfig {
    /// Load configuration from a JSON or YAML file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
            other => Err(AgencyError::Config(format!(
                "unsupported config format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(AgencyError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.breeds.source_url.trim().is_empty() {
            return Err(AgencyError::Config(
                "breeds.source_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
