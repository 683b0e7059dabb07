// crates/chat-client/src/config.rs

use std::path::Path;
use std::time::Duration;

use chat_protocol::{validate_port, ConfigError, CLIENT_PORTS};
use serde::Deserialize;

use crate::error::ClientError;

/// Configuration for the chat client.
///
/// Loadable from a TOML file; every field is optional there:
///
/// ```toml
/// host = "chat.example.org"
/// port = 9000
/// idle_timeout_secs = 300
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub idle_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
            idle_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Build a config for `host:port`, rejecting ports outside
    /// [`CLIENT_PORTS`].
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, ConfigError> {
        let config = Self {
            host: host.into(),
            port,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_port(self.port, &CLIENT_PORTS)?;
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Read and parse a TOML config file. The port is not validated
    /// here so command-line flags can still override it.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let text = std::fs::read_to_string(path).map_err(|source| ClientError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text).map_err(|source| ClientError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Shown before each line of input.
    pub fn prompt(&self) -> String {
        format!("{}> ", self.addr_string())
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }
}
