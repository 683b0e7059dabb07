// crates/chat-client/src/cli.rs

use std::path::PathBuf;

use clap::Parser;

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Parser, Debug)]
#[command(name = "chat-client")]
#[command(about = "Turn-based text chat with a chat-server")]
pub struct Cli {
    /// Server host name or address
    #[arg(long)]
    pub host: Option<String>,

    /// Server port (1-49151)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Give up if the server is silent this long (seconds). Waits forever when unset.
    #[arg(long, value_name = "SECS")]
    pub idle_timeout: Option<u64>,

    /// TOML file with host/port/idle_timeout_secs; flags override it
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (to stderr)
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Merge the optional config file with the flags and validate.
    pub fn into_config(self) -> Result<ClientConfig, ClientError> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.idle_timeout.is_some() {
            config.idle_timeout_secs = self.idle_timeout;
        }

        config.validate()?;
        Ok(config)
    }
}
