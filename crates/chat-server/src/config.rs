//! Configuration for the chat server.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `CHAT_BIND_ADDR`         (default: "0.0.0.0")
//! - `CHAT_PORT`              (default: "9000", must be in 1024-49151)
//! - `CHAT_GREETING`          (default: [`DEFAULT_GREETING`])
//! - `CHAT_CLOSING`           (default: [`DEFAULT_CLOSING`])
//! - `CHAT_IDLE_TIMEOUT_SECS` (default: unset, wait forever)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chat_protocol::{validate_port, ConfigError, SERVER_PORTS};

use crate::conversation::ServerScript;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9000;

/// First message of every session.
pub const DEFAULT_GREETING: &str =
    "[Server listening. 'Logout' (case insensitive) closes connection.]";

/// Last message of every session that ends with a logout.
pub const DEFAULT_CLOSING: &str = "[Closing connection, good-bye.]";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on. Always within [`SERVER_PORTS`].
    pub port: u16,

    /// Text sent before the server reads anything.
    pub greeting: String,

    /// Text sent after acknowledging a logout.
    pub closing: String,

    /// How long to wait for the client's next message. `None` blocks
    /// until the client speaks or disconnects.
    pub idle_timeout: Option<Duration>,
}

impl Config {
    /// Defaults for everything but the port, which is validated.
    pub fn new(port: u16) -> Result<Self, ConfigError> {
        Ok(Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: validate_port(port, &SERVER_PORTS)?,
            greeting: DEFAULT_GREETING.to_string(),
            closing: DEFAULT_CLOSING.to_string(),
            idle_timeout: None,
        })
    }

    /// Construct a `Config` from environment variables, falling back
    /// to the defaults above.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable
    /// source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = read_or_default(&lookup, "CHAT_PORT", DEFAULT_PORT)?;
        let mut config = Config::new(port)?;

        if let Some(addr) = lookup("CHAT_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(greeting) = lookup("CHAT_GREETING") {
            config.greeting = greeting;
        }
        if let Some(closing) = lookup("CHAT_CLOSING") {
            config.closing = closing;
        }
        if let Some(secs) = read_opt::<u64, _>(&lookup, "CHAT_IDLE_TIMEOUT_SECS")? {
            config.idle_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// The fixed texts the conversation engine speaks.
    pub fn script(&self) -> ServerScript {
        ServerScript {
            greeting: self.greeting.clone(),
            closing: self.closing.clone(),
        }
    }
}

fn read_or_default<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    Ok(read_opt(lookup, key)?.unwrap_or(default))
}

fn read_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: val,
            }),
        None => Ok(None),
    }
}
