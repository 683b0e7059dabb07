//! Port-range validation shared by both binaries.
//!
//! Ports are checked when a configuration is built, before any socket
//! is opened, so a bad port surfaces as a [`ConfigError`] rather than a
//! connection failure.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Ports a server may listen on: registered ports only.
pub const SERVER_PORTS: RangeInclusive<u16> = 1024..=49151;

/// Ports a client may dial.
pub const CLIENT_PORTS: RangeInclusive<u16> = 1..=49151;

/// Invalid configuration, reported before connecting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Port {port} not in range {min}-{max}.")]
    PortOutOfRange { port: u16, min: u16, max: u16 },

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

/// Check `port` against `range`.
pub fn validate_port(port: u16, range: &RangeInclusive<u16>) -> Result<u16, ConfigError> {
    if range.contains(&port) {
        Ok(port)
    } else {
        Err(ConfigError::PortOutOfRange {
            port,
            min: *range.start(),
            max: *range.end(),
        })
    }
}
