//! Error type for the server role.

use std::io;

use chat_core::SessionError;
use chat_protocol::{ConfigError, ProtocolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Bad configuration; nothing was opened.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Could not listen on or accept from the configured address.
    #[error("failed to {action} {addr}: {source}")]
    Connection {
        action: &'static str,
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Malformed or missing frame; the session was abandoned.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The peer broke turn-taking or the logout handshake.
    #[error(transparent)]
    Session(#[from] SessionError),
}
