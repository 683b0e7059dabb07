//! TCP listener and top-level server wiring.
//!
//! This module:
//! - Binds the configured address/port.
//! - Accepts exactly one TCP connection.
//! - Runs a single [`ServerConversation`] on it.
//!
//! There is no accept loop: one listener serves one session.

use std::time::Duration;

use chat_core::SessionReport;
use tokio::net::{TcpListener, TcpStream};
use tracing::info;

use crate::config::Config;
use crate::conversation::{ServerConversation, ServerScript};
use crate::error::ServerError;

/// Bind the listening socket described by `config`.
pub async fn bind(config: &Config) -> Result<TcpListener, ServerError> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Connection {
            action: "listen on",
            addr: addr.clone(),
            source,
        })?;

    info!("Listening on {}", addr);
    Ok(listener)
}

/// Wait for the single client connection.
pub async fn accept_one(listener: &TcpListener) -> Result<TcpStream, ServerError> {
    let (stream, peer_addr) = listener.accept().await.map_err(|source| {
        ServerError::Connection {
            action: "accept on",
            addr: listener
                .local_addr()
                .map(|a| a.to_string())
                .unwrap_or_else(|_| "listener".to_string()),
            source,
        }
    })?;

    info!("Accepted connection from {}", peer_addr);
    Ok(stream)
}

/// Accept one client on `listener` and converse until it logs out.
///
/// The listener stays bound until the session ends, then both are
/// dropped.
pub async fn serve_one(
    listener: TcpListener,
    script: ServerScript,
    idle_timeout: Option<Duration>,
) -> Result<SessionReport, ServerError> {
    let stream = accept_one(&listener).await?;
    ServerConversation::new(stream, script, idle_timeout)
        .run()
        .await
}
