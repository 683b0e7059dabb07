//! Server side of the conversation.
//!
//! ```text
//! Greeting ──▶ AwaitingClient ⇄ Replying ──(inbound Logout)──▶ Closing
//! ```
//!
//! The server always speaks first. After that it answers each inbound
//! message exactly once (see [`chat_core::reply_for`]). When the client
//! logs out, the acknowledgement is followed by the closing text and the
//! transport is shut down.
//!
//! A decode failure ends the session on the spot: the error is logged
//! and returned, and no closing text is sent.

use std::time::Duration;

use chat_core::{reply_for, Message, MessageKind, Role, Sender, Session, SessionReport};
use chat_protocol::MessageStream;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info, warn};

use crate::config::{DEFAULT_CLOSING, DEFAULT_GREETING};
use crate::error::ServerError;

/// Fixed texts the server speaks around the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerScript {
    pub greeting: String,
    pub closing: String,
}

impl Default for ServerScript {
    fn default() -> Self {
        ServerScript {
            greeting: DEFAULT_GREETING.to_string(),
            closing: DEFAULT_CLOSING.to_string(),
        }
    }
}

/// One server-role session over an accepted stream.
pub struct ServerConversation<S> {
    conn: MessageStream<S>,
    session: Session,
    script: ServerScript,
    idle_timeout: Option<Duration>,
    me: Sender,
}

impl<S> ServerConversation<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, script: ServerScript, idle_timeout: Option<Duration>) -> Self {
        Self {
            conn: MessageStream::new(stream),
            session: Session::new(Role::Server),
            script,
            idle_timeout,
            me: Sender::server(),
        }
    }

    /// Drive the session to completion.
    ///
    /// Consumes the conversation, so the transport is released on every
    /// return path.
    pub async fn run(mut self) -> Result<SessionReport, ServerError> {
        match self.converse().await {
            Ok(()) => {
                if let Err(e) = self.conn.shutdown().await {
                    warn!("failed to shut down connection cleanly: {}", e);
                }
                info!(
                    sent = self.session.sent(),
                    received = self.session.received(),
                    "client logged out"
                );
                Ok(self.session.report())
            }
            Err(e) => {
                error!("session aborted: {}", e);
                Err(e)
            }
        }
    }

    async fn converse(&mut self) -> Result<(), ServerError> {
        let greeting = Message::text(&self.me, self.script.greeting.as_str());
        self.send(&greeting).await?;

        loop {
            let inbound = self.conn.read_message_within(self.idle_timeout).await?;
            self.session.record_received(inbound.kind())?;
            debug!(%inbound, "received");

            let reply = reply_for(&inbound, &self.me);
            self.send(&reply).await?;

            if inbound.kind() == MessageKind::Logout {
                break;
            }
        }

        let closing = Message::text(&self.me, self.script.closing.as_str());
        self.send(&closing).await
    }

    async fn send(&mut self, msg: &Message) -> Result<(), ServerError> {
        self.session.record_sent(msg.kind())?;
        debug!(outbound = %msg, "sending");
        self.conn.write_message(msg).await?;
        Ok(())
    }
}
