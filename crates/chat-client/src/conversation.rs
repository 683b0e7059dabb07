// crates/chat-client/src/conversation.rs
//
// Client side of the conversation. The server always speaks first, so
// every round is: receive + display, prompt, read a line, send. After
// sending a logout the client does exactly one more receive (the
// server's acknowledgement) and releases the connection.

use std::time::Duration;

use chat_core::{classify_input, Message, MessageKind, Role, Sender, Session, SessionReport};
use chat_protocol::MessageStream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::error::ClientError;

/// Shown in place of a body for anything that is not `Text`.
pub const UNRECOGNIZED_PREFIX: &str = "UNRECOGNIZED RESPONSE: ";

pub struct ClientConversation<S, I, O> {
    conn: MessageStream<S>,
    session: Session,
    input: I,
    output: O,
    prompt: String,
    idle_timeout: Option<Duration>,
    me: Sender,
}

impl<S, I, O> ClientConversation<S, I, O>
where
    S: AsyncRead + AsyncWrite + Unpin,
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    pub fn new(stream: S, input: I, output: O, prompt: impl Into<String>) -> Self {
        Self {
            conn: MessageStream::new(stream),
            session: Session::new(Role::Client),
            input,
            output,
            prompt: prompt.into(),
            idle_timeout: None,
            me: Sender::client(),
        }
    }

    /// Bound how long to wait for each server message.
    pub fn with_idle_timeout(mut self, idle_timeout: Option<Duration>) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Drive the session to completion, releasing the connection on
    /// every return path.
    pub async fn run(mut self) -> Result<SessionReport, ClientError> {
        match self.converse().await {
            Ok(()) => {
                if let Err(e) = self.conn.shutdown().await {
                    warn!("failed to shut down connection cleanly: {}", e);
                }
                Ok(self.session.report())
            }
            Err(e) => {
                error!("session aborted: {}", e);
                Err(e)
            }
        }
    }

    async fn converse(&mut self) -> Result<(), ClientError> {
        loop {
            let inbound = self.receive().await?;

            if inbound.kind() == MessageKind::Logout {
                // Peer-initiated logout: acknowledge and stop.
                let ack = Message::logout(&self.me);
                self.send(&ack).await?;
                self.session.finish();
                return Ok(());
            }

            let line = self.read_line().await?;
            let outbound = classify_input(&line, &self.me);
            self.send(&outbound).await?;

            if outbound.kind() == MessageKind::Logout {
                break;
            }
        }

        self.receive().await?;
        Ok(())
    }

    async fn receive(&mut self) -> Result<Message, ClientError> {
        let inbound = self.conn.read_message_within(self.idle_timeout).await?;
        self.session.record_received(inbound.kind())?;
        debug!(%inbound, "received");

        let shown = match &inbound {
            Message::Text { body, .. } => body.clone(),
            other => format!("{}{}", UNRECOGNIZED_PREFIX, other),
        };
        write_console(&mut self.output, &shown, true).await?;

        Ok(inbound)
    }

    async fn send(&mut self, msg: &Message) -> Result<(), ClientError> {
        self.session.record_sent(msg.kind())?;
        debug!(outbound = %msg, "sending");
        self.conn.write_message(msg).await?;
        Ok(())
    }

    /// Prompt and read one line, without its line terminator.
    ///
    /// End of input counts as a logout so the handshake still runs.
    async fn read_line(&mut self) -> Result<String, ClientError> {
        write_console(&mut self.output, &self.prompt, false).await?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .await
            .map_err(ClientError::Console)?;

        if n == 0 {
            info!("local input closed, logging out");
            write_console(&mut self.output, "", true).await?;
            return Ok(MessageKind::Logout.as_str().to_string());
        }

        Ok(strip_line_ending(&line).to_string())
    }
}

async fn write_console<O>(output: &mut O, text: &str, newline: bool) -> Result<(), ClientError>
where
    O: AsyncWrite + Unpin,
{
    output
        .write_all(text.as_bytes())
        .await
        .map_err(ClientError::Console)?;
    if newline {
        output.write_all(b"\n").await.map_err(ClientError::Console)?;
    }
    output.flush().await.map_err(ClientError::Console)
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
