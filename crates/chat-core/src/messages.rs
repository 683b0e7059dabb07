//! Message types exchanged by the two conversation roles.
//!
//! These are **transport-agnostic** logical messages. The wire framing
//! lives in the `chat-protocol` crate; this module is purely logical.
//!
//! A [`Message`] is a closed set of three shapes. Its [`MessageKind`] is
//! derived from the variant rather than stored, so it is fixed the moment
//! the message is built, and only `Text` can ever carry a body.

use std::fmt;

use crate::error::MessageError;
use crate::message_kind::MessageKind;

/// Sender id used by the server role.
pub const SERVER_SENDER: &str = "server";

/// Sender id used by the client role.
pub const CLIENT_SENDER: &str = "client";

/// Non-empty identifier of the side that produced a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sender(String);

impl Sender {
    /// Validate and wrap a sender id.
    pub fn new(id: impl Into<String>) -> Result<Self, MessageError> {
        let id = id.into();
        if id.is_empty() {
            return Err(MessageError::EmptySender);
        }
        Ok(Sender(id))
    }

    /// The id the server role signs its messages with.
    pub fn server() -> Self {
        Sender(SERVER_SENDER.to_string())
    }

    /// The id the client role signs its messages with.
    pub fn client() -> Self {
        Sender(CLIENT_SENDER.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One unit of conversation, sent in either direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A line of text. `body` may be empty.
    Text { sender: Sender, body: String },

    /// Request to end the session.
    Logout { sender: Sender },

    /// Request for the user list. There is no roster behind it; the
    /// server answers with a fixed acknowledgement.
    ListUsers { sender: Sender },
}

impl Message {
    pub fn text(sender: &Sender, body: impl Into<String>) -> Self {
        Message::Text {
            sender: sender.clone(),
            body: body.into(),
        }
    }

    pub fn logout(sender: &Sender) -> Self {
        Message::Logout {
            sender: sender.clone(),
        }
    }

    pub fn list_users(sender: &Sender) -> Self {
        Message::ListUsers {
            sender: sender.clone(),
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Text { .. } => MessageKind::Text,
            Message::Logout { .. } => MessageKind::Logout,
            Message::ListUsers { .. } => MessageKind::ListUsers,
        }
    }

    pub fn sender(&self) -> &Sender {
        match self {
            Message::Text { sender, .. }
            | Message::Logout { sender }
            | Message::ListUsers { sender } => sender,
        }
    }

    /// The text payload, present only for `Text`.
    pub fn body(&self) -> Option<&str> {
        match self {
            Message::Text { body, .. } => Some(body),
            Message::Logout { .. } | Message::ListUsers { .. } => None,
        }
    }
}

/// Textual dump, e.g. `Text[sender=server, body="hi"]` or
/// `Logout[sender=client]`.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text { sender, body } => {
                write!(f, "Text[sender={}, body={:?}]", sender, body)
            }
            Message::Logout { sender } => write!(f, "Logout[sender={}]", sender),
            Message::ListUsers { sender } => write!(f, "ListUsers[sender={}]", sender),
        }
    }
}
