//! Error types for the conversation core.
//!
//! The core never touches I/O, so the only failures it reports are
//! malformed message construction and protocol misuse detected by the
//! [`Session`](crate::Session) state machine.

use thiserror::Error;

use crate::message_kind::MessageKind;

/// Failure to build a [`Message`](crate::Message).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Every message must name a non-empty sender.
    #[error("message sender must not be empty")]
    EmptySender,
}

/// A send or receive that breaks turn-taking or the logout handshake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The side tried to send while waiting for the peer, or received
    /// while it was its own turn to speak.
    #[error("{kind} {action} out of turn")]
    OutOfTurn {
        kind: MessageKind,
        action: &'static str,
    },

    /// The logout handshake has already completed.
    #[error("session closed; cannot {action} {kind}")]
    Closed {
        kind: MessageKind,
        action: &'static str,
    },
}
