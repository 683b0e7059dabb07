//! chat-core
//!
//! Pure conversation logic:
//! - messages (the three message variants and their sender)
//! - message kinds
//! - per-connection session state (turn-taking + logout handshake)
//! - the reply / input-classification rules

pub mod message_kind;
pub mod messages;
pub mod session;
pub mod conversation;
pub mod error;

pub use message_kind::MessageKind;

pub use messages::{Message, Sender, CLIENT_SENDER, SERVER_SENDER};

pub use session::{Phase, Role, Session, SessionReport, Turn};
pub use conversation::{classify_input, reply_for};
pub use error::{MessageError, SessionError};
