//! chat-server
//!
//! Single-session async TCP server for the turn-based chat protocol.

pub mod config;
pub mod conversation;
pub mod error;
pub mod server;

pub use config::Config;
pub use conversation::{ServerConversation, ServerScript};
pub use error::ServerError;
