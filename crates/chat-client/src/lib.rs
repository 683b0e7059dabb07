// crates/chat-client/src/lib.rs
//
// Interactive client: connects, then alternates between showing the
// server's message and sending one line of local input.

pub mod cli;
pub mod config;
pub mod conversation;
pub mod error;
pub mod network;

pub use config::ClientConfig;
pub use conversation::ClientConversation;
pub use error::ClientError;
