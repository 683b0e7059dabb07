//! chat-protocol
//!
//! Wire-level encoding/decoding for the chat conversation.
//!
//! This crate is responsible for turning logical messages
//! (`chat_core::Message`) into bytes and back again.
//!
//! - [`wire_types`]   : type IDs, field widths and limits
//! - [`binary_codec`] : pure encode/decode of one frame
//! - [`framed`]       : buffered async reader/writer over a byte stream
//! - [`ports`]        : port-range checks shared by server and client

pub mod wire_types;
pub mod binary_codec;
pub mod framed;
pub mod ports;

pub use binary_codec::{
    ProtocolError,
    decode_message,
    encode_message,
    frame_len,
};

pub use framed::MessageStream;
pub use ports::{validate_port, ConfigError, CLIENT_PORTS, SERVER_PORTS};
