//! Binary encoding/decoding for chat messages.
//!
//! This module converts between:
//! - raw binary frames (`&[u8]`)
//! - high-level `chat_core::Message`
//!
//! Framing model:
//!
//! ```text
//! [0]                : msg_type (WireMessageType as u8: 0=Text, 1=Logout, 2=ListUsers)
//! [1..3]             : sender_len (u16 BE, 1..=MAX_SENDER_LEN)
//! [3..3+S]           : sender bytes (UTF-8)
//!
//! Text only:
//! [3+S..7+S]         : body_len (u32 BE, 0..=MAX_BODY_LEN)
//! [7+S..7+S+B]       : body bytes (UTF-8)
//! ```
//!
//! Frames are self-delimiting, so a stream reader can call
//! [`frame_len`] on whatever it has buffered to learn how many bytes the
//! next message needs, then hand exactly that slice to
//! [`decode_message`]. See `framed` for the async reader built on this.

use std::io;
use std::time::Duration;

use chat_core::{Message, Sender};
use thiserror::Error;

use crate::wire_types::{
    validate_sender_len, WireMessageType, BODY_LEN_PREFIX, MAX_BODY_LEN, MAX_SENDER_LEN,
    SENDER_LEN_PREFIX, TYPE_LEN,
};

/// Errors that can arise when encoding/decoding frames or reading them
/// off a stream.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame shorter than its header or length prefixes promise.
    #[error("frame truncated: needed {needed} bytes, had {available}")]
    Truncated { needed: usize, available: usize },

    /// Unknown message type byte.
    #[error("unknown message variant: {0}")]
    UnknownVariant(u8),

    /// A sender with zero length.
    #[error("sender must not be empty")]
    EmptySender,

    /// A variable field over its wire limit.
    #[error("{field} too long: {len} bytes (max {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Malformed UTF-8 in a text field.
    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// Bytes left over after a complete frame.
    #[error("{0} trailing bytes after frame")]
    TrailingBytes(usize),

    /// Peer closed the stream cleanly between frames.
    #[error("connection closed by peer")]
    ConnectionClosed,

    /// No frame arrived within the configured idle bound.
    #[error("no message received within {0:?}")]
    IdleTimeout(Duration),

    /// Underlying transport failure.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
}

// ============================================================================
// ENCODE
// ============================================================================

/// Encode a single message into a binary frame.
///
/// The encoded bytes are appended to `out`. On error nothing is written.
pub fn encode_message(msg: &Message, out: &mut Vec<u8>) -> Result<(), ProtocolError> {
    let sender = msg.sender().as_str().as_bytes();
    if !validate_sender_len(sender.len()) {
        return Err(if sender.is_empty() {
            ProtocolError::EmptySender
        } else {
            ProtocolError::FieldTooLong {
                field: "sender",
                len: sender.len(),
                max: MAX_SENDER_LEN,
            }
        });
    }

    let body = msg.body().map(str::as_bytes);
    if let Some(body) = body {
        if body.len() > MAX_BODY_LEN {
            return Err(ProtocolError::FieldTooLong {
                field: "body",
                len: body.len(),
                max: MAX_BODY_LEN,
            });
        }
    }

    out.push(WireMessageType::from_kind(msg.kind()) as u8);

    // Lengths were checked against the u16/u32 limits above.
    out.extend_from_slice(&(sender.len() as u16).to_be_bytes());
    out.extend_from_slice(sender);

    if let Some(body) = body {
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(body);
    }

    Ok(())
}

// ============================================================================
// DECODE
// ============================================================================

/// Work out the total length of the frame at the start of `buf`.
///
/// Returns `Ok(None)` while the header is still incomplete. Fails as
/// soon as the visible prefix is already invalid (unknown type, empty
/// sender, oversize body), so a reader never waits for bytes of a frame
/// it would reject anyway.
pub fn frame_len(buf: &[u8]) -> Result<Option<usize>, ProtocolError> {
    let Some(&type_byte) = buf.first() else {
        return Ok(None);
    };
    let wire_type =
        WireMessageType::from_u8(type_byte).ok_or(ProtocolError::UnknownVariant(type_byte))?;

    let sender_start = TYPE_LEN + SENDER_LEN_PREFIX;
    if buf.len() < sender_start {
        return Ok(None);
    }

    let sender_len = read_u16_be(&buf[TYPE_LEN..sender_start]) as usize;
    if sender_len == 0 {
        return Err(ProtocolError::EmptySender);
    }

    let sender_end = sender_start + sender_len;
    if !wire_type.has_body() {
        return Ok(Some(sender_end));
    }

    let body_start = sender_end + BODY_LEN_PREFIX;
    if buf.len() < body_start {
        return Ok(None);
    }

    let body_len = body_len_checked(&buf[sender_end..body_start])?;
    Ok(Some(body_start + body_len))
}

/// Decode a single message from a binary buffer.
///
/// The buffer must contain exactly one full frame as described above.
pub fn decode_message(buf: &[u8]) -> Result<Message, ProtocolError> {
    let Some(&type_byte) = buf.first() else {
        return Err(truncated(TYPE_LEN, buf));
    };
    let wire_type =
        WireMessageType::from_u8(type_byte).ok_or(ProtocolError::UnknownVariant(type_byte))?;

    let sender_start = TYPE_LEN + SENDER_LEN_PREFIX;
    if buf.len() < sender_start {
        return Err(truncated(sender_start, buf));
    }

    let sender_len = read_u16_be(&buf[TYPE_LEN..sender_start]) as usize;
    let sender_end = sender_start + sender_len;
    if buf.len() < sender_end {
        return Err(truncated(sender_end, buf));
    }

    let sender = std::str::from_utf8(&buf[sender_start..sender_end])
        .map_err(|_| ProtocolError::InvalidUtf8("sender"))?;
    let sender = Sender::new(sender).map_err(|_| ProtocolError::EmptySender)?;

    let (msg, end) = match wire_type {
        WireMessageType::Logout => (Message::logout(&sender), sender_end),
        WireMessageType::ListUsers => (Message::list_users(&sender), sender_end),
        WireMessageType::Text => {
            let body_start = sender_end + BODY_LEN_PREFIX;
            if buf.len() < body_start {
                return Err(truncated(body_start, buf));
            }

            let body_len = body_len_checked(&buf[sender_end..body_start])?;
            let body_end = body_start + body_len;
            if buf.len() < body_end {
                return Err(truncated(body_end, buf));
            }

            let body = std::str::from_utf8(&buf[body_start..body_end])
                .map_err(|_| ProtocolError::InvalidUtf8("body"))?;

            (Message::text(&sender, body), body_end)
        }
    };

    if buf.len() > end {
        return Err(ProtocolError::TrailingBytes(buf.len() - end));
    }

    Ok(msg)
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn body_len_checked(prefix: &[u8]) -> Result<usize, ProtocolError> {
    let len = read_u32_be(prefix) as usize;
    if len > MAX_BODY_LEN {
        return Err(ProtocolError::FieldTooLong {
            field: "body",
            len,
            max: MAX_BODY_LEN,
        });
    }
    Ok(len)
}

fn truncated(needed: usize, buf: &[u8]) -> ProtocolError {
    ProtocolError::Truncated {
        needed,
        available: buf.len(),
    }
}

fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
