//! Low-level wire types and constants.
//!
//! This module defines:
//! - Message type IDs (the first byte of every frame).
//! - Length-prefix widths and limits for the variable fields.
//!
//! The actual encode/decode logic lives in `binary_codec`.

use chat_core::MessageKind;

/// Message type IDs.
///
/// These IDs are used in the first byte of each binary frame.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WireMessageType {
    /// Text line, carries a body.
    Text = 0,

    /// Logout request.
    Logout = 1,

    /// List-users request.
    ListUsers = 2,
}

impl WireMessageType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(WireMessageType::Text),
            1 => Some(WireMessageType::Logout),
            2 => Some(WireMessageType::ListUsers),
            _ => None,
        }
    }

    pub fn from_kind(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Text => WireMessageType::Text,
            MessageKind::Logout => WireMessageType::Logout,
            MessageKind::ListUsers => WireMessageType::ListUsers,
        }
    }

    /// Only `Text` frames carry a body field.
    pub fn has_body(self) -> bool {
        matches!(self, WireMessageType::Text)
    }
}

/// Width of the discriminant field.
pub const TYPE_LEN: usize = 1;

/// Width of the sender length prefix (u16 BE).
pub const SENDER_LEN_PREFIX: usize = 2;

/// Width of the body length prefix (u32 BE).
pub const BODY_LEN_PREFIX: usize = 4;

/// Longest sender the 2-byte prefix can describe.
pub const MAX_SENDER_LEN: usize = u16::MAX as usize;

/// Largest body we accept (16 MiB).
///
/// The prefix could describe up to 4 GiB; frames announcing more than
/// this are rejected before anything is allocated for them.
pub const MAX_BODY_LEN: usize = 16 * 1024 * 1024;

/// Validate a sender length against the wire limits.
pub fn validate_sender_len(len: usize) -> bool {
    len > 0 && len <= MAX_SENDER_LEN
}
