//! The conversation rules both engines apply.
//!
//! - [`reply_for`]: what the server answers to each inbound message.
//! - [`classify_input`]: which message a line of client input becomes.
//!
//! Both are pure functions of their input so the engines stay thin
//! wrappers around I/O.

use crate::message_kind::MessageKind;
use crate::messages::{Message, Sender};

/// Prefix the server puts in front of an echoed text body.
pub const TEXT_REPLY_PREFIX: &str = "TEXT: ";

/// Fixed reply to a `ListUsers` request. There is no user registry.
pub const LIST_USERS_REPLY: &str = "LISTUSERS requested";

/// Acknowledgement of a `Logout` request.
pub const LOGOUT_REPLY: &str = "LOGOUT requested";

/// Build the server's reply to one inbound message.
///
/// The reply is always a `Text` signed by `sender`:
/// - `Text{body}`  => `"TEXT: " + body`
/// - `ListUsers`   => `"LISTUSERS requested"`
/// - `Logout`      => `"LOGOUT requested"`
pub fn reply_for(inbound: &Message, sender: &Sender) -> Message {
    match inbound {
        Message::Text { body, .. } => {
            Message::text(sender, format!("{}{}", TEXT_REPLY_PREFIX, body))
        }
        Message::ListUsers { .. } => Message::text(sender, LIST_USERS_REPLY),
        Message::Logout { .. } => Message::text(sender, LOGOUT_REPLY),
    }
}

/// Turn one line of local input into an outbound message.
///
/// Only the text before the first ASCII blank (space, tab, line feed,
/// vertical tab, form feed, carriage return) is inspected, ignoring case:
/// `LOGOUT` and `LISTUSERS` become the matching requests, anything else
/// (including `TEXT`, blank lines and lines starting with a blank) is
/// sent as a `Text` whose body is the whole line exactly as given.
/// Non-ASCII whitespace does not end the keyword.
pub fn classify_input(line: &str, sender: &Sender) -> Message {
    let first = line.split(is_keyword_separator).next().unwrap_or("");

    match MessageKind::from_keyword(first) {
        Some(MessageKind::Logout) => Message::logout(sender),
        Some(MessageKind::ListUsers) => Message::list_users(sender),
        Some(MessageKind::Text) | None => Message::text(sender, line),
    }
}

fn is_keyword_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}
