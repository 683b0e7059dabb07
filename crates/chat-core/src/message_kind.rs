//! Message kind (Text / Logout / ListUsers) discriminant.

/// The kind of a [`Message`](crate::Message).
///
/// Derived from the message variant, so it cannot drift from the
/// payload a message carries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Text,
    Logout,
    ListUsers,
}

impl MessageKind {
    /// Upper-case keyword form (`"TEXT"`, `"LOGOUT"`, `"LISTUSERS"`).
    ///
    /// The two request keywords double as the client commands that
    /// produce those messages.
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Text => "TEXT",
            MessageKind::Logout => "LOGOUT",
            MessageKind::ListUsers => "LISTUSERS",
        }
    }

    /// Try to parse a keyword, ignoring ASCII case.
    pub fn from_keyword(word: &str) -> Option<Self> {
        [MessageKind::Text, MessageKind::Logout, MessageKind::ListUsers]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(word))
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
