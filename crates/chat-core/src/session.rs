//! Turn-taking and logout handshake state shared by both roles.
//!
//! A [`Session`] does not own the transport. Each engine records every
//! message it sends or receives, and the session rejects anything that
//! breaks the conversation rules:
//!
//! - Strict alternation: one outstanding message per direction. The
//!   server speaks first, so a server session starts on its own turn
//!   and a client session starts waiting.
//! - Logout handshake: the side that sends `Logout` gets exactly one
//!   more receive; the side that receives `Logout` sends exactly one
//!   acknowledgement and may then emit a single farewell before it
//!   closes. Nothing is accepted after that.
//!
//! ```text
//!  Open ──send Logout──▶ LogoutSent ──recv──▶ Closed
//!   │
//!   └──recv Logout──▶ LogoutReceived ──send ack──▶ Closing ──send / finish──▶ Closed
//! ```

use crate::error::SessionError;
use crate::message_kind::MessageKind;

/// Which end of the connection a session belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Server,
    Client,
}

/// Whose turn it is to send.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Turn {
    Local,
    Remote,
}

/// Where the session is in the logout handshake.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Normal conversation.
    Open,

    /// We sent `Logout`; exactly one receive remains.
    LogoutSent,

    /// The peer sent `Logout`; exactly one acknowledgement remains.
    LogoutReceived,

    /// Handshake done. One optional farewell send is still allowed.
    Closing,

    /// Terminal.
    Closed,
}

/// Message counts for a finished session.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub sent: u64,
    pub received: u64,
}

/// Per-connection conversation state.
#[derive(Debug, Clone)]
pub struct Session {
    turn: Turn,
    phase: Phase,
    sent: u64,
    received: u64,
}

impl Session {
    pub fn new(role: Role) -> Self {
        let turn = match role {
            Role::Server => Turn::Local,
            Role::Client => Turn::Remote,
        };

        Session {
            turn,
            phase: Phase::Open,
            sent: 0,
            received: 0,
        }
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Messages sent so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Messages received so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            sent: self.sent,
            received: self.received,
        }
    }

    /// True once the logout handshake has completed.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Closing | Phase::Closed)
    }

    /// Record an outbound message of the given kind.
    pub fn record_sent(&mut self, kind: MessageKind) -> Result<(), SessionError> {
        match self.phase {
            Phase::Closed => {
                return Err(SessionError::Closed {
                    kind,
                    action: "send",
                })
            }
            // The farewell is not a turn; it is the last thing on the wire.
            Phase::Closing => {
                self.phase = Phase::Closed;
                self.sent += 1;
                return Ok(());
            }
            Phase::Open | Phase::LogoutSent | Phase::LogoutReceived => {}
        }

        if self.turn != Turn::Local {
            return Err(SessionError::OutOfTurn {
                kind,
                action: "sent",
            });
        }

        self.turn = Turn::Remote;
        self.sent += 1;

        self.phase = match (self.phase, kind) {
            (Phase::LogoutReceived, _) => Phase::Closing,
            (Phase::Open, MessageKind::Logout) => Phase::LogoutSent,
            (phase, _) => phase,
        };

        Ok(())
    }

    /// Record an inbound message of the given kind.
    pub fn record_received(&mut self, kind: MessageKind) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Closed {
                kind,
                action: "receive",
            });
        }

        if self.turn != Turn::Remote {
            return Err(SessionError::OutOfTurn {
                kind,
                action: "received",
            });
        }

        self.turn = Turn::Local;
        self.received += 1;

        self.phase = match (self.phase, kind) {
            (Phase::LogoutSent, _) => Phase::Closed,
            (Phase::Open, MessageKind::Logout) => Phase::LogoutReceived,
            (phase, _) => phase,
        };

        Ok(())
    }

    /// Close without the optional farewell.
    ///
    /// Only valid once the handshake is done; an unfinished session is
    /// left untouched and reported as `false`.
    pub fn finish(&mut self) -> bool {
        if self.is_finished() {
            self.phase = Phase::Closed;
            true
        } else {
            false
        }
    }
}
