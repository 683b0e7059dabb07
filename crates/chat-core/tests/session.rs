// crates/chat-core/tests/session.rs
use chat_core::{MessageKind, Phase, Role, Session, SessionError, Turn};

use MessageKind::{ListUsers, Logout, Text};

#[test]
fn server_speaks_first() {
    let server = Session::new(Role::Server);
    assert_eq!(server.turn(), Turn::Local);

    let client = Session::new(Role::Client);
    assert_eq!(client.turn(), Turn::Remote);
}

#[test]
fn client_cannot_send_before_greeting() {
    let mut client = Session::new(Role::Client);
    assert_eq!(
        client.record_sent(Text),
        Err(SessionError::OutOfTurn {
            kind: Text,
            action: "sent"
        })
    );
}

#[test]
fn sends_and_receives_must_alternate() {
    let mut server = Session::new(Role::Server);
    server.record_sent(Text).unwrap();
    assert!(matches!(
        server.record_sent(Text),
        Err(SessionError::OutOfTurn { .. })
    ));

    server.record_received(ListUsers).unwrap();
    assert!(matches!(
        server.record_received(Text),
        Err(SessionError::OutOfTurn { .. })
    ));

    server.record_sent(Text).unwrap();
    assert_eq!(server.sent(), 2);
    assert_eq!(server.received(), 1);
    assert_eq!(server.phase(), Phase::Open);
}

#[test]
fn logout_sender_gets_exactly_one_more_receive() {
    let mut client = Session::new(Role::Client);
    client.record_received(Text).unwrap(); // greeting
    client.record_sent(Logout).unwrap();
    assert_eq!(client.phase(), Phase::LogoutSent);
    assert!(!client.is_finished());

    client.record_received(Text).unwrap(); // acknowledgement
    assert_eq!(client.phase(), Phase::Closed);
    assert!(client.is_finished());

    assert!(matches!(
        client.record_received(Text),
        Err(SessionError::Closed { .. })
    ));
    assert!(matches!(
        client.record_sent(Text),
        Err(SessionError::Closed { .. })
    ));
}

#[test]
fn logout_receiver_acknowledges_then_may_say_farewell() {
    let mut server = Session::new(Role::Server);
    server.record_sent(Text).unwrap(); // greeting
    server.record_received(Logout).unwrap();
    assert_eq!(server.phase(), Phase::LogoutReceived);

    server.record_sent(Text).unwrap(); // "LOGOUT requested"
    assert_eq!(server.phase(), Phase::Closing);
    assert!(server.is_finished());

    // Nothing more comes in once the handshake is done.
    assert!(matches!(
        server.record_received(Text),
        Err(SessionError::Closed { .. })
    ));

    server.record_sent(Text).unwrap(); // closing text
    assert_eq!(server.phase(), Phase::Closed);
    assert!(matches!(
        server.record_sent(Text),
        Err(SessionError::Closed { .. })
    ));
    assert_eq!(server.sent(), 3);
}

#[test]
fn finish_skips_the_farewell() {
    let mut client = Session::new(Role::Client);
    client.record_received(Logout).unwrap();
    assert!(!client.finish());

    client.record_sent(Logout).unwrap();
    assert_eq!(client.phase(), Phase::Closing);
    assert!(client.finish());
    assert_eq!(client.phase(), Phase::Closed);
}

#[test]
fn list_users_does_not_end_the_session() {
    let mut server = Session::new(Role::Server);
    for _ in 0..3 {
        server.record_sent(Text).unwrap();
        server.record_received(ListUsers).unwrap();
    }
    assert_eq!(server.phase(), Phase::Open);
    assert_eq!(server.turn(), Turn::Local);
}
