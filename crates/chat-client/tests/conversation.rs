// crates/chat-client/tests/conversation.rs
use std::time::Duration;

use chat_client::conversation::UNRECOGNIZED_PREFIX;
use chat_client::{ClientConversation, ClientError};
use chat_core::{Message, Sender};
use chat_protocol::{encode_message, MessageStream, ProtocolError};
use tokio::io::{duplex, AsyncWriteExt};

const PROMPT: &str = "localhost:9000> ";

fn server_text(body: &str) -> Message {
    Message::text(&Sender::server(), body)
}

#[tokio::test]
async fn waits_for_server_then_sends_text_verbatim() {
    let (client_side, server_side) = duplex(4096);
    let mut server = MessageStream::new(server_side);
    let mut output = Vec::new();

    let fake_server = tokio::spawn(async move {
        server.write_message(&server_text("welcome")).await.unwrap();

        let first = server.read_message().await.unwrap();
        server.write_message(&server_text("TEXT: ok")).await.unwrap();

        let second = server.read_message().await.unwrap();
        server
            .write_message(&server_text("LOGOUT requested"))
            .await
            .unwrap();
        (first, second)
    });

    let input: &[u8] = b"  hello   there \nLOGOUT\n";
    let report = ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap();

    let (first, second) = fake_server.await.unwrap();
    assert_eq!(first, Message::text(&Sender::client(), "  hello   there "));
    assert_eq!(second, Message::logout(&Sender::client()));
    assert_eq!(report.sent, 2);
    assert_eq!(report.received, 3);

    let shown = String::from_utf8(output).unwrap();
    assert_eq!(
        shown,
        format!("welcome\n{PROMPT}TEXT: ok\n{PROMPT}LOGOUT requested\n")
    );
}

#[tokio::test]
async fn list_users_is_sent_as_a_request() {
    let (client_side, server_side) = duplex(4096);
    let mut server = MessageStream::new(server_side);

    let fake_server = tokio::spawn(async move {
        server.write_message(&server_text("hi")).await.unwrap();
        let request = server.read_message().await.unwrap();
        server
            .write_message(&server_text("LISTUSERS requested"))
            .await
            .unwrap();
        server.read_message().await.unwrap();
        server.write_message(&server_text("bye")).await.unwrap();
        request
    });

    let input: &[u8] = b"listusers everyone\nlogout\n";
    let mut output = Vec::new();
    ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap();

    assert_eq!(
        fake_server.await.unwrap(),
        Message::list_users(&Sender::client())
    );
}

#[tokio::test]
async fn logout_gets_exactly_one_more_receive() {
    let (client_side, server_side) = duplex(4096);
    let mut server = MessageStream::new(server_side);

    // Server pushes three messages after the logout; only one is read.
    let fake_server = tokio::spawn(async move {
        server.write_message(&server_text("hi")).await.unwrap();
        let logout = server.read_message().await.unwrap();
        server.write_message(&server_text("ack")).await.unwrap();
        let _ = server.write_message(&server_text("closing")).await;
        let _ = server.write_message(&server_text("extra")).await;
        // Client has shut its side down.
        let after = server.read_message().await;
        (logout, after)
    });

    let input: &[u8] = b"LoGoUt\n";
    let mut output = Vec::new();
    let report = ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap();

    let (logout, after) = fake_server.await.unwrap();
    assert_eq!(logout, Message::logout(&Sender::client()));
    assert!(matches!(after, Err(ProtocolError::ConnectionClosed)));

    assert_eq!(report.received, 2);
    let shown = String::from_utf8(output).unwrap();
    assert_eq!(shown, format!("hi\n{PROMPT}ack\n"));
}

#[tokio::test]
async fn non_text_messages_are_flagged_as_unrecognized() {
    let (client_side, server_side) = duplex(4096);
    let mut server = MessageStream::new(server_side);

    let fake_server = tokio::spawn(async move {
        server
            .write_message(&Message::list_users(&Sender::server()))
            .await
            .unwrap();
        server.read_message().await.unwrap();
        server.write_message(&server_text("done")).await.unwrap();
    });

    let input: &[u8] = b"logout\n";
    let mut output = Vec::new();
    ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap();
    fake_server.await.unwrap();

    let shown = String::from_utf8(output).unwrap();
    assert!(shown.starts_with(&format!(
        "{UNRECOGNIZED_PREFIX}ListUsers[sender=server]\n"
    )));
}

#[tokio::test]
async fn server_logout_is_acknowledged() {
    let (client_side, server_side) = duplex(4096);
    let mut server = MessageStream::new(server_side);

    let fake_server = tokio::spawn(async move {
        server
            .write_message(&Message::logout(&Sender::server()))
            .await
            .unwrap();
        server.read_message().await.unwrap()
    });

    // No input is consumed: the client does not prompt.
    let input: &[u8] = b"never read\n";
    let mut output = Vec::new();
    let report = ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap();

    assert_eq!(
        fake_server.await.unwrap(),
        Message::logout(&Sender::client())
    );
    assert_eq!(report.sent, 1);
    assert!(!String::from_utf8(output).unwrap().contains(PROMPT));
}

#[tokio::test]
async fn end_of_input_logs_out() {
    let (client_side, server_side) = duplex(4096);
    let mut server = MessageStream::new(server_side);

    let fake_server = tokio::spawn(async move {
        server.write_message(&server_text("hi")).await.unwrap();
        let msg = server.read_message().await.unwrap();
        server
            .write_message(&server_text("LOGOUT requested"))
            .await
            .unwrap();
        msg
    });

    let input: &[u8] = b"";
    let mut output = Vec::new();
    ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap();

    assert_eq!(
        fake_server.await.unwrap(),
        Message::logout(&Sender::client())
    );
}

#[tokio::test]
async fn truncated_reply_aborts_the_session() {
    let (client_side, server_side) = duplex(4096);
    let (_server_read, mut server_write) = tokio::io::split(server_side);

    let mut frame = Vec::new();
    encode_message(&server_text("hello there"), &mut frame).unwrap();
    server_write
        .write_all(&frame[..frame.len() - 4])
        .await
        .unwrap();
    server_write.shutdown().await.unwrap();

    let input: &[u8] = b"hello\n";
    let mut output = Vec::new();
    let err = ClientConversation::new(client_side, input, &mut output, PROMPT)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Protocol(ProtocolError::Truncated { .. })
    ));
    assert!(output.is_empty());
}

#[tokio::test(start_paused = true)]
async fn silent_server_times_out_when_bounded() {
    let (client_side, _server_side) = duplex(4096);

    let input: &[u8] = b"";
    let mut output = Vec::new();
    let err = ClientConversation::new(client_side, input, &mut output, PROMPT)
        .with_idle_timeout(Some(Duration::from_secs(10)))
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Protocol(ProtocolError::IdleTimeout(_))
    ));
}
