// crates/chat-protocol/tests/framed.rs
use std::time::Duration;

use chat_core::{Message, Sender};
use chat_protocol::{encode_message, MessageStream, ProtocolError};
use tokio::io::{duplex, AsyncWriteExt};

fn encode(msg: &Message) -> Vec<u8> {
    let mut out = Vec::new();
    encode_message(msg, &mut out).expect("encode");
    out
}

#[tokio::test]
async fn messages_flow_both_ways() {
    let (a, b) = duplex(1024);
    let mut left = MessageStream::new(a);
    let mut right = MessageStream::new(b);

    let hello = Message::text(&Sender::client(), "hello");
    left.write_message(&hello).await.unwrap();
    assert_eq!(right.read_message().await.unwrap(), hello);

    let reply = Message::text(&Sender::server(), "TEXT: hello");
    right.write_message(&reply).await.unwrap();
    assert_eq!(left.read_message().await.unwrap(), reply);
}

#[tokio::test]
async fn partial_writes_are_buffered_until_complete() {
    let (mut raw, b) = duplex(1024);
    let mut stream = MessageStream::new(b);

    let msg = Message::text(&Sender::client(), "split across writes");
    let bytes = encode(&msg);

    let writer = tokio::spawn(async move {
        for chunk in bytes.chunks(3) {
            raw.write_all(chunk).await.unwrap();
            raw.flush().await.unwrap();
            tokio::task::yield_now().await;
        }
        raw
    });

    assert_eq!(stream.read_message().await.unwrap(), msg);
    drop(writer.await.unwrap());
    assert!(matches!(
        stream.read_message().await,
        Err(ProtocolError::ConnectionClosed)
    ));
}

#[tokio::test]
async fn back_to_back_frames_are_read_one_at_a_time() {
    let (mut raw, b) = duplex(1024);
    let mut stream = MessageStream::new(b);

    let first = Message::text(&Sender::server(), "LOGOUT requested");
    let second = Message::text(&Sender::server(), "[Closing connection, good-bye.]");
    let mut bytes = encode(&first);
    bytes.extend(encode(&second));
    raw.write_all(&bytes).await.unwrap();

    drop(raw);

    assert_eq!(stream.read_message().await.unwrap(), first);
    assert_eq!(stream.read_message().await.unwrap(), second);
    assert!(matches!(
        stream.read_message().await,
        Err(ProtocolError::ConnectionClosed)
    ));
}

#[tokio::test]
async fn eof_mid_payload_is_truncation() {
    let (mut raw, b) = duplex(1024);
    let mut stream = MessageStream::new(b);

    let bytes = encode(&Message::text(&Sender::client(), "hello"));
    raw.write_all(&bytes[..bytes.len() - 3]).await.unwrap();
    drop(raw);

    match stream.read_message().await {
        Err(ProtocolError::Truncated { needed, available }) => {
            assert_eq!(needed, bytes.len());
            assert_eq!(available, bytes.len() - 3);
        }
        other => panic!("expected Truncated, got {other:?}"),
    }
}

#[tokio::test]
async fn eof_between_frames_is_a_clean_close() {
    let (raw, b) = duplex(64);
    let mut stream = MessageStream::new(b);
    drop(raw);

    assert!(matches!(
        stream.read_message().await,
        Err(ProtocolError::ConnectionClosed)
    ));
}

#[tokio::test]
async fn unknown_variant_fails_without_waiting_for_more() {
    let (mut raw, b) = duplex(64);
    let mut stream = MessageStream::new(b);
    raw.write_all(&[9]).await.unwrap();

    assert!(matches!(
        stream.read_message().await,
        Err(ProtocolError::UnknownVariant(9))
    ));
    drop(raw);
}

#[tokio::test(start_paused = true)]
async fn idle_bound_is_optional() {
    let (_raw, b) = duplex(64);
    let mut stream = MessageStream::new(b);

    let err = stream
        .read_message_within(Some(Duration::from_secs(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, ProtocolError::IdleTimeout(d) if d == Duration::from_secs(5)));
}
