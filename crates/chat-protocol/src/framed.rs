//! Buffered message stream over any duplex byte transport.
//!
//! [`MessageStream`] owns the transport for the lifetime of a session.
//! Reads accumulate in a `BytesMut` until [`frame_len`] says a whole
//! frame is present, so callers only ever see complete messages no
//! matter how the bytes were split on the wire.
//!
//! Dropping the stream drops (and so closes) the transport. Engines
//! call [`MessageStream::shutdown`] on the orderly path as well.

use std::time::Duration;

use bytes::BytesMut;
use chat_core::Message;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::binary_codec::{decode_message, encode_message, frame_len, ProtocolError};

const READ_CAPACITY: usize = 4096;

pub struct MessageStream<S> {
    stream: S,
    read_buffer: BytesMut,
    write_buffer: Vec<u8>,
}

impl<S> MessageStream<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            read_buffer: BytesMut::with_capacity(READ_CAPACITY),
            write_buffer: Vec::with_capacity(256),
        }
    }

    /// Read the next complete message, waiting as long as it takes.
    pub async fn read_message(&mut self) -> Result<Message, ProtocolError> {
        loop {
            if let Some(len) = frame_len(&self.read_buffer)? {
                if self.read_buffer.len() >= len {
                    let frame = self.read_buffer.split_to(len);
                    return decode_message(&frame);
                }
            }

            self.read_buffer.reserve(READ_CAPACITY);
            let n = self.stream.read_buf(&mut self.read_buffer).await?;
            if n == 0 {
                return Err(self.eof_error());
            }
        }
    }

    /// Like [`read_message`](Self::read_message) but gives up after
    /// `idle` with [`ProtocolError::IdleTimeout`]. `None` waits forever.
    pub async fn read_message_within(
        &mut self,
        idle: Option<Duration>,
    ) -> Result<Message, ProtocolError> {
        match idle {
            Some(limit) => timeout(limit, self.read_message())
                .await
                .map_err(|_| ProtocolError::IdleTimeout(limit))?,
            None => self.read_message().await,
        }
    }

    /// Encode, write and flush one message.
    pub async fn write_message(&mut self, msg: &Message) -> Result<(), ProtocolError> {
        self.write_buffer.clear();
        encode_message(msg, &mut self.write_buffer)?;

        self.stream.write_all(&self.write_buffer).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Flush and close the write half of the transport.
    pub async fn shutdown(&mut self) -> std::io::Result<()> {
        self.stream.shutdown().await
    }

    fn eof_error(&self) -> ProtocolError {
        if self.read_buffer.is_empty() {
            return ProtocolError::ConnectionClosed;
        }

        // Header incomplete: all we know is one more byte was needed.
        let needed = match frame_len(&self.read_buffer) {
            Ok(Some(len)) => len,
            _ => self.read_buffer.len() + 1,
        };
        ProtocolError::Truncated {
            needed,
            available: self.read_buffer.len(),
        }
    }
}
