use std::io::Error as IoError;
use std::sync::Arc;

use bytes::BytesMut;
use snafu::prelude::*;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::protocol::codec::{self, DecodeError, EncodeError};
use crate::protocol::data::Protocol;

/// A stream carrying framed [`Protocol`] messages. The client sends one
/// request per connection and the daemon answers it once.
pub struct Connection<S> {
    stream: S,
    inbound: BytesMut,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            inbound: BytesMut::with_capacity(512),
        }
    }

    /// Write `message` and flush it.
    ///
    /// # Errors
    ///
    /// This function will return an error if the message cannot be encoded or
    /// the stream rejects the bytes.
    pub async fn send(&mut self, message: &Protocol) -> Result<(), SendMessageError> {
        let mut outbound = BytesMut::new();
        codec::encode(message, &mut outbound).context(EncodeSnafu)?;
        self.stream.write_all(&outbound).await.context(WriteSnafu)?;
        self.stream.flush().await.context(WriteSnafu)
    }

    /// Read until one whole message has arrived.
    ///
    /// # Errors
    ///
    /// This function will return an error if the peer sends garbage or hangs
    /// up before a whole message arrived.
    pub async fn receive(&mut self) -> Result<Protocol, ReceiveMessageError> {
        loop {
            if let Some(message) = codec::decode(&mut self.inbound).context(DecodeSnafu)? {
                return Ok(message);
            }

            let read = self
                .stream
                .read_buf(&mut self.inbound)
                .await
                .context(ReadSnafu)?;
            if read == 0 {
                return ClosedSnafu {
                    pending: self.inbound.len(),
                }
                .fail();
            }
        }
    }
}

impl<S> From<S> for Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    fn from(value: S) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Snafu, Clone)]
pub enum SendMessageError {
    #[snafu(display("Could not encode message"))]
    Encode { source: EncodeError },
    #[snafu(display("Could not write message"))]
    Write {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

#[derive(Debug, Snafu, Clone)]
pub enum ReceiveMessageError {
    #[snafu(display("Could not decode message"))]
    Decode { source: DecodeError },
    #[snafu(display("Peer hung up with {pending} bytes of an unfinished message"))]
    Closed { pending: usize },
    #[snafu(display("Could not read message"))]
    Read {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}
