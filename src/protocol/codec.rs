//! Message framing: a big-endian `u32` body length followed by the JSON body.

use std::sync::Arc;

use bytes::{Buf, BufMut, BytesMut};
use serde_json::Error as SerdeError;
use snafu::prelude::*;

use crate::protocol::data::Protocol;

const HEADER_LEN: usize = 4;

/// Largest body accepted in either direction. A timer view takes a few
/// hundred bytes.
pub const MAX_BODY_LEN: usize = 64 * 1024;

/// Append `message` to `buf`.
///
/// # Errors
///
/// This function will return an error if the message cannot be serialized or
/// its body exceeds [`MAX_BODY_LEN`].
pub fn encode(message: &Protocol, buf: &mut BytesMut) -> Result<(), EncodeError> {
    let body = serde_json::to_vec(message).context(SerializeSnafu)?;
    let len = u32::try_from(body.len())
        .ok()
        .filter(|_| body.len() <= MAX_BODY_LEN)
        .context(OversizedBodySnafu { len: body.len() })?;

    buf.reserve(HEADER_LEN + body.len());
    buf.put_u32(len);
    buf.put_slice(&body);
    Ok(())
}

/// Take the first message off the front of `buf`. While the message is
/// incomplete `None` is returned and `buf` is left as it is.
///
/// # Errors
///
/// This function will return an error if the header announces an empty or
/// oversized body, or the body is not a valid message. The buffer should be
/// dropped afterwards.
pub fn decode(buf: &mut BytesMut) -> Result<Option<Protocol>, DecodeError> {
    let Some(header) = buf.get(..HEADER_LEN) else {
        return Ok(None);
    };
    let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    ensure!(len > 0, EmptyBodySnafu);
    ensure!(len <= MAX_BODY_LEN, TooLongSnafu { len });

    if buf.len() < HEADER_LEN + len {
        buf.reserve(HEADER_LEN + len - buf.len());
        return Ok(None);
    }

    buf.advance(HEADER_LEN);
    let body = buf.split_to(len);
    serde_json::from_slice(&body)
        .map(Some)
        .context(DeserializeSnafu)
}

/// An error type for encoding a message.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum EncodeError {
    #[snafu(display("Could not serialize message"))]
    Serialize {
        #[snafu(source(from(SerdeError, Arc::new)))]
        source: Arc<SerdeError>,
    },
    #[snafu(display("Message body of {len} bytes is too large"))]
    OversizedBody { len: usize },
}

/// An error type for decoding a message.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum DecodeError {
    #[snafu(display("Message body is empty"))]
    EmptyBody,
    #[snafu(display("Announced body of {len} bytes is too large"))]
    TooLong { len: usize },
    #[snafu(display("Could not deserialize message"))]
    Deserialize {
        #[snafu(source(from(SerdeError, Arc::new)))]
        source: Arc<SerdeError>,
    },
}
