mod codec;
mod connection;
mod data;

pub use codec::{DecodeError, EncodeError, MAX_BODY_LEN};
pub use connection::{Connection, ReceiveMessageError, SendMessageError};
pub use data::{Protocol, Request, Response, TimerView};
