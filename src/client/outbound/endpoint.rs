use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use snafu::prelude::*;
use tokio::io::DuplexStream;
use tokio::net::UnixStream;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::protocol::{Connection, Protocol, ReceiveMessageError, SendMessageError};
use crate::utils::stream::Stream;

/// Where the client reaches the daemon.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// The daemon's UNIX socket.
    Socket(PathBuf),
    /// An in-process pipe. Every connection hands its far end to the receiver
    /// returned by [`Endpoint::memory`].
    Memory {
        peers: Sender<DuplexStream>,
        capacity: usize,
    },
}

impl Endpoint {
    pub fn socket<P: AsRef<Path>>(path: P) -> Self {
        Self::Socket(path.as_ref().to_path_buf())
    }

    pub fn memory(capacity: usize) -> (Self, Receiver<DuplexStream>) {
        let (peers, receiver) = mpsc::channel(1);
        (Self::Memory { peers, capacity }, receiver)
    }

    /// Open a connection. A missing socket, a socket nobody listens on and a
    /// closed pipe all mean the daemon is not running.
    ///
    /// # Errors
    ///
    /// This function will return an error if the daemon cannot be reached.
    pub async fn connect(&self) -> Result<Connection<Box<dyn Stream>>, ExchangeError> {
        let stream: Box<dyn Stream> = match self {
            Self::Socket(path) => match UnixStream::connect(path).await {
                Ok(stream) => Box::new(stream),
                Err(err)
                    if matches!(
                        err.kind(),
                        IoErrorKind::NotFound | IoErrorKind::ConnectionRefused
                    ) =>
                {
                    return DaemonDownSnafu {
                        endpoint: self.to_string(),
                    }
                    .fail()
                }
                Err(err) => {
                    return Err(err).context(ConnectSnafu {
                        endpoint: self.to_string(),
                    })
                }
            },
            Self::Memory { peers, capacity } => {
                let (local, peer) = tokio::io::duplex(*capacity);
                peers.send(peer).await.ok().context(DaemonDownSnafu {
                    endpoint: self.to_string(),
                })?;
                Box::new(local)
            }
        };
        Ok(Connection::new(stream))
    }

    /// Send one request and wait for its answer.
    ///
    /// # Errors
    ///
    /// This function will return an error if the daemon cannot be reached or
    /// the exchange breaks off.
    pub async fn exchange(&self, request: Protocol) -> Result<Protocol, ExchangeError> {
        let mut connection = self.connect().await?;
        connection.send(&request).await.context(SendSnafu)?;
        connection.receive().await.context(ReceiveSnafu)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Socket(path) => write!(f, "{}", path.display()),
            Self::Memory { .. } => f.write_str("<memory>"),
        }
    }
}

/// An error type for talking to the daemon.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ExchangeError {
    #[snafu(display("Daemon is not listening on {endpoint}"))]
    DaemonDown { endpoint: String },
    #[snafu(display("Could not connect to {endpoint}"))]
    Connect {
        endpoint: String,
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not send the request"))]
    Send { source: SendMessageError },
    #[snafu(display("Could not receive the response"))]
    Receive { source: ReceiveMessageError },
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::protocol::{Request, Response};

    #[tokio::test]
    async fn endpoint_socket_missing() {
        let tmp = assert_fs::TempDir::new()
            .expect("Test environment should support temporary directories");
        let endpoint = Endpoint::socket(tmp.path().join("daemon.socket"));
        assert!(matches!(
            endpoint.connect().await,
            Err(ExchangeError::DaemonDown { endpoint }) if endpoint.ends_with("daemon.socket")
        ));
    }

    #[tokio::test]
    async fn endpoint_socket_stale() {
        let tmp = assert_fs::TempDir::new()
            .expect("Test environment should support temporary directories");
        let path = tmp.path().join("stale.socket");
        drop(std::os::unix::net::UnixListener::bind(&path).unwrap());

        assert!(matches!(
            Endpoint::socket(&path).connect().await,
            Err(ExchangeError::DaemonDown { .. })
        ));
    }

    #[tokio::test]
    async fn endpoint_socket_exchange() {
        let tmp = assert_fs::TempDir::new()
            .expect("Test environment should support temporary directories");
        let path = tmp.path().join("daemon.socket");
        let listener = tokio::net::UnixListener::bind(&path).unwrap();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut connection = Connection::new(stream);
            assert_eq!(
                connection.receive().await.unwrap(),
                Protocol::Request(Request::Query)
            );
            let response = Protocol::Response(Response::Timer { timer: None });
            connection.send(&response).await.unwrap();
        });

        let response = Endpoint::socket(&path)
            .exchange(Protocol::Request(Request::Query))
            .await
            .unwrap();
        assert_eq!(response, Protocol::Response(Response::Timer { timer: None }));
    }

    #[tokio::test]
    async fn endpoint_memory_closed() {
        let (endpoint, peers) = Endpoint::memory(64);
        drop(peers);
        assert!(matches!(
            endpoint.exchange(Protocol::Request(Request::Pause)).await,
            Err(ExchangeError::DaemonDown { endpoint }) if endpoint == "<memory>"
        ));
    }

    #[tokio::test]
    async fn endpoint_memory_hang_up() {
        let (endpoint, mut peers) = Endpoint::memory(64);
        tokio::spawn(async move {
            let mut connection = Connection::new(peers.recv().await.unwrap());
            connection.receive().await.unwrap();
        });

        assert!(matches!(
            endpoint.exchange(Protocol::Request(Request::Resume)).await,
            Err(ExchangeError::Receive { .. })
        ));
    }
}
