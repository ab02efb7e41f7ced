use std::fs;
use std::io::{Error as IoError, ErrorKind as IoErrorKind};
use std::os::unix::fs::FileTypeExt;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::path::Path;
use std::sync::Arc;

use snafu::prelude::*;
use tokio::io::DuplexStream;
use tokio::net::UnixListener as TokioUnixListener;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::utils::stream::Stream;

/// Abstract listener which listens on a given endpoint and accepts connections.
#[async_trait::async_trait]
pub trait Listener: Send + Sync {
    /// Accept connections and return its corresponding stream.
    ///
    /// # Errors
    ///
    /// This function will return an error if the connection fails to establish.
    async fn accept(&self) -> Result<Box<dyn Stream>, ListenError>;
}

/// An error for listening procedure.
#[derive(Debug, Snafu, Clone)]
#[non_exhaustive]
pub enum ListenError {
    #[snafu(display("Could not bind to occupied endpoint {endpoint}"))]
    InUse { endpoint: String },
    #[snafu(display("Could not bind due to system error"))]
    BindSystem {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
    #[snafu(display("Could not bind: {message}"))]
    BindUnknown { message: String },
    #[snafu(display("Could not accept connection due to system error"))]
    AcceptSystem {
        #[snafu(source(from(IoError, Arc::new)))]
        source: Arc<IoError>,
    },
}

/// A [`Listener`] implementation which returns [`UnixStream`]s.
#[derive(Debug)]
pub struct UnixListener {
    listener: TokioUnixListener,
}

impl UnixListener {
    /// Create a [`UnixListener`] with a given UNIX socket path. A socket left
    /// behind by a daemon that died without cleaning up is replaced.
    ///
    /// # Errors
    ///
    /// This function will return an error if it fails to bind to the socket,
    /// or another daemon is still listening on it.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ListenError> {
        let path = path.as_ref();
        match TokioUnixListener::bind(path) {
            Ok(listener) => Ok(Self { listener }),
            Err(err) if err.kind() == IoErrorKind::AddrInUse && Self::is_stale(path) => {
                tracing::warn!(socket = %path.display(), "Replacing stale socket");
                fs::remove_file(path).context(BindSystemSnafu)?;
                let listener = TokioUnixListener::bind(path).context(BindSystemSnafu)?;
                Ok(Self { listener })
            }
            Err(err) => match err.kind() {
                IoErrorKind::AddrInUse => InUseSnafu {
                    endpoint: path.to_string_lossy(),
                }
                .fail(),
                _ => Err(err).context(BindSystemSnafu),
            },
        }
    }

    /// Returns `true` if `path` is a socket that nobody listens on.
    fn is_stale(path: &Path) -> bool {
        let is_socket = fs::symlink_metadata(path)
            .map(|metadata| metadata.file_type().is_socket())
            .unwrap_or(false);
        is_socket
            && matches!(
                StdUnixStream::connect(path),
                Err(err) if err.kind() == IoErrorKind::ConnectionRefused
            )
    }

    /// Return its internal listener.
    pub fn into_inner(self) -> TokioUnixListener {
        self.listener
    }
}

#[async_trait::async_trait]
impl Listener for UnixListener {
    async fn accept(&self) -> Result<Box<dyn Stream>, ListenError> {
        self.listener
            .accept()
            .await
            .map(|(stream, _)| -> Box<dyn Stream> { Box::new(stream) })
            .context(AcceptSystemSnafu)
    }
}

impl From<TokioUnixListener> for UnixListener {
    fn from(value: TokioUnixListener) -> Self {
        Self { listener: value }
    }
}

/// A [`Listener`] implementation which returns [`DuplexStream`]s. This is
/// typically used for testing purpose.
#[derive(Debug)]
pub struct DuplexListener {
    peer: Sender<DuplexStream>,
    buffer_size: usize,
}

impl DuplexListener {
    /// Create a [`DuplexListener`] and return a channel receiver which
    /// receives the [`DuplexStream`].
    pub fn new(buffer_size: usize) -> (Self, Receiver<DuplexStream>) {
        let (sender, receiver) = mpsc::channel(1);
        let listener = Self {
            peer: sender,
            buffer_size,
        };
        (listener, receiver)
    }
}

#[async_trait::async_trait]
impl Listener for DuplexListener {
    async fn accept(&self) -> Result<Box<dyn Stream>, ListenError> {
        let (local, peer) = tokio::io::duplex(self.buffer_size);
        self.peer.send(peer).await.map_err(|_| {
            BindUnknownSnafu {
                message: "Peer already closed",
            }
            .build()
        })?;
        Ok(Box::new(local))
    }
}
