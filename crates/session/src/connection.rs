//! Connection manager - one-shot connect and the two halves of the socket.
//!
//! The receive loop owns [`Inbound`], the submitter owns [`Outbound`]. Both
//! hold a clone of the same [`Connection`], so a fatal read-side failure makes
//! later sends fail fast instead of writing into a dead socket.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    Connecting,
    Connected,
    Closed,
}

impl LinkStatus {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => LinkStatus::Connecting,
            1 => LinkStatus::Connected,
            _ => LinkStatus::Closed,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            LinkStatus::Connecting => 0,
            LinkStatus::Connected => 1,
            LinkStatus::Closed => 2,
        }
    }
}

/// Endpoint plus the shared link status.
#[derive(Debug, Clone)]
pub struct Connection {
    host: String,
    port: u16,
    status: Arc<AtomicU8>,
}

impl Connection {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            status: Arc::new(AtomicU8::new(LinkStatus::Connecting.as_u8())),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn status(&self) -> LinkStatus {
        LinkStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    pub fn is_closed(&self) -> bool {
        self.status() == LinkStatus::Closed
    }

    /// `Connecting -> Connected`; a closed link stays closed.
    pub fn mark_connected(&self) {
        let _ = self.status.compare_exchange(
            LinkStatus::Connecting.as_u8(),
            LinkStatus::Connected.as_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn mark_closed(&self) {
        self.status.store(LinkStatus::Closed.as_u8(), Ordering::Release);
    }
}

pub struct ConnectionManager<S = TcpStream> {
    connection: Connection,
    stream: S,
}

impl ConnectionManager<TcpStream> {
    /// Single connection attempt. No retry.
    ///
    /// Without a timeout this waits as long as the OS does.
    pub async fn connect(
        host: &str,
        port: u16,
        timeout: Option<Duration>,
    ) -> Result<Self, SessionError> {
        let addr = format!("{}:{}", host, port);
        info!(%addr, "connecting");

        let attempt = TcpStream::connect((host, port));
        let result = match timeout {
            Some(limit) => match tokio::time::timeout(limit, attempt).await {
                Ok(r) => r,
                Err(_) => {
                    warn!(%addr, ms = limit.as_millis() as u64, "connect timed out");
                    return Err(SessionError::ConnectTimeout {
                        addr,
                        after_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => attempt.await,
        };

        let stream = result.map_err(|source| {
            warn!(%addr, error = %source, "connect failed");
            SessionError::Connect {
                addr: addr.clone(),
                source,
            }
        })?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "set_nodelay failed");
        }

        info!(%addr, "connected");
        Ok(Self::from_stream(host, port, stream))
    }
}

impl<S: AsyncRead + AsyncWrite> ConnectionManager<S> {
    /// Wrap an already established stream.
    pub fn from_stream(host: impl Into<String>, port: u16, stream: S) -> Self {
        let connection = Connection::new(host, port);
        connection.mark_connected();
        Self { connection, stream }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn split(self) -> (Inbound<ReadHalf<S>>, Outbound<WriteHalf<S>>) {
        let (reader, writer) = tokio::io::split(self.stream);
        (
            Inbound::new(reader, self.connection.clone()),
            Outbound::new(writer, self.connection),
        )
    }
}

/// Read side of the connection.
pub struct Inbound<R> {
    reader: R,
    connection: Connection,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> Inbound<R> {
    pub fn new(reader: R, connection: Connection) -> Self {
        Self {
            reader,
            connection,
            buf: Vec::new(),
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Read up to `max_bytes`.
    ///
    /// A zero-length read (peer closed) or an I/O error closes the connection.
    pub async fn receive(&mut self, max_bytes: usize) -> Result<&[u8], SessionError> {
        if self.connection.is_closed() {
            return Err(SessionError::PeerClosed);
        }

        self.buf.resize(max_bytes.max(1), 0);
        match self.reader.read(&mut self.buf).await {
            Ok(0) => {
                self.connection.mark_closed();
                Err(SessionError::PeerClosed)
            }
            Ok(n) => Ok(&self.buf[..n]),
            Err(e) => {
                self.connection.mark_closed();
                Err(SessionError::Receive(e))
            }
        }
    }
}

/// Write side of the connection.
pub struct Outbound<W> {
    writer: W,
    connection: Connection,
}

impl<W: AsyncWrite + Unpin> Outbound<W> {
    pub fn new(writer: W, connection: Connection) -> Self {
        Self { writer, connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Write the whole buffer. Fails fast once the connection is closed.
    pub async fn send(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        if self.connection.is_closed() {
            return Err(SessionError::SendOnClosed);
        }
        self.writer.write_all(bytes).await.map_err(SessionError::Send)?;
        self.writer.flush().await.map_err(SessionError::Send)?;
        Ok(())
    }
}
