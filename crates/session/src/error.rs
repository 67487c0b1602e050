//! Session error taxonomy.

use std::io;
use std::str::Utf8Error;

/// Coarse classification used by callers to decide what is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Startup failed; no session exists.
    Connection,
    /// A submission could not be written. The session is unaffected.
    Send,
    /// The inbound side failed. The session is closed for good.
    Receive,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },
    #[error("connecting to {addr} timed out after {after_ms} ms")]
    ConnectTimeout { addr: String, after_ms: u64 },
    #[error("failed to start network runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("write to server failed: {0}")]
    Send(#[source] io::Error),
    #[error("connection is closed")]
    SendOnClosed,
    #[error("failed to encode player record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("receive failed: {0}")]
    Receive(#[source] io::Error),
    #[error("server closed the connection")]
    PeerClosed,
    #[error("inbound data is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Connect { .. }
            | SessionError::ConnectTimeout { .. }
            | SessionError::Runtime(_) => ErrorKind::Connection,
            SessionError::Send(_) | SessionError::SendOnClosed | SessionError::Encode(_) => {
                ErrorKind::Send
            }
            SessionError::Receive(_) | SessionError::PeerClosed | SessionError::Decode(_) => {
                ErrorKind::Receive
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        let refused = SessionError::Connect {
            addr: "127.0.0.1:1".into(),
            source: io::Error::from(io::ErrorKind::ConnectionRefused),
        };
        assert_eq!(refused.kind(), ErrorKind::Connection);
        assert_eq!(SessionError::SendOnClosed.kind(), ErrorKind::Send);
        assert_eq!(SessionError::PeerClosed.kind(), ErrorKind::Receive);
    }

    #[test]
    fn messages_name_the_endpoint() {
        let err = SessionError::ConnectTimeout {
            addr: "example:50000".into(),
            after_ms: 250,
        };
        assert_eq!(
            err.to_string(),
            "connecting to example:50000 timed out after 250 ms"
        );
    }
}
