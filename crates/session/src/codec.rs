//! Protocol codec - wire bytes to commands and player records to JSON.
//!
//! Inbound text is compared as a whole against the game-start sentinel;
//! outbound records are one JSON object each:
//!
//! ```text
//! Server -> Client: ready
//! Server -> Client: esp_gamestart
//! Client -> Server: {"startFlag":true,"name":"Alice","team":2,"difficulty":3}
//! ```

use std::io;

use serde::Serialize;

use crate::config::Framing;
use crate::error::SessionError;
use crate::types::{Command, PlayerRecord, GAME_START_SENTINEL};

/// Upper bound on buffered bytes while waiting for a newline.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Decode one inbound unit.
///
/// The whole buffer must be valid UTF-8; the sentinel must match exactly
/// (no trimming, no case folding).
pub fn decode(bytes: &[u8]) -> Result<Command, SessionError> {
    let text = std::str::from_utf8(bytes)?;
    if text == GAME_START_SENTINEL {
        Ok(Command::GameStart)
    } else {
        Ok(Command::StatusText(text.to_string()))
    }
}

#[derive(Serialize)]
struct PlayerEntryWire<'a> {
    #[serde(rename = "startFlag")]
    start_flag: bool,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<u8>,
}

impl<'a> From<&'a PlayerRecord> for PlayerEntryWire<'a> {
    fn from(record: &'a PlayerRecord) -> Self {
        Self {
            start_flag: record.start_flag,
            name: &record.name,
            team: record.team.map(|t| t.code()),
            difficulty: record.difficulty.map(|d| d.code()),
        }
    }
}

/// Encode a record as a UTF-8 JSON object.
///
/// Non-ASCII names are written as-is. Unset team/difficulty are omitted.
pub fn encode(record: &PlayerRecord) -> Result<Vec<u8>, SessionError> {
    Ok(serde_json::to_vec(&PlayerEntryWire::from(record))?)
}

/// Encode a record ready for a single write under the given framing.
pub fn encode_frame(record: &PlayerRecord, framing: Framing) -> Result<Vec<u8>, SessionError> {
    let mut buf = encode(record)?;
    if framing == Framing::Line {
        buf.push(b'\n');
    }
    Ok(buf)
}

/// Cuts received chunks into decode units.
#[derive(Debug)]
pub enum Framer {
    Raw,
    Line { pending: Vec<u8> },
}

impl Framer {
    pub fn new(framing: Framing) -> Self {
        match framing {
            Framing::Raw => Framer::Raw,
            Framing::Line => Framer::Line {
                pending: Vec::with_capacity(1024),
            },
        }
    }

    /// Feed one received chunk, calling `f` for every complete unit.
    ///
    /// Stops at the first error returned by `f`.
    pub fn push(
        &mut self,
        chunk: &[u8],
        mut f: impl FnMut(&[u8]) -> Result<(), SessionError>,
    ) -> Result<(), SessionError> {
        match self {
            Framer::Raw => f(chunk),
            Framer::Line { pending } => {
                pending.extend_from_slice(chunk);
                while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = pending.drain(..=pos).collect();
                    let mut end = line.len() - 1;
                    if end > 0 && line[end - 1] == b'\r' {
                        end -= 1;
                    }
                    if end == 0 {
                        continue;
                    }
                    f(&line[..end])?;
                }
                if pending.len() > MAX_LINE_BYTES {
                    return Err(SessionError::Receive(io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("no line break within {} bytes", MAX_LINE_BYTES),
                    )));
                }
                Ok(())
            }
        }
    }
}
