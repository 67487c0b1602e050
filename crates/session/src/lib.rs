//! Session module - the network half of the game management client
//!
//! Keeps one TCP connection to the game-control server, turns server text
//! into lock/unlock notifications for the form, and writes player entries.
//!
//! # Protocol Overview
//!
//! 1. **Connection**: one attempt to `GAMEMNG_HOST:GAMEMNG_PORT`
//!    (default `192.168.10.64:50000`); failure is fatal
//! 2. **Inbound**: plain UTF-8 text; each read of up to 1024 bytes is one message
//! 3. **Lock**: the exact text `esp_gamestart` locks player entry; anything
//!    else unlocks it and is shown as status
//! 4. **Outbound**: one JSON object per entry, fields `startFlag`, `name`,
//!    `team` (1-3) and `difficulty` (1-4)
//!
//! # Framing
//!
//! The default `raw` framing has no message boundaries, so a read can hold a
//! partial message or several messages. `GAMEMNG_FRAMING=line` switches both
//! directions to newline-delimited messages; the server must agree.
//!
//! # Example Flow
//!
//! ```text
//! Server -> Client: Waiting for players
//! Client -> Server: {"startFlag":true,"name":"Alice","team":2,"difficulty":3}
//! Server -> Client: esp_gamestart
//! Server -> Client: Game over
//! ```
//!
//! # Implementation
//!
//! - [`connection`]: connect, split into read/write halves sharing a link status
//! - [`codec`]: decode/encode and the optional line framer
//! - [`receive_loop`]: background task feeding [`core::SessionState`]
//! - [`submitter`]: label mapping and entry writes
//! - [`runtime`]: [`Session`], the handle the UI loop owns
//!
//! # Testing
//!
//! A throwaway server is enough for manual testing:
//!
//! ```bash
//! nc -l 50000
//! GAMEMNG_HOST=127.0.0.1 cargo run
//! ```

pub mod codec;
pub mod config;
pub mod connection;
pub mod error;
pub mod receive_loop;
pub mod runtime;
pub mod submitter;

pub use gamemng_core as core;
pub use gamemng_types as types;

pub use codec::{decode, encode, encode_frame, Framer};
pub use config::{ClientConfig, Framing};
pub use connection::{Connection, ConnectionManager, Inbound, LinkStatus, Outbound};
pub use error::{ErrorKind, SessionError};
pub use receive_loop::run_receive_loop;
pub use runtime::{PumpOutcome, Session, MAX_EVENTS_PER_PUMP};
pub use submitter::{build_record, PlayerEntrySubmitter};
