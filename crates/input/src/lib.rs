//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::FormAction`]. Independent
//! of rendering so the mapping can be tested without a terminal.

pub mod map;

pub use gamemng_types as types;

pub use map::{handle_key_event, should_quit};
