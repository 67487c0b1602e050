//! Core session logic - pure, deterministic, and testable
//!
//! Everything here is free of I/O and threads:
//!
//! - [`state`]: the session state machine (`Connecting -> Connected ->
//!   Locked/Unlocked -> Closed`) and the [`SessionEvent`] notifications it emits
//! - [`ui`]: the [`UiAdapter`] callback seam and the event-to-callback mapping
//! - [`form`]: the player-entry form model driven by the terminal front end
//!
//! # Example
//!
//! ```
//! use gamemng_core::{apply_event, EntryForm, SessionState};
//! use gamemng_types::Command;
//!
//! let mut state = SessionState::new();
//! state.mark_connected();
//!
//! let mut form = EntryForm::new();
//! for event in state.apply(Command::GameStart) {
//!     apply_event(&mut form, event);
//! }
//! assert!(state.lock_flag());
//! assert!(!form.input_enabled());
//! ```

pub mod form;
pub mod state;
pub mod ui;

pub use gamemng_types as types;

pub use form::{EntryForm, EntrySubmission, FormField, FormOutcome, MAX_NAME_CHARS};
pub use state::{Notifications, SessionEvent, SessionState};
pub use ui::{apply_event, UiAdapter};
