//! Session state machine.
//!
//! `SessionState` is owned by the receive task; every change it makes is
//! reported as a batch of [`SessionEvent`]s for the UI loop to apply.

use arrayvec::ArrayVec;

use crate::types::{Command, SessionStatus, GAME_START_SENTINEL};

/// Notification posted from the receive task to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StatusText(String),
    InputEnabled(bool),
    /// The connection is gone. Always the last event of a session.
    Closed { reason: String },
}

/// Events produced by a single transition.
pub type Notifications = ArrayVec<SessionEvent, 2>;

#[derive(Debug, Clone)]
pub struct SessionState {
    status: SessionStatus,
    lock_flag: bool,
    last_status: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Connecting,
            lock_flag: false,
            last_status: String::new(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn lock_flag(&self) -> bool {
        self.lock_flag
    }

    pub fn last_status(&self) -> &str {
        &self.last_status
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// `Connecting -> Connected`. Returns false if the state had already moved on.
    pub fn mark_connected(&mut self) -> bool {
        if self.status != SessionStatus::Connecting {
            return false;
        }
        self.status = SessionStatus::Connected;
        true
    }

    /// Apply one decoded inbound command.
    ///
    /// Once closed, commands are ignored and produce no notifications.
    pub fn apply(&mut self, command: Command) -> Notifications {
        let mut out = Notifications::new();
        if self.is_closed() {
            return out;
        }

        match command {
            Command::GameStart => {
                self.lock_flag = true;
                self.status = SessionStatus::Locked;
                self.last_status.clear();
                self.last_status.push_str(GAME_START_SENTINEL);
                out.push(SessionEvent::StatusText(GAME_START_SENTINEL.to_string()));
                out.push(SessionEvent::InputEnabled(false));
            }
            Command::StatusText(text) => {
                self.lock_flag = false;
                self.status = SessionStatus::Unlocked;
                self.last_status.clone_from(&text);
                out.push(SessionEvent::StatusText(text));
                out.push(SessionEvent::InputEnabled(true));
            }
        }
        out
    }

    /// Move to `Closed` from any state. The lock is forced on for good.
    ///
    /// Idempotent: only the first call yields notifications.
    pub fn close(&mut self, reason: impl Into<String>) -> Notifications {
        let mut out = Notifications::new();
        if self.is_closed() {
            return out;
        }
        self.status = SessionStatus::Closed;
        self.lock_flag = true;
        out.push(SessionEvent::InputEnabled(false));
        out.push(SessionEvent::Closed {
            reason: reason.into(),
        });
        out
    }
}
