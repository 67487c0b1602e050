//! Core types module - shared data structures and constants
//!
//! Pure data types used by every other crate in the workspace: the session
//! state machine, the wire codec, and the terminal form. No external
//! dependencies, so the types can be reused in any context.
//!
//! # Wire constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GAME_START_SENTINEL` | `"esp_gamestart"` | Server command that locks player entry |
//! | `RECV_CHUNK_BYTES` | 1024 | Maximum bytes per receive call |
//! | `DEFAULT_HOST` | `192.168.10.64` | Game-control server address |
//! | `DEFAULT_PORT` | 50000 | Game-control server port |
//!
//! # Examples
//!
//! ```
//! use gamemng_types::{Difficulty, PlayerRecord, Team};
//!
//! let team = Team::from_label("Green").unwrap();
//! assert_eq!(team.code(), 2);
//!
//! let record = PlayerRecord::new("Alice", Some(team), Difficulty::from_label("Hard"));
//! assert!(record.start_flag);
//! assert_eq!(record.difficulty.map(Difficulty::code), Some(3));
//!
//! // Labels are matched exactly.
//! assert_eq!(Team::from_label("red"), None);
//! ```

/// Literal sent by the server when a game round starts.
pub const GAME_START_SENTINEL: &str = "esp_gamestart";

/// Maximum number of bytes requested per receive call.
pub const RECV_CHUNK_BYTES: usize = 1024;

/// Default game-control server host.
pub const DEFAULT_HOST: &str = "192.168.10.64";

/// Default game-control server port.
pub const DEFAULT_PORT: u16 = 50000;

/// Status line text shown before the server has said anything.
pub const INITIAL_STATUS_TEXT: &str = "Status...";

/// Team labels in display order.
pub const TEAM_LABELS: [&str; 3] = ["Red", "Green", "Blue"];

/// Difficulty labels in display order.
pub const DIFFICULTY_LABELS: [&str; 4] = ["Easy", "Normal", "Hard", "Lunatic"];

/// Player team. Encoded on the wire as 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    Red,
    Green,
    Blue,
}

impl Team {
    /// Exact-match lookup of a UI label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Red" => Some(Team::Red),
            "Green" => Some(Team::Green),
            "Blue" => Some(Team::Blue),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::Red => "Red",
            Team::Green => "Green",
            Team::Blue => "Blue",
        }
    }

    /// Wire code.
    pub fn code(self) -> u8 {
        match self {
            Team::Red => 1,
            Team::Green => 2,
            Team::Blue => 3,
        }
    }
}

/// Game difficulty. Encoded on the wire as 1..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Lunatic,
}

impl Difficulty {
    /// Exact-match lookup of a UI label. Unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Easy" => Some(Difficulty::Easy),
            "Normal" => Some(Difficulty::Normal),
            "Hard" => Some(Difficulty::Hard),
            "Lunatic" => Some(Difficulty::Lunatic),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Lunatic => "Lunatic",
        }
    }

    /// Wire code.
    pub fn code(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Normal => 2,
            Difficulty::Hard => 3,
            Difficulty::Lunatic => 4,
        }
    }
}

/// Registration data sent to the server on each entry.
///
/// `team` and `difficulty` are `None` when the UI handed over a label that
/// matches no known value; such fields are left out of the encoded object
/// rather than replaced by a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRecord {
    pub name: String,
    pub team: Option<Team>,
    pub difficulty: Option<Difficulty>,
    pub start_flag: bool,
}

impl PlayerRecord {
    /// Build a record for submission. `start_flag` is always set.
    pub fn new(name: impl Into<String>, team: Option<Team>, difficulty: Option<Difficulty>) -> Self {
        Self {
            name: name.into(),
            team,
            difficulty,
            start_flag: true,
        }
    }
}

/// Decoded inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The server started a round; player entry must be locked.
    GameStart,
    /// Any other text, shown verbatim.
    StatusText(String),
}

/// Session-level state.
///
/// `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Connecting,
    Connected,
    Locked,
    Unlocked,
    Closed,
}

impl SessionStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, SessionStatus::Closed)
    }
}

/// Form-level user intents produced by the key map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormAction {
    NextField,
    PrevField,
    /// Cycle the focused selection backwards.
    SelectPrev,
    /// Cycle the focused selection forwards.
    SelectNext,
    Input(char),
    Backspace,
    Submit,
    Quit,
}
