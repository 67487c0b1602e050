//! Player entry submitter.

use tokio::io::AsyncWrite;
use tracing::{info, warn};

use crate::codec::encode_frame;
use crate::config::Framing;
use crate::connection::Outbound;
use crate::error::SessionError;
use crate::types::{Difficulty, PlayerRecord, Team};

/// Map UI labels to a record. Unknown labels leave the field unset.
pub fn build_record(name: &str, team_label: &str, difficulty_label: &str) -> PlayerRecord {
    PlayerRecord::new(
        name,
        Team::from_label(team_label),
        Difficulty::from_label(difficulty_label),
    )
}

pub struct PlayerEntrySubmitter<W> {
    outbound: Outbound<W>,
    framing: Framing,
}

impl<W: AsyncWrite + Unpin> PlayerEntrySubmitter<W> {
    pub fn new(outbound: Outbound<W>, framing: Framing) -> Self {
        Self { outbound, framing }
    }

    /// Build, encode and write one entry. No acknowledgement is awaited.
    ///
    /// The session lock is not checked here; gating submission is the UI's job.
    pub async fn submit(
        &mut self,
        name: &str,
        team_label: &str,
        difficulty_label: &str,
    ) -> Result<PlayerRecord, SessionError> {
        let record = build_record(name, team_label, difficulty_label);
        if record.team.is_none() || record.difficulty.is_none() {
            warn!(team_label, difficulty_label, "unrecognized selection left unset");
        }

        let bytes = encode_frame(&record, self.framing)?;
        match self.outbound.send(&bytes).await {
            Ok(()) => {
                info!(
                    name = %record.name,
                    team = ?record.team,
                    difficulty = ?record.difficulty,
                    "player entry sent"
                );
                Ok(record)
            }
            Err(e) => {
                warn!(error = %e, "player entry not sent");
                Err(e)
            }
        }
    }
}
