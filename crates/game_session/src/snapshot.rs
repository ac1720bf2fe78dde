//! JSON-friendly record of a game, enough to resume it later.

use chess_core::{parse_uci_move, to_san, Color, FenError, GameOutcome, Position};
use engine_bridge::Strength;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::history::{History, HistoryEntry};
use crate::session::{Effect, GameSetup, Session};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub start_fen: String,
    /// Position after the last move; informational, the moves are
    /// authoritative on restore.
    pub fen: String,
    pub human_color: Color,
    pub strength: Strength,
    pub moves_uci: Vec<String>,
    pub moves_san: Vec<String>,
    pub outcome: GameOutcome,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("bad start position: {0}")]
    Fen(#[from] FenError),

    #[error("move {ply} ({text}) is not legal in the replayed game")]
    IllegalMove { ply: usize, text: String },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl Session {
    pub fn snapshot(&self) -> SessionSnapshot {
        let history = self.history();
        SessionSnapshot {
            start_fen: history.start().to_fen(),
            fen: self.position().to_fen(),
            human_color: self.human_color(),
            strength: self.strength(),
            moves_uci: history.uci_moves(),
            moves_san: history.san_moves(),
            outcome: self.outcome(),
        }
    }

    /// Replay a snapshot's moves from its start position. Returns the effects
    /// of resuming, which hold a move request if the engine is to move.
    pub fn from_snapshot(
        config: &SessionConfig,
        snapshot: &SessionSnapshot,
    ) -> Result<(Session, Vec<Effect>), SnapshotError> {
        let start = Position::from_fen(&snapshot.start_fen)?;
        let mut history = History::new(start.clone());
        let mut position = start.clone();
        for (ply, text) in snapshot.moves_uci.iter().enumerate() {
            let illegal = || SnapshotError::IllegalMove {
                ply,
                text: text.clone(),
            };
            let mv = parse_uci_move(&position, text).ok_or_else(illegal)?;
            let after = position.apply_move(mv).map_err(|_| illegal())?;
            let san = to_san(&position, mv);
            let before = std::mem::replace(&mut position, after.clone());
            history.push(HistoryEntry {
                before,
                mv,
                san,
                after,
            });
        }

        let setup = GameSetup {
            human_color: snapshot.human_color,
            strength: snapshot.strength,
            start,
        };
        Ok(Session::resume(config, setup, history, snapshot.outcome.clone()))
    }
}

impl SessionSnapshot {
    pub fn to_json(&self) -> String {
        // Only strings, enums and lists; serialisation cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(text: &str) -> Result<SessionSnapshot, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
