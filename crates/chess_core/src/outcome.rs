//! Game termination.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::Color;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    DrawByRepetition,
    DrawByFiftyMove,
    DrawByInsufficientMaterial,
    Resignation { winner: Color },
    /// The session was ended because the move source could not continue.
    Aborted { reason: String },
}

impl GameOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    pub fn winner(&self) -> Option<Color> {
        match self {
            GameOutcome::Checkmate { winner } | GameOutcome::Resignation { winner } => {
                Some(*winner)
            }
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameOutcome::Stalemate
                | GameOutcome::DrawByRepetition
                | GameOutcome::DrawByFiftyMove
                | GameOutcome::DrawByInsufficientMaterial
        )
    }

    /// PGN-style result tag: `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub fn result_tag(&self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None if self.is_draw() => "1/2-1/2",
            None => "*",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "in progress"),
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => write!(f, "draw by stalemate"),
            GameOutcome::DrawByRepetition => write!(f, "draw by threefold repetition"),
            GameOutcome::DrawByFiftyMove => write!(f, "draw by the fifty-move rule"),
            GameOutcome::DrawByInsufficientMaterial => write!(f, "draw by insufficient material"),
            GameOutcome::Resignation { winner } => {
                write!(f, "{} resigned, {winner} wins", winner.other())
            }
            GameOutcome::Aborted { reason } => write!(f, "aborted: {reason}"),
        }
    }
}

/// Decide whether the game is over after a move has produced `pos`.
///
/// `occurrences` is how many times `pos` (by [`Position::repetition_key`]) has
/// been reached in the game so far, including this time. Checks run in a fixed
/// order: checkmate, stalemate, fifty-move rule, repetition, material.
pub fn adjudicate(pos: &Position, occurrences: usize) -> GameOutcome {
    if legal_moves(pos).is_empty() {
        return if pos.in_check(pos.side_to_move) {
            GameOutcome::Checkmate {
                winner: pos.side_to_move.other(),
            }
        } else {
            GameOutcome::Stalemate
        };
    }
    if pos.is_fifty_move_draw() {
        return GameOutcome::DrawByFiftyMove;
    }
    if occurrences >= 3 {
        return GameOutcome::DrawByRepetition;
    }
    if pos.is_insufficient_material() {
        return GameOutcome::DrawByInsufficientMaterial;
    }
    GameOutcome::InProgress
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod outcome_tests;
