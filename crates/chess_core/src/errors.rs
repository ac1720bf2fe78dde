//! Error types for the rules engine.

use thiserror::Error;

use crate::types::{Color, Move};

/// A move was handed to [`Position::apply_move`](crate::Position::apply_move)
/// that is not in the legal set of that position.
///
/// The game session only ever applies generator-approved moves, so seeing this
/// outside of tests means a caller skipped validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move {mv} in position {fen}")]
pub struct IllegalMoveError {
    pub mv: Move,
    pub fen: String,
}

/// Errors produced while parsing Forsyth-Edwards Notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in board field, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: u8 },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("invalid side to move '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling field '{0}'")]
    InvalidCastling(String),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),

    #[error("each side needs exactly one king")]
    KingCount,

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}
