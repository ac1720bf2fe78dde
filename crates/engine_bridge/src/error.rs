//! Error types for the engine bridge.

use thiserror::Error;

/// Why a move request produced no playable move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine could not be reached: spawn failure, closed pipe, early
    /// exit or a timeout. Retrying may help.
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// The engine answered with text that is not a legal move in the position
    /// it was given. The reply is never applied.
    #[error("engine replied {reply:?}, which is not a legal move in {position_fen}")]
    ContractViolation { position_fen: String, reply: String },

    /// The engine reported that it has no move (`bestmove (none)` or `0000`).
    #[error("engine reported no move")]
    NoMove,
}

impl EngineError {
    pub(crate) fn io(context: &str, err: std::io::Error) -> Self {
        EngineError::Unavailable(format!("{context}: {err}"))
    }
}
