use chess_core::{parse_uci_move, Move, Position};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::protocol::is_null_move;
use crate::source::MoveSource;
use crate::strength::{Strength, StrengthTable};

/// A move source plus the strength profiles to drive it with. Every reply is
/// checked against the legal moves of the position before it is returned.
pub struct EngineBridge {
    source: Box<dyn MoveSource>,
    strengths: StrengthTable,
}

impl EngineBridge {
    pub fn new(source: Box<dyn MoveSource>, strengths: StrengthTable) -> Self {
        EngineBridge { source, strengths }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn strengths(&self) -> &StrengthTable {
        &self.strengths
    }

    pub async fn request_move(
        &mut self,
        position: &Position,
        strength: Strength,
    ) -> Result<Move, EngineError> {
        let profile = self.strengths.profile(strength);
        debug!(source = self.source.name(), %strength, fen = %position.to_fen(), "requesting move");
        let reply = self.source.best_move(position, profile).await?;
        let result = validate_reply(position, &reply);
        if let Err(err) = &result {
            warn!(source = self.source.name(), %err, "rejected engine reply");
        }
        result
    }

    pub async fn stop(&mut self) {
        self.source.stop().await;
    }

    pub async fn new_game(&mut self) -> Result<(), EngineError> {
        self.source.new_game().await
    }

    pub async fn shutdown(&mut self) {
        self.source.shutdown().await;
    }
}

/// Resolve raw engine text against the legal moves of `position`.
pub fn validate_reply(position: &Position, reply: &str) -> Result<Move, EngineError> {
    let reply = reply.trim();
    if is_null_move(reply) {
        return Err(EngineError::NoMove);
    }
    parse_uci_move(position, reply).ok_or_else(|| EngineError::ContractViolation {
        position_fen: position.to_fen(),
        reply: reply.to_string(),
    })
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod bridge_tests;
