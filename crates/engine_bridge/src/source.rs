//! The seam between the bridge and whatever produces moves.

use async_trait::async_trait;
use chess_core::{legal_moves, Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::EngineError;
use crate::strength::StrengthProfile;

/// Something that can be asked for a move in a position.
///
/// Implementations return the raw UCI text of their choice; the bridge is
/// responsible for checking it against the rules.
#[async_trait]
pub trait MoveSource: Send {
    fn name(&self) -> &str;

    async fn best_move(
        &mut self,
        position: &Position,
        profile: &StrengthProfile,
    ) -> Result<String, EngineError>;

    /// Called after an in-flight `best_move` future was dropped.
    async fn stop(&mut self) {}

    async fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    async fn shutdown(&mut self) {}
}

/// Plays a uniformly random legal move. Ignores the strength profile.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: StdRng,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMover {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence, for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self, position: &Position) -> Option<Move> {
        legal_moves(position).choose(&mut self.rng).copied()
    }
}

#[async_trait]
impl MoveSource for RandomMover {
    fn name(&self) -> &str {
        "random"
    }

    async fn best_move(
        &mut self,
        position: &Position,
        _profile: &StrengthProfile,
    ) -> Result<String, EngineError> {
        Ok(self
            .pick(position)
            .map(|mv| mv.to_string())
            .unwrap_or_else(|| "(none)".to_string()))
    }
}
