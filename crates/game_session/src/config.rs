//! Session settings and the combined TOML config file.

use std::path::{Path, PathBuf};

use chess_core::{Color, PieceKind};
use engine_bridge::{EngineConfig, Strength};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("promotion piece must be a queen, rook, bishop or knight, not {0:?}")]
    Promotion(PieceKind),
}

/// What to do when the engine answers with something unplayable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationPolicy {
    /// End the game as aborted.
    #[default]
    EndSession,
    /// Play a random legal move in its place and carry on.
    RandomMove,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    /// Automatic re-requests after the engine was unreachable.
    pub retry_unavailable: u32,
    pub on_violation: ViolationPolicy,
}

impl Default for EnginePolicy {
    fn default() -> Self {
        EnginePolicy {
            retry_unavailable: 1,
            on_violation: ViolationPolicy::EndSession,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub human_color: Color,
    pub strength: Strength,
    /// Piece a pawn becomes when the human promotes.
    pub promotion: PieceKind,
    pub engine_policy: EnginePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            human_color: Color::White,
            strength: Strength::Medium,
            promotion: PieceKind::Queen,
            engine_policy: EnginePolicy::default(),
        }
    }
}

/// Everything a host reads from its config file.
///
/// ```toml
/// [engine]
/// path = "/usr/bin/stockfish"
///
/// [engine.strengths.hard]
/// elo = 2000
/// movetime_ms = 1500
///
/// [session]
/// human_color = "Black"
/// strength = "hard"
///
/// [session.engine_policy]
/// on_violation = "random_move"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub engine: EngineConfig,
    pub session: SessionConfig,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<GameConfig, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        GameConfig::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<GameConfig, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        if !PieceKind::PROMOTIONS.contains(&config.session.promotion) {
            return Err(ConfigError::Promotion(config.session.promotion));
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
