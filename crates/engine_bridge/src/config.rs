use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::GoLimit;
use crate::strength::StrengthTable;

/// How to launch and talk to an external UCI engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Executable to spawn; looked up on `PATH` when not absolute.
    pub path: PathBuf,
    pub args: Vec<String>,
    /// Limit for `uciok` and every `readyok`.
    pub handshake_timeout_ms: u64,
    /// Grace period allowed on top of the profile's `movetime` before the
    /// engine is considered hung.
    pub move_timeout_ms: u64,
    pub strengths: StrengthTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            path: PathBuf::from("stockfish"),
            args: Vec::new(),
            handshake_timeout_ms: 5_000,
            move_timeout_ms: 10_000,
            strengths: StrengthTable::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        EngineConfig {
            path: path.into(),
            ..EngineConfig::default()
        }
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    pub fn move_timeout(&self, limit: GoLimit) -> Duration {
        Duration::from_millis(self.move_timeout_ms + limit.movetime_ms().unwrap_or(0))
    }
}
