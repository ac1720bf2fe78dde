//! Playing strength levels and the engine settings behind them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty offered to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Easy, Strength::Medium, Strength::Hard];

    /// Approximate rating the level aims for.
    pub fn target_elo(self) -> u32 {
        match self {
            Strength::Easy => 400,
            Strength::Medium => 1200,
            Strength::Hard => 2000,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strength::Easy => "easy",
            Strength::Medium => "medium",
            Strength::Hard => "hard",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Strength::Easy),
            "medium" => Ok(Strength::Medium),
            "hard" => Ok(Strength::Hard),
            _ => Err(format!("unknown strength '{s}' (expected easy, medium or hard)")),
        }
    }
}

/// How a level is realised on a UCI engine: options to set and how long to
/// search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthProfile {
    pub elo: u32,
    /// Sent as `setoption name <key> value <value>` before searching.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    #[serde(default)]
    pub depth: Option<u32>,
    #[serde(default)]
    pub movetime_ms: Option<u64>,
}

impl StrengthProfile {
    pub fn builtin(strength: Strength) -> Self {
        let (skill, depth, movetime_ms) = match strength {
            Strength::Easy => (0, 1, 100),
            Strength::Medium => (5, 6, 300),
            Strength::Hard => (15, 14, 1000),
        };
        let elo = strength.target_elo();
        let options = BTreeMap::from([
            ("Skill Level".to_string(), skill.to_string()),
            ("UCI_LimitStrength".to_string(), "true".to_string()),
            ("UCI_Elo".to_string(), elo.to_string()),
        ]);
        StrengthProfile {
            elo,
            options,
            depth: Some(depth),
            movetime_ms: Some(movetime_ms),
        }
    }
}

/// Profiles for all three levels. Levels missing from a config file keep
/// their built-in profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthTable {
    pub easy: StrengthProfile,
    pub medium: StrengthProfile,
    pub hard: StrengthProfile,
}

impl Default for StrengthTable {
    fn default() -> Self {
        StrengthTable {
            easy: StrengthProfile::builtin(Strength::Easy),
            medium: StrengthProfile::builtin(Strength::Medium),
            hard: StrengthProfile::builtin(Strength::Hard),
        }
    }
}

impl StrengthTable {
    pub fn profile(&self, strength: Strength) -> &StrengthProfile {
        match strength {
            Strength::Easy => &self.easy,
            Strength::Medium => &self.medium,
            Strength::Hard => &self.hard,
        }
    }
}

#[cfg(test)]
#[path = "strength_tests.rs"]
mod strength_tests;
