//! UCI wire format: commands sent to the engine and the lines it answers with.
//!
//! Every command renders to a single line without the trailing newline; the
//! transport appends `\n`.

use crate::strength::StrengthProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    SetOption { name: String, value: String },
    /// Position given as FEN, optionally followed by moves.
    Position { fen: String, moves: Vec<String> },
    Go(GoLimit),
    Stop,
    Quit,
}

/// Search bound for a `go` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoLimit {
    Depth(u32),
    MoveTime(u64),
    DepthAndMoveTime { depth: u32, movetime_ms: u64 },
}

impl GoLimit {
    /// Limit derived from a profile. A profile with neither bound searches
    /// depth 1.
    pub fn from_profile(profile: &StrengthProfile) -> Self {
        match (profile.depth, profile.movetime_ms) {
            (Some(depth), Some(movetime_ms)) => GoLimit::DepthAndMoveTime { depth, movetime_ms },
            (Some(depth), None) => GoLimit::Depth(depth),
            (None, Some(ms)) => GoLimit::MoveTime(ms),
            (None, None) => GoLimit::Depth(1),
        }
    }

    pub fn movetime_ms(self) -> Option<u64> {
        match self {
            GoLimit::Depth(_) => None,
            GoLimit::MoveTime(ms) | GoLimit::DepthAndMoveTime { movetime_ms: ms, .. } => Some(ms),
        }
    }
}

impl UciCommand {
    pub fn to_uci_string(&self) -> String {
        match self {
            UciCommand::Uci => "uci".to_string(),
            UciCommand::IsReady => "isready".to_string(),
            UciCommand::UciNewGame => "ucinewgame".to_string(),
            UciCommand::SetOption { name, value } => {
                format!("setoption name {} value {}", name, value)
            }
            UciCommand::Position { fen, moves } => {
                let mut cmd = format!("position fen {fen}");
                if !moves.is_empty() {
                    cmd.push_str(" moves ");
                    cmd.push_str(&moves.join(" "));
                }
                cmd
            }
            UciCommand::Go(GoLimit::Depth(d)) => format!("go depth {}", d),
            UciCommand::Go(GoLimit::MoveTime(ms)) => format!("go movetime {}", ms),
            UciCommand::Go(GoLimit::DepthAndMoveTime { depth, movetime_ms }) => {
                format!("go depth {} movetime {}", depth, movetime_ms)
            }
            UciCommand::Stop => "stop".to_string(),
            UciCommand::Quit => "quit".to_string(),
        }
    }
}

/// Engine output line, categorised by its leading token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciOutputKind {
    UciOk,
    ReadyOk,
    Info(String),
    /// The move text of `bestmove <move> [ponder <move>]`.
    BestMove(String),
    Id(String),
    Option(String),
    Other(String),
}

impl UciOutputKind {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line == "uciok" {
            UciOutputKind::UciOk
        } else if line == "readyok" {
            UciOutputKind::ReadyOk
        } else if let Some(rest) = line.strip_prefix("info ") {
            UciOutputKind::Info(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("bestmove") {
            let mv = rest.split_whitespace().next().unwrap_or("");
            UciOutputKind::BestMove(mv.to_string())
        } else if let Some(rest) = line.strip_prefix("id ") {
            UciOutputKind::Id(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("option ") {
            UciOutputKind::Option(rest.to_string())
        } else {
            UciOutputKind::Other(line.to_string())
        }
    }
}

/// Whether a `bestmove` payload means "no move available".
pub fn is_null_move(text: &str) -> bool {
    matches!(text, "" | "(none)" | "0000")
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
