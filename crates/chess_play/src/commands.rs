//! Parsing of the lines typed at the prompt.

use std::path::PathBuf;

use chess_core::{Color, PieceKind, Square};
use engine_bridge::Strength;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Board,
    Moves,
    /// Press on a square (`None` off the board).
    Pick(Option<Square>),
    Drop(Option<Square>),
    Click(Option<Square>),
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    },
    Promote(PieceKind),
    Resign,
    New {
        color: Option<Color>,
        strength: Option<Strength>,
    },
    Undo,
    Retry,
    /// Step through earlier positions of the game.
    Prev,
    Next,
    Latest,
    Save(PathBuf),
    Quit,
}

pub const HELP: &str = "\
commands:
  e2e4 | move e7e8q     play a move (optional promotion letter)
  click <sq>            click a square; a second click on a target moves
  pick <sq> / drop <sq> press and release, as when dragging (`off` = off board)
  promote <q|r|b|n>     piece for your future promotions
  undo                  take back your last move
  retry                 ask the engine again after it failed
  prev / next / latest  step through earlier positions (no moves until latest)
  resign
  new [white|black] [easy|medium|hard]
  moves                 move list
  save <file>           write the game as JSON
  board | help | quit";

pub fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Ok(Command::Board);
    };
    let cmd = match (head.to_ascii_lowercase().as_str(), rest) {
        ("help" | "?", []) => Command::Help,
        ("board" | "b", []) => Command::Board,
        ("moves", []) => Command::Moves,
        ("pick", [sq]) => Command::Pick(target(sq)?),
        ("drop", [sq]) => Command::Drop(target(sq)?),
        ("click", [sq]) => Command::Click(target(sq)?),
        ("move" | "m", [mv]) => parse_move(mv)?,
        ("promote", [kind]) => Command::Promote(promotion(kind)?),
        ("resign", []) => Command::Resign,
        ("new", args) => parse_new(args)?,
        ("undo", []) => Command::Undo,
        ("retry", []) => Command::Retry,
        ("prev", []) => Command::Prev,
        ("next", []) => Command::Next,
        ("latest", []) => Command::Latest,
        ("save", [path]) => Command::Save(PathBuf::from(*path)),
        ("quit" | "exit" | "q", []) => Command::Quit,
        (_, []) => parse_move(head)
            .map_err(|_| format!("unknown command `{head}`, type `help`"))?,
        _ => return Err(format!("cannot read `{}`, type `help`", line.trim())),
    };
    Ok(cmd)
}

fn square(text: &str) -> Result<Square, String> {
    text.to_ascii_lowercase().parse()
}

/// A square, or `off` for a point outside the board.
fn target(text: &str) -> Result<Option<Square>, String> {
    match text {
        "off" | "-" => Ok(None),
        _ => square(text).map(Some),
    }
}

fn promotion(text: &str) -> Result<PieceKind, String> {
    let mut chars = text.chars();
    match (chars.next().and_then(PieceKind::from_char), chars.next()) {
        (Some(kind), None) if PieceKind::PROMOTIONS.contains(&kind) => Ok(kind),
        _ => Err(format!("`{text}` is not a promotion piece")),
    }
}

fn parse_move(text: &str) -> Result<Command, String> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(format!("`{text}` is not a move like e2e4"));
    }
    Ok(Command::Move {
        from: square(&text[0..2])?,
        to: square(&text[2..4])?,
        promotion: match text.get(4..) {
            Some(p) if !p.is_empty() => Some(promotion(p)?),
            _ => None,
        },
    })
}

fn parse_new(args: &[&str]) -> Result<Command, String> {
    let mut color = None;
    let mut strength = None;
    for arg in args {
        match arg.to_ascii_lowercase().as_str() {
            "white" | "w" => color = Some(Color::White),
            "black" | "b" => color = Some(Color::Black),
            other => strength = Some(other.parse::<Strength>()?),
        }
    }
    Ok(Command::New { color, strength })
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
