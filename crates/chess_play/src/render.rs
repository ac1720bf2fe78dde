//! Text drawing of the board and the game status.

use std::fmt::Write;

use chess_core::{Color, Position, Square};
use game_session::{highlights, EngineStatus, Session, SessionState};

/// The board from the human's side. `[N]` is the selected piece, `*` an empty
/// target square, `(p)` a capture target and `<K>` a king in check.
///
/// While browsing the history this is the position being looked at.
pub fn board(session: &Session) -> String {
    let marks = highlights(session);
    let position = session.viewed_position();
    let flipped = session.human_color() == Color::Black;
    let ranks: Vec<u8> = if flipped {
        (0..8).collect()
    } else {
        (0..8).rev().collect()
    };
    let files: Vec<u8> = if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut out = String::new();
    for &rank in &ranks {
        let _ = write!(out, "{} ", rank + 1);
        for &file in &files {
            let Some(sq) = Square::new(file as i8, rank as i8) else {
                continue;
            };
            let piece = position.piece_at(sq).map(|p| p.to_char());
            let cell = match piece {
                Some(c) if marks.selected == Some(sq) => format!("[{c}]"),
                Some(c) if marks.checked_king == Some(sq) => format!("<{c}>"),
                Some(c) if marks.is_destination(sq) => format!("({c})"),
                Some(c) => format!(" {c} "),
                None if marks.is_destination(sq) => " * ".to_string(),
                None => " . ".to_string(),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out.push_str("  ");
    for &file in &files {
        let _ = write!(out, " {} ", (b'a' + file) as char);
    }
    out.push('\n');
    out
}

pub fn status(session: &Session) -> String {
    let mut line = play_status(session);
    let _ = write!(line, " | {}", material(session.viewed_position()));
    if !session.is_viewing_latest() {
        line = format!(
            "viewing ply {} of {} (`next`, `latest`) | {line}",
            session.view_ply(),
            session.history().len()
        );
    }
    line
}

/// Who is ahead on material, e.g. `material White +3`.
pub fn material(position: &Position) -> String {
    match position.material_balance() {
        0 => "material even".to_string(),
        n if n > 0 => format!("material {} +{n}", Color::White),
        n => format!("material {} +{}", Color::Black, -n),
    }
}

fn play_status(session: &Session) -> String {
    match session.state() {
        SessionState::GameOver { outcome } => format!("game over: {outcome}"),
        SessionState::AwaitingBotMove { .. } => match session.engine_status() {
            EngineStatus::Unavailable(reason) => {
                format!("engine unavailable ({reason}); `retry`, `resign` or `new`")
            }
            _ => format!("engine ({}) is thinking...", session.strength()),
        },
        SessionState::AwaitingSelection | SessionState::PieceSelected { .. } => {
            let mut line = format!("{} to move", session.human_color());
            if let Some(last) = session.history().last() {
                let _ = write!(line, ", last move {}", last.san);
            }
            if let EngineStatus::Substituted(reason) = session.engine_status() {
                let _ = write!(line, " (engine move replaced by a random one: {reason})");
            }
            line
        }
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
