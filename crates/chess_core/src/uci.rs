//! UCI long-algebraic move notation (`e2e4`, `e7e8q`).

use crate::{board::Position, movegen::legal_moves, types::*};

pub fn move_to_uci(mv: Move) -> String {
    mv.to_string()
}

/// Resolve UCI move text against the legal moves of `pos`.
///
/// Matching against the generator keeps the special-move tags (castle,
/// en passant, double push) correct. Returns `None` for malformed text and
/// for well-formed moves that are not legal here, including a pawn reaching
/// the last rank without a promotion letter.
pub fn parse_uci_move(pos: &Position, txt: &str) -> Option<Move> {
    let txt = txt.trim();
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from: Square = txt[0..2].parse().ok()?;
    let to: Square = txt[2..4].parse().ok()?;
    let promotion = match txt.as_bytes().get(4) {
        Some(&b) => match PieceKind::from_char(b as char)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
        None => None,
    };

    legal_moves(pos)
        .into_iter()
        .find(|m| m.from == from && m.to == to && m.promotion == promotion)
}

/// Apply a sequence of UCI moves to `pos`, stopping at the first one that
/// does not parse or is illegal. Returns how many moves were applied.
pub fn play_uci_moves<'a>(pos: &mut Position, moves: impl IntoIterator<Item = &'a str>) -> usize {
    let mut applied = 0;
    for txt in moves {
        match parse_uci_move(pos, txt) {
            Some(mv) => {
                pos.play_unchecked(mv);
                applied += 1;
            }
            None => break,
        }
    }
    applied
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
