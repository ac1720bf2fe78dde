//! Standard Algebraic Notation for move lists.

use crate::board::Position;
use crate::movegen::legal_moves;
use crate::types::*;

/// SAN for a legal move `mv` in `pos`, with `+` or `#` suffix.
///
/// Falls back to UCI text if no piece stands on the origin square.
pub fn to_san(pos: &Position, mv: Move) -> String {
    let Some(piece) = pos.piece_at(mv.from) else {
        return mv.to_string();
    };

    let mut san = String::with_capacity(8);
    match mv.kind {
        MoveKind::CastleKingside => san.push_str("O-O"),
        MoveKind::CastleQueenside => san.push_str("O-O-O"),
        _ => {
            let is_capture = pos.piece_at(mv.to).is_some() || mv.is_en_passant();
            if piece.kind == PieceKind::Pawn {
                if is_capture {
                    san.push(file_char(mv.from));
                }
            } else {
                san.push(piece.kind.to_char().to_ascii_uppercase());
                san.push_str(&disambiguation(pos, mv, piece.kind));
            }
            if is_capture {
                san.push('x');
            }
            san.push_str(&mv.to.to_string());
            if let Some(promo) = mv.promotion {
                san.push('=');
                san.push(promo.to_char().to_ascii_uppercase());
            }
        }
    }

    let mut after = pos.clone();
    after.play_unchecked(mv);
    if after.in_check(after.side_to_move) {
        san.push(if legal_moves(&after).is_empty() { '#' } else { '+' });
    }
    san
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file()) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank()) as char
}

/// File, rank or full square needed to tell `mv` apart from other pieces of
/// the same kind that can reach the same destination.
fn disambiguation(pos: &Position, mv: Move, kind: PieceKind) -> String {
    let rivals: Vec<Square> = legal_moves(pos)
        .into_iter()
        .filter(|m| m.to == mv.to && m.from != mv.from)
        .filter(|m| pos.piece_at(m.from).is_some_and(|pc| pc.kind == kind))
        .map(|m| m.from)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != mv.from.file()) {
        return file_char(mv.from).to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != mv.from.rank()) {
        return rank_char(mv.from).to_string();
    }
    mv.from.to_string()
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
