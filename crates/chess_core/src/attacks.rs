//! Attack detection shared by check tests, castling-path validation and the
//! legality filter of the move generator.
//!
//! Attacks are found by looking outward from the target square: a square is
//! attacked by a knight if a knight of the attacking colour sits a knight's
//! jump away, by a bishop or queen if one is the first piece along a diagonal,
//! and so on.

use crate::board::Position;
use crate::types::{Color, PieceKind, Square};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Whether any piece of colour `by` attacks `target`.
pub fn is_square_attacked(pos: &Position, target: Square, by: Color) -> bool {
    let holds = |sq: Option<Square>, kind: PieceKind| {
        sq.and_then(|s| pos.piece_at(s))
            .is_some_and(|pc| pc.color == by && pc.kind == kind)
    };

    // A pawn of colour `by` attacks diagonally forward, so look one rank back.
    let back = -by.forward();
    if holds(target.offset(-1, back), PieceKind::Pawn)
        || holds(target.offset(1, back), PieceKind::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(target.offset(df, dr), PieceKind::King))
    {
        return true;
    }

    slider_attacks(pos, target, by, &DIAGONALS, PieceKind::Bishop)
        || slider_attacks(pos, target, by, &ORTHOGONALS, PieceKind::Rook)
}

/// Side to move is in check.
pub fn is_in_check(pos: &Position) -> bool {
    pos.in_check(pos.side_to_move)
}

fn slider_attacks(
    pos: &Position,
    target: Square,
    by: Color,
    dirs: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    for &(df, dr) in dirs {
        let mut cur = target.offset(df, dr);
        while let Some(sq) = cur {
            if let Some(pc) = pos.piece_at(sq) {
                if pc.color == by && (pc.kind == kind || pc.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cur = sq.offset(df, dr);
        }
    }
    false
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
