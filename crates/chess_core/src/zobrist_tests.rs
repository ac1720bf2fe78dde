use super::*;
use std::collections::HashSet;

use crate::types::{Move, MoveKind, PieceKind};

#[test]
fn test_feature_words_distinct() {
    let mut seen = HashSet::new();
    assert!(ZOBRIST.all_words().iter().all(|w| seen.insert(*w)));
    assert_eq!(seen.len(), 2 * 6 * 64 + 1 + 4 + 8);
}

#[test]
fn test_piece_words_depend_on_square_and_piece() {
    let pawn = Piece::new(Color::White, PieceKind::Pawn);
    let black_pawn = Piece::new(Color::Black, PieceKind::Pawn);
    assert_ne!(ZOBRIST.piece(pawn, Square::A1), ZOBRIST.piece(pawn, Square::B1));
    assert_ne!(ZOBRIST.piece(pawn, Square::A1), ZOBRIST.piece(black_pawn, Square::A1));
}

#[test]
fn test_repetition_key_ignores_clocks() {
    let a = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let b = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 37 80").unwrap();
    assert_eq!(a.repetition_key(), b.repetition_key());
}

#[test]
fn test_repetition_key_distinguishes_state() {
    let base = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
    let black = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b K - 0 1").unwrap();
    let no_rights = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 0 1").unwrap();
    assert_ne!(base.repetition_key(), black.repetition_key());
    assert_ne!(base.repetition_key(), no_rights.repetition_key());
}

#[test]
fn test_knight_shuffle_repeats_key() {
    let start = Position::startpos();
    let mut pos = start.clone();
    for (from, to) in [("g1", "f3"), ("g8", "f6"), ("f3", "g1"), ("f6", "g8")] {
        let mv = Move::with_kind(from.parse().unwrap(), to.parse().unwrap(), MoveKind::Normal);
        pos = pos.apply_move(mv).unwrap();
    }
    assert_eq!(pos.repetition_key(), start.repetition_key());
    assert_ne!(pos.fullmove_number, start.fullmove_number);
}

#[test]
fn test_ep_square_changes_key() {
    let with_ep = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    let without = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").unwrap();
    assert_ne!(with_ep.repetition_key(), without.repetition_key());
}
