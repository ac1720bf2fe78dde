//! Termination rules: stalemate, the fifty-move rule, repetition keys,
//! insufficient material and the order `adjudicate` applies them in.

use chess_core::{adjudicate, legal_moves, parse_uci_move, Color, GameOutcome, Position};

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn stalemates_have_no_moves_and_no_check() {
    for fen in [
        "k7/2K5/1Q6/8/8/8/8/8 b - - 0 1",
        "6k1/6P1/6K1/8/8/8/8/8 b - - 0 1",
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    ] {
        let p = pos(fen);
        assert!(legal_moves(&p).is_empty(), "{fen}");
        assert!(!p.in_check(Color::Black), "{fen}");
        assert_eq!(adjudicate(&p, 1), GameOutcome::Stalemate, "{fen}");
    }
}

#[test]
fn mate_and_check_are_told_apart() {
    let scholars = pos("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(legal_moves(&scholars).is_empty());
    assert!(scholars.in_check(Color::Black));

    let check = pos("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(check.in_check(Color::Black));
    assert!(!legal_moves(&check).is_empty());
    assert_eq!(adjudicate(&check, 1), GameOutcome::InProgress);
}

#[test]
fn fifty_move_rule_threshold() {
    assert!(!pos("8/8/8/4k3/8/4K3/8/R7 w - - 99 60").is_fifty_move_draw());
    assert!(pos("8/8/8/4k3/8/4K3/8/R7 w - - 100 60").is_fifty_move_draw());
}

#[test]
fn pawn_move_and_capture_reset_the_clock() {
    let p = pos("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    let push = parse_uci_move(&p, "e2e4").unwrap();
    assert_eq!(p.apply_move(push).unwrap().halfmove_clock, 0);

    let p = pos("8/8/8/4k3/8/2K5/8/r2R4 w - - 99 60");
    let capture = parse_uci_move(&p, "d1a1").unwrap();
    let after = p.apply_move(capture).unwrap();
    assert_eq!(after.halfmove_clock, 0);

    let quiet = parse_uci_move(&after, "e5f5").unwrap();
    assert_eq!(after.apply_move(quiet).unwrap().halfmove_clock, 1);
}

#[test]
fn insufficient_material_table() {
    let cases = [
        ("8/8/8/4k3/8/4K3/8/8 w - - 0 1", true, "K v K"),
        ("8/8/8/4k3/8/4KB2/8/8 w - - 0 1", true, "KB v K"),
        ("8/8/8/4k3/8/4K3/8/6N1 w - - 0 1", true, "KN v K"),
        ("8/8/4b3/4k3/8/4K3/8/8 w - - 0 1", true, "K v KB"),
        ("8/8/4n3/4k3/8/4K3/8/8 w - - 0 1", true, "K v KN"),
        ("5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1", true, "bishops on one colour"),
        ("2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1", false, "opposite bishops"),
        ("8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1", false, "two knights"),
        ("8/8/4n3/4k3/8/4KB2/8/8 w - - 0 1", false, "KB v KN"),
        ("8/8/8/4k3/8/4K3/4P3/8 w - - 0 1", false, "pawn"),
        ("8/8/8/4k3/8/4K3/8/4R3 w - - 0 1", false, "rook"),
        ("8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1", false, "queen"),
    ];
    for (fen, insufficient, label) in cases {
        assert_eq!(pos(fen).is_insufficient_material(), insufficient, "{label}");
    }
}

#[test]
fn repetition_key_tracks_only_repetition_state() {
    let start = Position::startpos();
    assert_eq!(start.repetition_key(), Position::startpos().repetition_key());

    let variants = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN1 w KQkq - 0 1",
    ];
    for fen in variants {
        assert_ne!(pos(fen).repetition_key(), start.repetition_key(), "{fen}");
    }

    let early = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let later = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 6 5");
    assert_eq!(early.repetition_key(), later.repetition_key());
}

#[test]
fn knight_dance_reaches_the_third_occurrence() {
    let mut p = pos("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let key = p.repetition_key();
    let mut seen = vec![key];
    for _ in 0..2 {
        for uci in ["f3g1", "c6b8", "g1f3", "b8c6"] {
            let mv = parse_uci_move(&p, uci).unwrap();
            p = p.apply_move(mv).unwrap();
            seen.push(p.repetition_key());
        }
    }
    let occurrences = seen.iter().filter(|&&k| k == key).count();
    assert_eq!(occurrences, 3);
    assert_eq!(adjudicate(&p, occurrences), GameOutcome::DrawByRepetition);
}

#[test]
fn adjudicate_names_the_mating_side() {
    let fools = pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(
        adjudicate(&fools, 1),
        GameOutcome::Checkmate {
            winner: Color::Black
        }
    );
}

#[test]
fn mate_on_the_hundredth_ply_is_still_mate() {
    let p = pos("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 80");
    assert_eq!(
        adjudicate(&p, 1),
        GameOutcome::Checkmate {
            winner: Color::White
        }
    );
}

#[test]
fn draws_are_checked_in_order() {
    let kings = pos("8/8/8/4k3/8/4K3/8/8 w - - 100 60");
    assert_eq!(adjudicate(&kings, 3), GameOutcome::DrawByFiftyMove);

    let kings = pos("8/8/8/4k3/8/4K3/8/8 w - - 10 60");
    assert_eq!(adjudicate(&kings, 3), GameOutcome::DrawByRepetition);
    assert_eq!(adjudicate(&kings, 1), GameOutcome::DrawByInsufficientMaterial);

    let rook = pos("8/8/8/4k3/8/4K3/8/4R3 b - - 10 60");
    assert_eq!(adjudicate(&rook, 2), GameOutcome::InProgress);
}
