use super::*;
use std::collections::HashSet;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
    let unique: HashSet<Move> = moves.iter().copied().collect();
    assert_eq!(unique.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    // Kiwipete position - complex with many move types
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
        .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleKingside));
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleQueenside));
}

#[test]
fn test_moves_never_leave_king_in_check() {
    let pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
        .unwrap();
    for mv in legal_moves(&pos) {
        let next = pos.apply_move(mv).unwrap();
        assert!(!next.in_check(Color::White), "{mv} leaves the king in check");
    }
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on e2 is pinned by the rook on e8
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves_from(&pos, sq("e2")).is_empty());
}

#[test]
fn test_must_answer_check() {
    // Only king moves or blocking the rook are legal
    let pos = Position::from_fen("4k3/8/8/8/8/8/3P4/r3K2R w K - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| m.from == sq("e1")));
    assert!(!moves.iter().any(|m| m.is_castle()));
}

#[test]
fn test_castling_through_attack_forbidden() {
    // Black bishop on a6 covers f1
    let pos = Position::from_fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1").unwrap();
    assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));

    // Queenside: b1 may be attacked, c1 and d1 not
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/Rn2K3 w Q - 0 1").unwrap();
    assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));
    let pos = Position::from_fen("4k3/8/8/8/8/8/5n2/R3K3 w Q - 0 1").unwrap();
    assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));
    let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().any(|m| m.kind == MoveKind::CastleQueenside));
}

#[test]
fn test_castling_requires_rook() {
    // Rights claim kingside castling, but the rook is gone
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").unwrap();
    assert!(!legal_moves(&pos).iter().any(|m| m.is_castle()));
}

#[test]
fn test_en_passant_generated() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let ep: Vec<Move> = legal_moves(&pos)
        .into_iter()
        .filter(|m| m.is_en_passant())
        .collect();
    assert_eq!(ep, vec![Move::with_kind(sq("e5"), sq("d6"), MoveKind::EnPassant)]);
}

#[test]
fn test_en_passant_discovered_check_excluded() {
    // Capturing en passant would open the fifth rank to the rook on h5
    let pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1").unwrap();
    assert!(!legal_moves(&pos).iter().any(|m| m.is_en_passant()));
}

#[test]
fn test_promotions_all_four() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promos: HashSet<PieceKind> = legal_moves_from(&pos, sq("a7"))
        .iter()
        .filter_map(|m| m.promotion)
        .collect();
    assert_eq!(promos.len(), 4);
    assert!(!promos.contains(&PieceKind::King));
}

#[test]
fn test_checkmate_has_no_moves() {
    // Fool's mate
    let pos = Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(legal_moves(&pos).is_empty());
    assert!(pos.in_check(Color::White));
}
