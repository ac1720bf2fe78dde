use super::*;

#[test]
fn test_startpos_round_trip() {
    let pos = Position::from_fen(Position::STARTPOS_FEN).unwrap();
    assert_eq!(pos, Position::startpos());
    assert_eq!(pos.to_fen(), Position::STARTPOS_FEN);
}

#[test]
fn test_round_trip_preserves_every_field() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 12 40",
        "r3k3/8/8/8/8/8/8/4K2R b Kq - 5 33",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
        assert_eq!(Position::from_fen(&pos.to_fen()).unwrap(), pos);
    }
}

#[test]
fn test_counters_optional() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
    assert_eq!(pos.side_to_move, Color::Black);
}

#[test]
fn test_rejects_malformed() {
    assert_eq!(
        Position::from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(Position::from_fen("4k3/8/8/8"), Err(FenError::MissingFields(1)));
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3X w - -"),
        Err(FenError::InvalidPiece('X'))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K4 w - -"),
        Err(FenError::RankWidth { rank: 1 })
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 x - -"),
        Err(FenError::InvalidSideToMove("x".into()))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KZ -"),
        Err(FenError::InvalidCastling("KZ".into()))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - e4"),
        Err(FenError::InvalidEnPassant("e4".into()))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1"),
        Err(FenError::InvalidCounter("x".into()))
    );
    assert_eq!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - -"),
        Err(FenError::KingCount)
    );
    // Target on the mover's own side of the board.
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/3PR3/4K3 w - e3 0 1"),
        Err(FenError::InvalidEnPassant("e3".into()))
    );
    // Right rank but no pawn that could just have pushed.
    assert_eq!(
        Position::from_fen("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 1"),
        Err(FenError::InvalidEnPassant("d6".into()))
    );
    assert_eq!(
        Position::from_fen("4k3/8/8/8/8/8/8/4R2K w - - 0 1"),
        Err(FenError::OpponentInCheck(Color::Black))
    );
}

#[test]
fn test_accepts_en_passant_after_double_push() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    assert_eq!(pos.en_passant, Some("d6".parse().unwrap()));
    let pos = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").unwrap();
    assert_eq!(pos.en_passant, Some("e3".parse().unwrap()));
}

#[test]
fn test_side_to_move_may_be_in_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4R2K b - - 0 1").unwrap();
    assert!(pos.in_check(Color::Black));
}
