use super::*;
use crate::session::{Input, SessionState};
use chess_core::Square;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play_opening() -> Session {
    let (mut session, _) = Session::start(&SessionConfig::default());
    session.handle(Input::Select(sq("e2")));
    session.handle(Input::Select(sq("e4")));
    let mv = parse_uci_move(session.position(), "c7c5").unwrap();
    session.handle(Input::EngineReply {
        ticket: 1,
        result: Ok(mv),
    });
    session
}

#[test]
fn test_snapshot_contents() {
    let snap = play_opening().snapshot();
    assert_eq!(snap.start_fen, Position::STARTPOS_FEN);
    assert_eq!(snap.moves_uci, vec!["e2e4", "c7c5"]);
    assert_eq!(snap.moves_san, vec!["e4", "c5"]);
    assert_eq!(snap.human_color, Color::White);
    assert_eq!(snap.outcome, GameOutcome::InProgress);
    assert_eq!(
        snap.fen,
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
    );
}

#[test]
fn test_restore_resumes_human_turn() {
    let original = play_opening();
    let json = original.snapshot().to_json();
    let snap = SessionSnapshot::from_json(&json).unwrap();
    let (restored, effects) = Session::from_snapshot(&SessionConfig::default(), &snap).unwrap();
    assert!(effects.is_empty());
    assert_eq!(restored.position(), original.position());
    assert_eq!(restored.history(), original.history());
    assert_eq!(restored.state(), &SessionState::AwaitingSelection);
}

#[test]
fn test_restore_with_engine_to_move_requests() {
    let (mut session, _) = Session::start(&SessionConfig::default());
    session.handle(Input::Select(sq("d2")));
    session.handle(Input::Select(sq("d4")));
    let (restored, effects) =
        Session::from_snapshot(&SessionConfig::default(), &session.snapshot()).unwrap();
    assert!(matches!(effects.as_slice(), [Effect::RequestMove { ticket: 1, .. }]));
    assert!(matches!(restored.state(), SessionState::AwaitingBotMove { ticket: 1 }));
}

#[test]
fn test_restore_keeps_resignation() {
    let mut session = play_opening();
    session.handle(Input::Resign);
    let (restored, effects) =
        Session::from_snapshot(&SessionConfig::default(), &session.snapshot()).unwrap();
    assert!(effects.is_empty());
    assert_eq!(
        restored.outcome(),
        GameOutcome::Resignation {
            winner: Color::Black
        }
    );
}

#[test]
fn test_restore_rejects_illegal_move() {
    let mut snap = play_opening().snapshot();
    snap.moves_uci.push("e4e6".into());
    assert!(matches!(
        Session::from_snapshot(&SessionConfig::default(), &snap),
        Err(SnapshotError::IllegalMove { ply: 2, .. })
    ));
}

#[test]
fn test_restore_rejects_bad_fen() {
    let mut snap = play_opening().snapshot();
    snap.start_fen = "not a fen".into();
    assert!(matches!(
        Session::from_snapshot(&SessionConfig::default(), &snap),
        Err(SnapshotError::Fen(_))
    ));
    assert!(matches!(
        SessionSnapshot::from_json("{"),
        Err(SnapshotError::Json(_))
    ));
}
