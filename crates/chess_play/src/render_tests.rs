use super::*;
use game_session::{Input, SessionConfig};

#[test]
fn test_start_board_from_white() {
    let (session, _) = Session::start(&SessionConfig::default());
    let text = board(&session);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8  r  n  b  q  k  b  n  r ");
    assert_eq!(lines[7], "1  R  N  B  Q  K  B  N  R ");
    assert_eq!(lines[8], "   a  b  c  d  e  f  g  h ");
}

#[test]
fn test_board_from_black_is_flipped() {
    let config = SessionConfig {
        human_color: Color::Black,
        ..SessionConfig::default()
    };
    let (session, _) = Session::start(&config);
    let text = board(&session);
    assert!(text.starts_with("1  R  N  B  K  Q  B  N  R "));
    assert!(text.ends_with("   h  g  f  e  d  c  b  a \n"));
    assert_eq!(status(&session), "engine (medium) is thinking... | material even");
}

#[test]
fn test_selection_marks() {
    let (mut session, _) = Session::start(&SessionConfig::default());
    session.handle(Input::Select("g1".parse().unwrap()));
    let text = board(&session);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[5], "3  .  .  .  .  .  *  .  * ");
    assert_eq!(lines[7], "1  R  N  B  Q  K  B [N] R ");
    assert_eq!(status(&session), "White to move | material even");
}

#[test]
fn test_material_line() {
    let pos = |fen| Position::from_fen(fen).unwrap();
    assert_eq!(material(&Position::startpos()), "material even");
    assert_eq!(material(&pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")), "material White +5");
    assert_eq!(material(&pos("4k3/2n5/8/8/8/8/P7/4K3 w - - 0 1")), "material Black +2");
}

#[test]
fn test_browsing_shows_earlier_position() {
    let (mut session, _) = Session::start(&SessionConfig::default());
    session.handle(Input::Select("e2".parse().unwrap()));
    session.handle(Input::Select("e4".parse().unwrap()));
    let live = board(&session);

    session.handle(Input::ViewPrev);
    let earlier = board(&session);
    assert_ne!(earlier, live);
    assert_eq!(earlier.lines().nth(6), Some("2  P  P  P  P  P  P  P  P "));
    assert!(status(&session).starts_with("viewing ply 0 of 1 (`next`, `latest`) | "));

    session.handle(Input::ViewLatest);
    assert_eq!(board(&session), live);
    assert!(!status(&session).starts_with("viewing"));
}
