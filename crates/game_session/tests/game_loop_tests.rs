//! Sessions driven end to end through a bridge worker.

use std::time::Duration;

use async_trait::async_trait;
use chess_core::{GameOutcome, Position};
use engine_bridge::{
    BridgeHandle, EngineBridge, EngineError, MoveSource, RandomMover, Reply, StrengthProfile,
    StrengthTable,
};
use game_session::{Effect, Input, Session, SessionConfig, SessionState};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

fn spawn(source: impl MoveSource + 'static) -> (BridgeHandle, UnboundedReceiver<Reply>) {
    BridgeHandle::spawn(EngineBridge::new(Box::new(source), StrengthTable::default()))
}

/// Hand the session's requests to the worker; returns whether the game ended.
fn perform(handle: &BridgeHandle, effects: Vec<Effect>) -> bool {
    let mut ended = false;
    for effect in effects {
        match effect {
            Effect::RequestMove {
                ticket,
                position,
                strength,
            } => handle.request(ticket, position, strength),
            Effect::CancelRequest { ticket } => handle.cancel(ticket),
            Effect::GameEnded(_) => ended = true,
            Effect::MovePlayed { .. } | Effect::EngineTrouble(_) => {}
        }
    }
    ended
}

#[tokio::test]
async fn test_random_game_runs_to_completion() {
    let (handle, mut replies) = spawn(RandomMover::seeded(11));
    let (mut session, effects) = Session::start(&SessionConfig::default());
    perform(&handle, effects);
    let mut human = RandomMover::seeded(29);

    for _ in 0..600 {
        match session.state().clone() {
            SessionState::GameOver { .. } => break,
            SessionState::AwaitingBotMove { .. } => {
                let reply = timeout(Duration::from_secs(5), replies.recv())
                    .await
                    .expect("worker answered")
                    .expect("worker alive");
                let effects = session.handle(Input::EngineReply {
                    ticket: reply.ticket,
                    result: reply.result,
                });
                perform(&handle, effects);
            }
            SessionState::AwaitingSelection | SessionState::PieceSelected { .. } => {
                let mv = human.pick(session.position()).expect("human has a move");
                session.handle(Input::Select(mv.from));
                let effects = session.handle(Input::Select(mv.to));
                perform(&handle, effects);
            }
        }
    }
    if !session.outcome().is_over() {
        perform(&handle, session.handle(Input::Resign));
    }

    assert!(session.outcome().is_over());
    // The history replays to the final position
    let mut pos = Position::startpos();
    for entry in session.history().entries() {
        pos = pos.apply_move(entry.mv).unwrap();
    }
    assert_eq!(&pos, session.position());
    handle.shutdown().await;
}

/// Thinks for a while, then plays 1...e5.
struct Slow;

#[async_trait]
impl MoveSource for Slow {
    fn name(&self) -> &str {
        "slow"
    }

    async fn best_move(
        &mut self,
        _position: &Position,
        _profile: &StrengthProfile,
    ) -> Result<String, EngineError> {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok("e7e5".to_string())
    }
}

#[tokio::test]
async fn test_resign_while_engine_thinks() {
    let (handle, mut replies) = spawn(Slow);
    let (mut session, _) = Session::start(&SessionConfig::default());
    session.handle(Input::Select("e2".parse().unwrap()));
    perform(&handle, session.handle(Input::Select("e4".parse().unwrap())));
    let position = session.position().clone();

    assert!(perform(&handle, session.handle(Input::Resign)));

    // Any reply that still turns up must not touch the game
    if let Ok(Some(reply)) = timeout(Duration::from_millis(500), replies.recv()).await {
        session.handle(Input::EngineReply {
            ticket: reply.ticket,
            result: reply.result,
        });
    }
    assert_eq!(session.position(), &position);
    assert!(matches!(
        session.outcome(),
        GameOutcome::Resignation { .. }
    ));
    handle.shutdown().await;
}

#[tokio::test]
async fn test_new_game_discards_old_reply() {
    let (handle, mut replies) = spawn(Slow);
    let (mut session, _) = Session::start(&SessionConfig::default());
    session.handle(Input::Select("e2".parse().unwrap()));
    perform(&handle, session.handle(Input::Select("e4".parse().unwrap())));

    perform(&handle, session.handle(Input::NewGame(Default::default())));
    assert_eq!(session.generation(), 1);

    if let Ok(Some(reply)) = timeout(Duration::from_millis(500), replies.recv()).await {
        assert!(session
            .handle(Input::EngineReply {
                ticket: reply.ticket,
                result: reply.result,
            })
            .is_empty());
    }
    assert_eq!(session.position(), &Position::startpos());
    assert_eq!(session.state(), &SessionState::AwaitingSelection);
    handle.shutdown().await;
}
