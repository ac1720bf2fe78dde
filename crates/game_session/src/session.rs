//! The game state machine.
//!
//! A [`Session`] owns one game between a human and an engine. Hosts feed it
//! [`Input`]s and carry out the [`Effect`]s it returns; it never performs I/O
//! itself. Engine work is requested by ticket, so a reply that arrives after
//! the request was abandoned is recognised and thrown away.

use chess_core::{
    adjudicate, legal_moves, legal_moves_from, to_san, Color, GameOutcome, Move, PieceKind,
    Position, Square,
};
use engine_bridge::{EngineError, RandomMover, Strength, Ticket};
use tracing::{debug, info, warn};

use crate::config::{EnginePolicy, SessionConfig, ViolationPolicy};
use crate::history::{History, HistoryEntry};

/// Parameters of a new game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSetup {
    pub human_color: Color,
    pub strength: Strength,
    pub start: Position,
}

impl Default for GameSetup {
    fn default() -> Self {
        GameSetup {
            human_color: Color::White,
            strength: Strength::default(),
            start: Position::startpos(),
        }
    }
}

impl From<&SessionConfig> for GameSetup {
    fn from(config: &SessionConfig) -> Self {
        GameSetup {
            human_color: config.human_color,
            strength: config.strength,
            start: Position::startpos(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// The human is to move and has nothing selected.
    AwaitingSelection,
    PieceSelected {
        square: Square,
        /// Distinct target squares of the selected piece.
        destinations: Vec<Square>,
    },
    /// The engine is to move; only a reply carrying `ticket` is accepted.
    AwaitingBotMove { ticket: Ticket },
    GameOver { outcome: GameOutcome },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Select(Square),
    Deselect,
    Resign,
    NewGame(GameSetup),
    EngineReply {
        ticket: Ticket,
        result: Result<Move, EngineError>,
    },
    /// Take back the human's last move and any engine reply to it.
    Undo,
    /// Ask the engine again after it became unavailable.
    RetryBot,
    /// Show the position one ply earlier. Moves are refused until the view
    /// is back on the latest position.
    ViewPrev,
    ViewNext,
    ViewLatest,
}

/// Work the host must carry out after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    RequestMove {
        ticket: Ticket,
        position: Position,
        strength: Strength,
    },
    CancelRequest { ticket: Ticket },
    MovePlayed { by: Color, san: String },
    GameEnded(GameOutcome),
    /// Something the user should be told about the engine.
    EngineTrouble(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EngineStatus {
    #[default]
    Idle,
    Thinking,
    /// Retries are used up; waiting for [`Input::RetryBot`].
    Unavailable(String),
    /// The last reply broke the protocol and a random move was played
    /// instead.
    Substituted(String),
}

pub struct Session {
    setup: GameSetup,
    position: Position,
    state: SessionState,
    history: History,
    promotion: PieceKind,
    policy: EnginePolicy,
    engine_status: EngineStatus,
    retries_left: u32,
    generation: u64,
    next_ticket: Ticket,
    fallback: RandomMover,
    /// Ply being looked at while browsing; `None` follows the game.
    view: Option<usize>,
}

impl Session {
    /// Begin a game. If the engine moves first the returned effects hold its
    /// move request.
    pub fn start(config: &SessionConfig) -> (Session, Vec<Effect>) {
        Session::with_setup(config, GameSetup::from(config))
    }

    pub fn with_setup(config: &SessionConfig, setup: GameSetup) -> (Session, Vec<Effect>) {
        let mut session = Session {
            position: setup.start.clone(),
            history: History::new(setup.start.clone()),
            setup,
            state: SessionState::AwaitingSelection,
            promotion: config.promotion,
            policy: config.engine_policy,
            engine_status: EngineStatus::Idle,
            retries_left: config.engine_policy.retry_unavailable,
            generation: 0,
            next_ticket: 1,
            fallback: RandomMover::new(),
            view: None,
        };
        let mut effects = Vec::new();
        session.begin(&mut effects);
        (session, effects)
    }

    /// Resume a game at the end of `history`. An outcome the final position
    /// does not imply by itself, such as a resignation, is kept as recorded.
    pub(crate) fn resume(
        config: &SessionConfig,
        setup: GameSetup,
        history: History,
        recorded: GameOutcome,
    ) -> (Session, Vec<Effect>) {
        let mut session = Session {
            position: history.current().clone(),
            history,
            setup,
            state: SessionState::AwaitingSelection,
            promotion: config.promotion,
            policy: config.engine_policy,
            engine_status: EngineStatus::Idle,
            retries_left: config.engine_policy.retry_unavailable,
            generation: 0,
            next_ticket: 1,
            fallback: RandomMover::new(),
            view: None,
        };
        let mut effects = Vec::new();
        if recorded.is_over() {
            session.state = SessionState::GameOver { outcome: recorded };
        } else {
            session.after_position_change(&mut effects);
        }
        (session, effects)
    }

    /// Replace the fallback move picker, e.g. with a seeded one.
    pub fn set_fallback(&mut self, fallback: RandomMover) {
        self.fallback = fallback;
    }

    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        let mut effects = Vec::new();
        match input {
            Input::Select(sq) if self.view.is_some() => {
                debug!(%sq, view = ?self.view, "selection ignored while browsing");
            }
            Input::Select(sq) => self.on_select(sq, &mut effects),
            Input::Deselect => {
                if matches!(self.state, SessionState::PieceSelected { .. }) {
                    self.state = SessionState::AwaitingSelection;
                }
            }
            Input::Resign => self.on_resign(&mut effects),
            Input::NewGame(setup) => {
                self.cancel_outstanding(&mut effects);
                self.setup = setup;
                self.position = self.setup.start.clone();
                self.history = History::new(self.setup.start.clone());
                self.view = None;
                self.generation += 1;
                self.begin(&mut effects);
            }
            Input::EngineReply { ticket, result } => {
                self.on_engine_reply(ticket, result, &mut effects)
            }
            Input::Undo => self.on_undo(),
            Input::RetryBot => {
                if let SessionState::AwaitingBotMove { ticket } = &self.state {
                    let ticket = *ticket;
                    if self.engine_status == EngineStatus::Thinking {
                        effects.push(Effect::CancelRequest { ticket });
                    }
                    self.retries_left = self.policy.retry_unavailable;
                    self.request_bot_move(&mut effects);
                }
            }
            Input::ViewPrev => {
                let ply = self.view_ply();
                if ply > 0 {
                    self.show_ply(ply - 1);
                }
            }
            Input::ViewNext => {
                if let Some(ply) = self.view {
                    self.show_ply(ply + 1);
                }
            }
            Input::ViewLatest => self.view = None,
        }
        effects
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn outcome(&self) -> GameOutcome {
        match &self.state {
            SessionState::GameOver { outcome } => outcome.clone(),
            _ => GameOutcome::InProgress,
        }
    }

    pub fn selected(&self) -> Option<Square> {
        match &self.state {
            SessionState::PieceSelected { square, .. } => Some(*square),
            _ => None,
        }
    }

    pub fn destinations(&self) -> &[Square] {
        match &self.state {
            SessionState::PieceSelected { destinations, .. } => destinations,
            _ => &[],
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of plies leading to the position on display.
    pub fn view_ply(&self) -> usize {
        self.view.unwrap_or(self.history.len())
    }

    pub fn is_viewing_latest(&self) -> bool {
        self.view.is_none()
    }

    /// The position on display: the live one unless browsing back.
    pub fn viewed_position(&self) -> &Position {
        self.view
            .and_then(|ply| self.history.position_at(ply))
            .unwrap_or(&self.position)
    }

    /// The move that led to the position on display.
    pub fn viewed_last_move(&self) -> Option<Move> {
        match self.view_ply() {
            0 => None,
            ply => self.history.entries().get(ply - 1).map(|e| e.mv),
        }
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|e| e.mv)
    }

    pub fn human_color(&self) -> Color {
        self.setup.human_color
    }

    pub fn strength(&self) -> Strength {
        self.setup.strength
    }

    pub fn engine_status(&self) -> &EngineStatus {
        &self.engine_status
    }

    pub fn move_list(&self) -> String {
        self.history.move_list()
    }

    /// Bumped by every [`Input::NewGame`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn promotion(&self) -> PieceKind {
        self.promotion
    }

    /// Choose the piece for the human's future promotions. Returns false,
    /// leaving the choice unchanged, for pawns and kings.
    pub fn set_promotion(&mut self, kind: PieceKind) -> bool {
        if PieceKind::PROMOTIONS.contains(&kind) {
            self.promotion = kind;
            true
        } else {
            false
        }
    }

    pub fn is_human_turn(&self) -> bool {
        matches!(
            self.state,
            SessionState::AwaitingSelection | SessionState::PieceSelected { .. }
        )
    }

    /// Move the view to `ply`, following the game again once it reaches the
    /// latest position. Any selection is dropped.
    fn show_ply(&mut self, ply: usize) {
        if matches!(self.state, SessionState::PieceSelected { .. }) {
            self.state = SessionState::AwaitingSelection;
        }
        self.view = (ply < self.history.len()).then_some(ply);
        debug!(ply, latest = self.history.len(), "viewing");
    }

    /// Settle the state for a freshly set up position.
    fn begin(&mut self, effects: &mut Vec<Effect>) {
        self.engine_status = EngineStatus::Idle;
        self.retries_left = self.policy.retry_unavailable;
        info!(
            human = %self.setup.human_color,
            strength = %self.setup.strength,
            generation = self.generation,
            "new game"
        );
        self.after_position_change(effects);
    }

    fn on_select(&mut self, sq: Square, effects: &mut Vec<Effect>) {
        let (from, is_destination) = match &self.state {
            SessionState::AwaitingSelection => {
                self.try_select(sq);
                return;
            }
            SessionState::PieceSelected {
                square,
                destinations,
            } => (*square, destinations.contains(&sq)),
            SessionState::AwaitingBotMove { .. } | SessionState::GameOver { .. } => {
                debug!(%sq, "selection ignored");
                return;
            }
        };

        if is_destination {
            if let Some(mv) = self.human_move(from, sq) {
                self.commit(mv, effects);
            }
        } else if sq != from && self.is_selectable(sq) {
            self.try_select(sq);
        } else {
            self.state = SessionState::AwaitingSelection;
        }
    }

    fn is_selectable(&self, sq: Square) -> bool {
        self.position
            .piece_at(sq)
            .is_some_and(|pc| pc.color == self.setup.human_color)
    }

    fn try_select(&mut self, sq: Square) {
        if !self.is_selectable(sq) {
            return;
        }
        let mut destinations: Vec<Square> = legal_moves_from(&self.position, sq)
            .iter()
            .map(|m| m.to)
            .collect();
        destinations.sort();
        destinations.dedup();
        if destinations.is_empty() {
            return;
        }
        debug!(%sq, count = destinations.len(), "piece selected");
        self.state = SessionState::PieceSelected {
            square: sq,
            destinations,
        };
    }

    /// The legal move from `from` to `to`, using the promotion choice when
    /// several moves share those squares.
    fn human_move(&self, from: Square, to: Square) -> Option<Move> {
        let candidates: Vec<Move> = legal_moves_from(&self.position, from)
            .into_iter()
            .filter(|m| m.to == to)
            .collect();
        candidates
            .iter()
            .find(|m| m.promotion.is_none() || m.promotion == Some(self.promotion))
            .or_else(|| candidates.first())
            .copied()
    }

    fn on_resign(&mut self, effects: &mut Vec<Effect>) {
        if matches!(self.state, SessionState::GameOver { .. }) {
            return;
        }
        self.cancel_outstanding(effects);
        let winner = self.setup.human_color.other();
        self.finish(GameOutcome::Resignation { winner }, effects);
    }

    fn on_engine_reply(
        &mut self,
        ticket: Ticket,
        result: Result<Move, EngineError>,
        effects: &mut Vec<Effect>,
    ) {
        let outstanding = match &self.state {
            SessionState::AwaitingBotMove { ticket } => Some(*ticket),
            _ => None,
        };
        if outstanding != Some(ticket) || self.engine_status != EngineStatus::Thinking {
            debug!(ticket, ?outstanding, "discarding stale engine reply");
            return;
        }

        match result {
            Ok(mv) if legal_moves(&self.position).contains(&mv) => {
                self.engine_status = EngineStatus::Idle;
                self.retries_left = self.policy.retry_unavailable;
                self.commit(mv, effects);
            }
            Ok(mv) => {
                let err = EngineError::ContractViolation {
                    position_fen: self.position.to_fen(),
                    reply: mv.to_string(),
                };
                self.on_violation(err, effects);
            }
            Err(EngineError::Unavailable(reason)) => {
                if self.retries_left > 0 {
                    self.retries_left -= 1;
                    warn!(
                        %reason,
                        retries_left = self.retries_left,
                        "engine unavailable, retrying"
                    );
                    self.request_bot_move(effects);
                } else {
                    warn!(%reason, "engine unavailable");
                    effects.push(Effect::EngineTrouble(format!("engine unavailable: {reason}")));
                    self.engine_status = EngineStatus::Unavailable(reason);
                }
            }
            Err(err) => self.on_violation(err, effects),
        }
    }

    fn on_violation(&mut self, err: EngineError, effects: &mut Vec<Effect>) {
        let message = err.to_string();
        warn!(%message, policy = ?self.policy.on_violation, "engine broke protocol");
        effects.push(Effect::EngineTrouble(message.clone()));

        match self.policy.on_violation {
            ViolationPolicy::EndSession => {
                self.engine_status = EngineStatus::Idle;
                self.finish(GameOutcome::Aborted { reason: message }, effects);
            }
            ViolationPolicy::RandomMove => match self.fallback.pick(&self.position) {
                Some(mv) => {
                    self.engine_status = EngineStatus::Substituted(message);
                    self.commit(mv, effects);
                }
                None => {
                    self.engine_status = EngineStatus::Idle;
                    self.finish(GameOutcome::Aborted { reason: message }, effects);
                }
            },
        }
    }

    fn on_undo(&mut self) {
        if !self.is_human_turn() {
            debug!("undo ignored");
            return;
        }
        let Some(ply) = self.history.last_ply_by(self.setup.human_color) else {
            return;
        };
        self.position = self.history.entries()[ply].before.clone();
        self.history.truncate(ply);
        self.view = None;
        self.state = SessionState::AwaitingSelection;
        debug!(plies = self.history.len(), "move taken back");
    }

    /// Apply a move that is known to be legal, record it and decide what
    /// happens next.
    fn commit(&mut self, mv: Move, effects: &mut Vec<Effect>) {
        let before = self.position.clone();
        let after = match before.apply_move(mv) {
            Ok(after) => after,
            Err(err) => {
                warn!(%err, "refusing to apply move");
                return;
            }
        };
        let san = to_san(&before, mv);
        let by = before.side_to_move;
        info!(%by, %san, "move played");

        self.position = after.clone();
        self.history.push(HistoryEntry {
            before,
            mv,
            san: san.clone(),
            after,
        });
        effects.push(Effect::MovePlayed { by, san });
        self.after_position_change(effects);
    }

    fn after_position_change(&mut self, effects: &mut Vec<Effect>) {
        let occurrences = self
            .history
            .occurrences(self.position.repetition_key());
        let outcome = adjudicate(&self.position, occurrences);
        if outcome.is_over() {
            self.finish(outcome, effects);
        } else if self.position.side_to_move == self.setup.human_color {
            self.state = SessionState::AwaitingSelection;
        } else {
            self.request_bot_move(effects);
        }
    }

    fn request_bot_move(&mut self, effects: &mut Vec<Effect>) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = SessionState::AwaitingBotMove { ticket };
        self.engine_status = EngineStatus::Thinking;
        debug!(ticket, "requesting engine move");
        effects.push(Effect::RequestMove {
            ticket,
            position: self.position.clone(),
            strength: self.setup.strength,
        });
    }

    fn cancel_outstanding(&mut self, effects: &mut Vec<Effect>) {
        if let SessionState::AwaitingBotMove { ticket } = &self.state {
            if self.engine_status == EngineStatus::Thinking {
                effects.push(Effect::CancelRequest { ticket: *ticket });
            }
        }
    }

    fn finish(&mut self, outcome: GameOutcome, effects: &mut Vec<Effect>) {
        info!(%outcome, moves = %self.history.move_list(), "game over");
        self.state = SessionState::GameOver {
            outcome: outcome.clone(),
        };
        if self.engine_status == EngineStatus::Thinking {
            self.engine_status = EngineStatus::Idle;
        }
        effects.push(Effect::GameEnded(outcome));
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
