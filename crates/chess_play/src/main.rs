//! Terminal front end: reads commands from stdin, draws the board as text
//! and plays the engine's moves as they arrive.
//!
//! Usage:
//!   chess_play [--engine /usr/bin/stockfish] [--strength hard] [--color black]
//!   chess_play --random
//!   chess_play --config play.toml --load saved.json

mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chess_core::{Color, Position};
use clap::{Parser, ValueEnum};
use engine_bridge::{
    BridgeHandle, EngineBridge, MoveSource, RandomMover, Reply, Strength, UciEngine,
};
use game_session::{
    Effect, EngineStatus, GameConfig, GameSetup, Input, InteractionAdapter, PointerEvent, Session,
    SessionSnapshot,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::Command;

#[derive(Parser, Debug)]
#[command(name = "chess_play", version, about = "Play chess against a UCI engine")]
struct Args {
    /// TOML file with [engine] and [session] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Engine executable; overrides the config file
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Play against uniformly random moves instead of an engine
    #[arg(long, conflicts_with = "engine")]
    random: bool,

    /// easy, medium or hard
    #[arg(short, long)]
    strength: Option<Strength>,

    /// Side you play
    #[arg(long, value_enum)]
    color: Option<Side>,

    /// Start from this position instead of the initial one
    #[arg(long, conflicts_with = "load")]
    fen: Option<String>,

    /// Resume a game written by `save`
    #[arg(long)]
    load: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(path) = &args.engine {
        config.engine.path = path.clone();
    }
    if let Some(strength) = args.strength {
        config.session.strength = strength;
    }
    if let Some(side) = args.color {
        config.session.human_color = side.into();
    }

    let (session, effects) = open_session(&args, &config)?;
    let source = open_source(&args, &config).await;
    let bridge = EngineBridge::new(source, config.engine.strengths.clone());
    let (handle, mut replies) = BridgeHandle::spawn(bridge);

    let mut play = Play {
        session,
        adapter: InteractionAdapter::new(),
        handle,
    };
    println!("{}", commands::HELP);
    play.perform(effects);
    play.show();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => play.run(cmd),
                    Err(msg) => println!("{msg}"),
                }
            }
            Some(reply) = replies.recv() => play.engine_reply(reply),
        }
    }

    play.handle.shutdown().await;
    Ok(())
}

fn open_session(args: &Args, config: &GameConfig) -> Result<(Session, Vec<Effect>)> {
    if let Some(path) = &args.load {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let snapshot = SessionSnapshot::from_json(&text)?;
        info!(path = %path.display(), plies = snapshot.moves_uci.len(), "resuming saved game");
        return Ok(Session::from_snapshot(&config.session, &snapshot)?);
    }
    if let Some(fen) = &args.fen {
        let start = Position::from_fen(fen).with_context(|| format!("bad --fen '{fen}'"))?;
        let setup = GameSetup {
            start,
            ..GameSetup::from(&config.session)
        };
        return Ok(Session::with_setup(&config.session, setup));
    }
    Ok(Session::start(&config.session))
}

/// The configured engine, or random moves if it cannot be started.
async fn open_source(args: &Args, config: &GameConfig) -> Box<dyn MoveSource> {
    if args.random {
        return Box::new(RandomMover::new());
    }
    let mut engine = UciEngine::new(config.engine.clone());
    match engine.start().await {
        Ok(()) => {
            info!(engine = engine.name(), "engine started");
            Box::new(engine)
        }
        Err(err) => {
            warn!(
                %err,
                path = %config.engine.path.display(),
                "no engine, falling back to random moves"
            );
            println!("could not start {}: {err}", config.engine.path.display());
            println!("playing against random moves instead");
            Box::new(RandomMover::new())
        }
    }
}

struct Play {
    session: Session,
    adapter: InteractionAdapter,
    handle: BridgeHandle,
}

impl Play {
    fn run(&mut self, cmd: Command) {
        match cmd {
            Command::Help => println!("{}", commands::HELP),
            Command::Board => self.show(),
            Command::Moves => println!("{}", self.session.move_list()),
            Command::Pick(sq) => self.pointer(PointerEvent::PickUp(sq)),
            Command::Drop(sq) => self.pointer(PointerEvent::Release(sq)),
            Command::Click(sq) => self.pointer(PointerEvent::Click(sq)),
            Command::Move {
                from,
                to,
                promotion,
            } => {
                if !self.session.is_viewing_latest() {
                    println!("looking at an earlier position, type `latest` to play on");
                    return;
                }
                if let Some(kind) = promotion {
                    self.session.set_promotion(kind);
                }
                let plies = self.session.history().len();
                self.input(Input::Deselect);
                self.input(Input::Select(from));
                if self.session.selected() == Some(from) {
                    self.input(Input::Select(to));
                }
                if self.session.history().len() == plies {
                    self.input(Input::Deselect);
                    println!("{from}{to} is not a legal move here");
                }
                self.show();
            }
            Command::Promote(kind) => {
                self.session.set_promotion(kind);
                println!("promoting to {kind:?} from now on");
            }
            Command::Resign => {
                self.input(Input::Resign);
                self.show();
            }
            Command::New { color, strength } => {
                let setup = GameSetup {
                    human_color: color.unwrap_or(self.session.human_color()),
                    strength: strength.unwrap_or(self.session.strength()),
                    start: Position::startpos(),
                };
                self.handle.new_game();
                self.input(Input::NewGame(setup));
                self.show();
            }
            Command::Undo => {
                self.input(Input::Undo);
                self.show();
            }
            Command::Retry => {
                self.input(Input::RetryBot);
                self.show();
            }
            Command::Prev => {
                self.input(Input::ViewPrev);
                self.show();
            }
            Command::Next => {
                self.input(Input::ViewNext);
                self.show();
            }
            Command::Latest => {
                self.input(Input::ViewLatest);
                self.show();
            }
            Command::Save(path) => match self.save(&path) {
                Ok(()) => println!("saved to {}", path.display()),
                Err(err) => println!("{err:#}"),
            },
            Command::Quit => {}
        }
    }

    fn pointer(&mut self, event: PointerEvent) {
        if let Some(input) = self.adapter.translate(event, &self.session) {
            self.input(input);
        }
        self.show();
    }

    fn engine_reply(&mut self, reply: Reply) {
        let plies = self.session.history().len();
        self.input(Input::EngineReply {
            ticket: reply.ticket,
            result: reply.result,
        });
        if self.session.history().len() != plies || self.session.outcome().is_over() {
            self.show();
        }
    }

    fn input(&mut self, input: Input) {
        let effects = self.session.handle(input);
        self.perform(effects);
    }

    fn perform(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestMove {
                    ticket,
                    position,
                    strength,
                } => self.handle.request(ticket, position, strength),
                Effect::CancelRequest { ticket } => self.handle.cancel(ticket),
                Effect::MovePlayed { by, san } => println!("{by} plays {san}"),
                Effect::GameEnded(outcome) => println!("{outcome} ({})", outcome.result_tag()),
                Effect::EngineTrouble(message) => {
                    println!("engine problem: {message}");
                    if let EngineStatus::Unavailable(_) = self.session.engine_status() {
                        println!("type `retry` to ask again");
                    }
                }
            }
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        let json = self.session.snapshot().to_json();
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    fn show(&self) {
        println!();
        print!("{}", render::board(&self.session));
        println!("{}", render::status(&self.session));
    }
}
