//! Minimal UCI engine that plays random legal moves.
//!
//! Stands in for a real engine when none is installed, and drives the bridge
//! integration tests.
//!
//! Usage: random_uci [--illegal] [--delay-ms N]

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use chess_core::{play_uci_moves, Position};
use clap::Parser;
use engine_bridge::RandomMover;

#[derive(Parser, Debug)]
#[command(name = "random_uci", about = "UCI engine that plays random legal moves")]
struct Options {
    /// Answer every `go` with a move that is never legal.
    #[arg(long)]
    illegal: bool,

    /// Pause this many milliseconds before answering `go`.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
}

impl Options {
    fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }
}

/// `position startpos|fen <fen> [moves ...]`, without the leading keyword.
fn parse_position(parts: &[&str]) -> Option<Position> {
    let (head, moves) = match parts.iter().position(|&p| p == "moves") {
        Some(i) => (&parts[..i], &parts[i + 1..]),
        None => (parts, &[][..]),
    };
    let mut pos = match head.first() {
        Some(&"startpos") => Position::startpos(),
        Some(&"fen") => Position::from_fen(&head[1..].join(" ")).ok()?,
        _ => return None,
    };
    play_uci_moves(&mut pos, moves.iter().copied());
    Some(pos)
}

fn main() {
    let opts = Options::parse();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut mover = RandomMover::new();
    let mut pos = Position::startpos();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "uci" => {
                writeln!(stdout, "id name random_uci").ok();
                writeln!(stdout, "id author chess_play").ok();
                writeln!(
                    stdout,
                    "option name Skill Level type spin default 20 min 0 max 20"
                )
                .ok();
                writeln!(stdout, "uciok").ok();
                stdout.flush().ok();
            }
            "isready" => {
                writeln!(stdout, "readyok").ok();
                stdout.flush().ok();
            }
            "ucinewgame" => pos = Position::startpos(),
            "position" => {
                if let Some(p) = parse_position(&parts[1..]) {
                    pos = p;
                }
            }
            "go" => {
                if let Some(delay) = opts.delay() {
                    thread::sleep(delay);
                }
                let reply = if opts.illegal {
                    "a1a1".to_string()
                } else {
                    match mover.pick(&pos) {
                        Some(mv) => mv.to_string(),
                        None => "0000".to_string(),
                    }
                };
                writeln!(stdout, "info depth 1 nodes 1").ok();
                writeln!(stdout, "bestmove {reply}").ok();
                stdout.flush().ok();
            }
            "quit" => break,
            // setoption, stop and anything else need no action here
            _ => {}
        }
    }
}
