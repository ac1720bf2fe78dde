//! Record of the moves played in a game.

use chess_core::{Color, Move, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub before: Position,
    pub mv: Move,
    pub san: String,
    pub after: Position,
}

/// The starting position plus every ply since, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct History {
    start: Position,
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new(start: Position) -> Self {
        History {
            start,
            entries: Vec::new(),
        }
    }

    pub fn start(&self) -> &Position {
        &self.start
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Position after the latest ply.
    pub fn current(&self) -> &Position {
        self.entries.last().map_or(&self.start, |e| &e.after)
    }

    /// Position after `ply` plies; `0` is the start. Used to step back and
    /// forth through a finished game.
    pub fn position_at(&self, ply: usize) -> Option<&Position> {
        match ply {
            0 => Some(&self.start),
            n => self.entries.get(n - 1).map(|e| &e.after),
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Drop every ply after the first `plies`.
    pub fn truncate(&mut self, plies: usize) {
        self.entries.truncate(plies);
    }

    /// How many times a position with this repetition key has been reached,
    /// counting the start.
    pub fn occurrences(&self, key: u64) -> usize {
        std::iter::once(&self.start)
            .chain(self.entries.iter().map(|e| &e.after))
            .filter(|p| p.repetition_key() == key)
            .count()
    }

    /// Index of the most recent ply made by `color`.
    pub fn last_ply_by(&self, color: Color) -> Option<usize> {
        self.entries
            .iter()
            .rposition(|e| e.before.side_to_move == color)
    }

    pub fn uci_moves(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.mv.to_string()).collect()
    }

    pub fn san_moves(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.san.clone()).collect()
    }

    /// Numbered SAN move list, e.g. `1. e4 e5 2. Nf3`.
    pub fn move_list(&self) -> String {
        let mut out = String::new();
        for (i, e) in self.entries.iter().enumerate() {
            let number = e.before.fullmove_number;
            match e.before.side_to_move {
                Color::White => {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&format!("{number}. {}", e.san));
                }
                Color::Black if i == 0 => out.push_str(&format!("{number}... {}", e.san)),
                Color::Black => {
                    out.push(' ');
                    out.push_str(&e.san);
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
