//! Repetition keys.
//!
//! Positions that agree on placement, side to move, castling rights and
//! en-passant square are repetitions of each other. Every such feature owns a
//! fixed pseudo-random word; a position's key is the XOR of the words of the
//! features it has.

use crate::board::Position;
use crate::types::{Color, Piece, Square};

const PIECE_SQUARES: usize = 2 * 6 * 64;
const BLACK_TO_MOVE: usize = PIECE_SQUARES;
const CASTLING: usize = BLACK_TO_MOVE + 1;
const EP_FILE: usize = CASTLING + 4;
const WORDS: usize = EP_FILE + 8;

/// Feature words, built at compile time.
pub struct RepetitionTable {
    words: [u64; WORDS],
}

/// SplitMix64 output for step `i`; distinct inputs give distinct words.
const fn splitmix(i: u64) -> u64 {
    let mut z = (i + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl RepetitionTable {
    const fn build() -> Self {
        let mut words = [0u64; WORDS];
        let mut i = 0;
        while i < WORDS {
            words[i] = splitmix(i as u64);
            i += 1;
        }
        RepetitionTable { words }
    }

    pub fn piece(&self, piece: Piece, sq: Square) -> u64 {
        let slot = (piece.color.idx() * 6 + piece.kind.idx()) * 64 + sq.index();
        self.words[slot]
    }

    pub fn black_to_move(&self) -> u64 {
        self.words[BLACK_TO_MOVE]
    }

    /// `right`: 0 white king side, 1 white queen side, 2 and 3 likewise for
    /// Black.
    pub fn castling(&self, right: usize) -> u64 {
        self.words[CASTLING + right]
    }

    pub fn ep_file(&self, file: u8) -> u64 {
        self.words[EP_FILE + file as usize]
    }

    pub fn all_words(&self) -> &[u64] {
        &self.words
    }
}

pub static ZOBRIST: RepetitionTable = RepetitionTable::build();

impl Position {
    /// Equal for positions that repeat each other. Move clocks do not
    /// contribute.
    pub fn repetition_key(&self) -> u64 {
        let placement = self
            .pieces()
            .fold(0u64, |key, (sq, pc)| key ^ ZOBRIST.piece(pc, sq));
        let side = match self.side_to_move {
            Color::White => 0,
            Color::Black => ZOBRIST.black_to_move(),
        };
        let rights = [
            self.castling.wk,
            self.castling.wq,
            self.castling.bk,
            self.castling.bq,
        ]
        .into_iter()
        .enumerate()
        .filter(|&(_, on)| on)
        .fold(0u64, |key, (i, _)| key ^ ZOBRIST.castling(i));
        // The ep square counts whenever set, even if no capture is possible.
        let ep = self.en_passant.map_or(0, |sq| ZOBRIST.ep_file(sq.file()));
        placement ^ side ^ rights ^ ep
    }
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
