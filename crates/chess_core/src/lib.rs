//! Chess rules: board representation, legal move generation, notation and
//! game-termination rules.
//!
//! Everything here is pure and synchronous. A [`Position`] is a value; playing
//! a move produces a new one.

pub mod attacks;
pub mod board;
pub mod draw;
pub mod errors;
pub mod fen;
pub mod movegen;
pub mod outcome;
pub mod perft;
pub mod san;
pub mod types;
pub mod uci;
pub mod zobrist;

pub use attacks::{is_in_check, is_square_attacked};
pub use board::*;
pub use errors::{FenError, IllegalMoveError};
pub use movegen::*;
pub use outcome::{adjudicate, GameOutcome};
pub use perft::{perft, perft_divide};
pub use san::to_san;
pub use types::*;
pub use uci::*;
pub use zobrist::ZOBRIST;
