//! A human-vs-engine chess game as an explicit state machine.
//!
//! [`Session`] consumes typed [`Input`]s and returns [`Effect`]s for the host
//! to carry out, such as asking the engine bridge for a move. Pointer events
//! from a board widget go through [`InteractionAdapter`] first.

pub mod config;
pub mod history;
pub mod interaction;
pub mod session;
pub mod snapshot;

pub use config::{ConfigError, EnginePolicy, GameConfig, SessionConfig, ViolationPolicy};
pub use history::{History, HistoryEntry};
pub use interaction::{
    highlights, square_at, square_origin, BoardGeometry, Highlights, InteractionAdapter,
    PointerEvent,
};
pub use session::{EngineStatus, Effect, GameSetup, Input, Session, SessionState};
pub use snapshot::{SessionSnapshot, SnapshotError};
