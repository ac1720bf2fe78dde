//! Asks an external UCI engine, or a stand-in, for moves at a chosen
//! playing strength.
//!
//! [`EngineBridge`] validates every answer against the rules before handing
//! it back. [`BridgeHandle`] runs a bridge on a background task so a caller
//! can fire off a request and keep going.

pub mod bridge;
pub mod config;
pub mod error;
pub mod protocol;
pub mod source;
pub mod strength;
pub mod uci_engine;
pub mod worker;

pub use bridge::{validate_reply, EngineBridge};
pub use config::EngineConfig;
pub use error::EngineError;
pub use source::{MoveSource, RandomMover};
pub use strength::{Strength, StrengthProfile, StrengthTable};
pub use uci_engine::UciEngine;
pub use worker::{BridgeHandle, Reply, Ticket};
