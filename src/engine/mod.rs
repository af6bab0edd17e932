//! The game engine: turn loop, pacing and cancellation.
//!
//! - `GameEngine`: owns the game state and steps through the phases
//! - `EngineConfig`: seed, thinking delay, turn limit
//! - `CancelToken`: stops a game from another thread

mod cancel;
mod config;
mod game;

pub use cancel::CancelToken;
pub use config::{EngineConfig, ThinkDelay};
pub use game::{EngineError, GameEngine, GameOutcome, Phase};
