//! Core engine types: seats, turn state, actions, RNG, rule configuration.

pub mod action;
pub mod config;
pub mod rng;
pub mod seat;
pub mod state;

pub use action::Action;
pub use config::{RuleSet, RuleSetBuilder, RuleSetError, RuleSetFile, ScoringMode};
pub use rng::GameRng;
pub use seat::{Direction, Seat, SeatMap};
pub use state::{TableView, TurnState};
