//! # eights
//!
//! A rule-configurable engine for "eights"-family shedding games: match the
//! discard pile's suit or rank, let special ranks do their thing, empty your
//! hand first.
//!
//! ## Design Principles
//!
//! 1. **Effects Are Data**: A `RuleSet` maps every rank to an `EffectKind`.
//!    The engine resolves whatever the played card carries; no rank is
//!    special-cased in the turn loop.
//!
//! 2. **N-Player First**: Seats, turn order and per-seat data all take the
//!    player count as context.
//!
//! 3. **One Decision Contract**: Humans and automated players are the same
//!    `Player` type with a different `PlayerKind`. The engine validates
//!    every decision identically.
//!
//! 4. **Events Out, Commands In**: The engine never renders. It emits typed
//!    `GameEvent`s to `Notifier`s and reads human text through a
//!    `Controller`.
//!
//! ## Modules
//!
//! - `core`: seats, turn state, actions, RNG, rule configuration
//! - `cards`: suits, ranks, cards
//! - `zones`: deck, discard pile, hands and the refill procedure
//! - `effects`: effect taxonomy and resolution
//! - `rules`: play legality and scoring
//! - `players`: players, strategies, controllers
//! - `events`: typed events and subscribers
//! - `engine`: the turn loop, pacing and cancellation

pub mod cards;
pub mod core;
pub mod effects;
pub mod engine;
pub mod events;
pub mod players;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, Direction, GameRng, RuleSet, RuleSetBuilder, RuleSetError, RuleSetFile, ScoringMode, Seat, SeatMap,
    TableView, TurnState,
};

pub use crate::cards::{Card, Rank, Suit};

pub use crate::zones::{Deck, DiscardPile, Hand, PileError, Table};

pub use crate::effects::{EffectKind, EffectResolver};

pub use crate::rules::{is_playable, Rejection};

pub use crate::players::{
    Command, CommandError, Controller, ControllerError, HoldWildStrategy, LineController, NaiveStrategy, Player,
    PlayerKind, RandomStrategy, ScriptedController, Strategy,
};

pub use crate::events::{EventLog, GameEvent, Notifier, TracingNotifier};

pub use crate::engine::{CancelToken, EngineConfig, EngineError, GameEngine, GameOutcome, Phase, ThinkDelay};
