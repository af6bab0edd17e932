//! Players and the sources of their decisions.
//!
//! - `Player`: a seat, a hand and a `PlayerKind` (human or automated)
//! - `Strategy`: decision algorithm injected into automated players
//! - `Controller`: external text input for human players

pub mod controller;
pub mod player;
pub mod strategy;

pub use controller::{Command, CommandError, Controller, ControllerError, LineController, ScriptedController};
pub use player::{Decision, Player, PlayerKind};
pub use strategy::{HoldWildStrategy, NaiveStrategy, RandomStrategy, Strategy};
