//! Typed game events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};
use crate::core::{Direction, Seat, SeatMap};

/// Everything the engine reports to the outside world.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// Cards are dealt and the first card is face up.
    GameStarted { players: usize, seed: u64, top: Card },

    TurnStarted { seat: Seat, turn: u32 },

    CardPlayed { seat: Seat, card: Card },

    /// `forced` is set when an effect made the seat draw.
    CardsDrawn { seat: Seat, count: usize, forced: bool },

    /// The deck was rebuilt from `moved` buried discards.
    DeckRefilled { moved: usize },

    DirectionReversed { direction: Direction },

    TurnSkipped { seat: Seat },

    SuitChosen { seat: Seat, suit: Suit },

    HandShown { seat: Seat, cards: Vec<Card> },

    /// A syntactically valid play broke the rules.
    PlayRejected { seat: Seat, reason: String },

    /// Human input could not be understood.
    InputError { seat: Seat, message: String },

    GameOver { winner: Seat, scores: SeatMap<i64> },

    /// The game was cancelled before anyone won.
    Cancelled { turn: u32 },
}

impl GameEvent {
    /// Whether no further events will follow.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. } | GameEvent::Cancelled { .. })
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted { players, top, .. } => {
                write!(f, "game started with {players} players, {top} face up")
            }
            GameEvent::TurnStarted { seat, turn } => write!(f, "turn {turn}: {seat} to play"),
            GameEvent::CardPlayed { seat, card } => write!(f, "{seat} plays {card}"),
            GameEvent::CardsDrawn { seat, count, forced } => {
                let verb = if *forced { "is forced to draw" } else { "draws" };
                let noun = if *count == 1 { "card" } else { "cards" };
                write!(f, "{seat} {verb} {count} {noun}")
            }
            GameEvent::DeckRefilled { moved } => write!(f, "deck rebuilt from {moved} discarded cards"),
            GameEvent::DirectionReversed { direction } => write!(f, "play now goes {direction:?}"),
            GameEvent::TurnSkipped { seat } => write!(f, "{seat} is skipped"),
            GameEvent::SuitChosen { seat, suit } => write!(f, "{seat} calls {suit}"),
            GameEvent::HandShown { seat, cards } => write!(f, "{seat} looks at {} cards", cards.len()),
            GameEvent::PlayRejected { seat, reason } => write!(f, "{seat}: play rejected, {reason}"),
            GameEvent::InputError { seat, message } => write!(f, "{seat}: {message}"),
            GameEvent::GameOver { winner, .. } => write!(f, "{winner} wins"),
            GameEvent::Cancelled { turn } => write!(f, "game cancelled on turn {turn}"),
        }
    }
}
