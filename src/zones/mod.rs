//! Card locations: draw pile, discard pile, hands.
//!
//! Every card of the game lives in exactly one of these for the whole
//! game. Cards move only by:
//! - dealing and drawing (deck → hand)
//! - playing (hand → discard pile)
//! - refilling (buried discards → deck)
//!
//! so `deck + discard + Σ hands` never changes once the deck is built.

mod deck;
mod discard;
mod hand;
mod table;

pub use deck::Deck;
pub use discard::DiscardPile;
pub use hand::Hand;
pub use table::{Draw, Table};

use thiserror::Error;

/// Pile access failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PileError {
    #[error("the draw pile is empty")]
    EmptyDeck,

    #[error("the discard pile has not been seeded")]
    EmptyDiscard,
}
