//! The shared piles and the refill procedure.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Card;
use crate::core::GameRng;

use super::{Deck, DiscardPile, PileError};

/// The draw pile and the discard pile, owned together so a refill can
/// move cards between them atomically.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Table {
    pub deck: Deck,
    pub discard: DiscardPile,
}

/// What a single draw did to the piles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draw {
    pub card: Card,
    /// Cards moved from the discard pile into the deck before drawing, if a refill happened.
    pub refilled: Option<usize>,
}

impl Table {
    #[must_use]
    pub fn new(deck: Deck, discard: DiscardPile) -> Self {
        Self { deck, discard }
    }

    /// Total cards across both piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard.len()
    }

    /// Rebuild the deck from every discard except the top, shuffled.
    ///
    /// Returns the number of cards moved. The discard pile keeps only its top.
    pub fn refill(&mut self, rng: &mut GameRng) -> usize {
        let buried = self.discard.take_buried();
        let moved = buried.len();
        self.deck.extend(buried);
        self.deck.shuffle(rng);
        debug!(moved, deck = self.deck.len(), "refilled deck from discard pile");
        moved
    }

    /// Draw the top card, refilling from the discard pile once if the deck is empty.
    ///
    /// A deck that is still empty after the refill yields `PileError::EmptyDeck`.
    pub fn draw(&mut self, rng: &mut GameRng) -> Result<Draw, PileError> {
        match self.deck.draw_top() {
            Ok(card) => Ok(Draw { card, refilled: None }),
            Err(PileError::EmptyDeck) => {
                let moved = self.refill(rng);
                let card = self.deck.draw_top()?;
                Ok(Draw {
                    card,
                    refilled: Some(moved),
                })
            }
            Err(other) => Err(other),
        }
    }
}
