//! Player hands.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Suit};

/// An ordered collection of cards held by one seat.
///
/// Cards are addressed by 0-based index in the order they were received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the card at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// The suit held most often, ties broken by canonical suit order.
    ///
    /// Returns `None` for an empty hand.
    #[must_use]
    pub fn dominant_suit(&self) -> Option<Suit> {
        Suit::ALL
            .iter()
            .copied()
            .map(|suit| (suit, self.cards.iter().filter(|c| c.suit() == suit).count()))
            .filter(|&(_, count)| count > 0)
            .fold(None, |best: Option<(Suit, usize)>, (suit, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((suit, count)),
            })
            .map(|(suit, _)| suit)
    }
}

impl fmt::Display for Hand {
    /// Numbered listing, 1-based to match the play command.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", i + 1, card)?;
        }
        Ok(())
    }
}
