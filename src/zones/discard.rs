//! Discard pile.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

use super::PileError;

/// The face-up pile of played cards. The last card pushed is the top.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DiscardPile {
    cards: Vector<Card>,
}

impl DiscardPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pile from cards given bottom first.
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

    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// The active card every play is checked against.
    pub fn top(&self) -> Result<&Card, PileError> {
        self.cards.back().ok_or(PileError::EmptyDiscard)
    }

    /// Remove every card except the top one, returning them bottom first.
    pub fn take_buried(&mut self) -> Vector<Card> {
        if self.cards.len() <= 1 {
            return Vector::new();
        }
        let top = self.cards.split_off(self.cards.len() - 1);
        std::mem::replace(&mut self.cards, top)
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_top_is_last_pushed() {
        let mut pile = DiscardPile::new();
        assert_eq!(pile.top(), Err(PileError::EmptyDiscard));

        pile.push(Card::plain(Suit::Clubs, Rank::Five));
        pile.push(Card::plain(Suit::Clubs, Rank::Nine));

        assert_eq!(pile.top().unwrap(), &Card::plain(Suit::Clubs, Rank::Nine));
        assert_eq!(pile.len(), 2);
    }

    #[test]
    fn test_take_buried_keeps_top() {
        let mut pile = DiscardPile::from_cards([
            Card::plain(Suit::Hearts, Rank::Ace),
            Card::plain(Suit::Hearts, Rank::Two),
            Card::plain(Suit::Hearts, Rank::Three),
        ]);

        let buried = pile.take_buried();

        assert_eq!(buried.len(), 2);
        assert_eq!(buried[0], Card::plain(Suit::Hearts, Rank::Ace));
        assert_eq!(pile.len(), 1);
        assert_eq!(pile.top().unwrap(), &Card::plain(Suit::Hearts, Rank::Three));
    }

    #[test]
    fn test_take_buried_single_card() {
        let mut pile = DiscardPile::from_cards([Card::plain(Suit::Hearts, Rank::Ace)]);
        assert!(pile.take_buried().is_empty());
        assert_eq!(pile.len(), 1);
        assert!(DiscardPile::new().take_buried().is_empty());
    }
}
