//! Play legality.
//!
//! A card may be played when it matches the suit to follow (the discard
//! top's suit, or the suit forced by the last wildcard), matches the top's
//! rank, or is itself a wildcard.

use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::{Card, Suit};
use crate::zones::Hand;

/// Why a play was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("card {position} does not exist, the hand holds {hand_len} cards")]
    IndexOutOfRange { position: usize, hand_len: usize },

    #[error("{card} cannot be played on {top} (follow {suit_to_follow} or match rank)")]
    NotPlayable {
        card: Card,
        top: Card,
        suit_to_follow: Suit,
    },
}

/// Whether `card` may be played on `top` with `forced_suit` in force.
#[must_use]
pub fn is_playable(card: &Card, top: &Card, forced_suit: Option<Suit>) -> bool {
    let suit_to_follow = forced_suit.unwrap_or_else(|| top.suit());
    card.is_wild() || card.suit() == suit_to_follow || card.rank() == top.rank()
}

/// Validate playing the card at `index` (0-based).
pub fn check_play<'h>(
    hand: &'h Hand,
    index: usize,
    top: &Card,
    forced_suit: Option<Suit>,
) -> Result<&'h Card, Rejection> {
    let card = hand.get(index).ok_or(Rejection::IndexOutOfRange {
        position: index + 1,
        hand_len: hand.len(),
    })?;

    if is_playable(card, top, forced_suit) {
        Ok(card)
    } else {
        Err(Rejection::NotPlayable {
            card: card.clone(),
            top: top.clone(),
            suit_to_follow: forced_suit.unwrap_or_else(|| top.suit()),
        })
    }
}

/// Indices of every playable card, in hand order.
#[must_use]
pub fn playable_indices(hand: &Hand, top: &Card, forced_suit: Option<Suit>) -> SmallVec<[usize; 8]> {
    hand.iter()
        .enumerate()
        .filter(|(_, card)| is_playable(card, top, forced_suit))
        .map(|(i, _)| i)
        .collect()
}
