//! End-of-game scoring.

use crate::cards::Card;
use crate::core::{ScoringMode, Seat, SeatMap};
use crate::zones::Hand;

/// Value of a wildcard left in hand.
pub const WILDCARD_POINTS: i64 = 50;

/// Value of a single card left in hand.
#[must_use]
pub fn card_value(card: &Card) -> i64 {
    if card.is_wild() {
        WILDCARD_POINTS
    } else {
        card.rank().points()
    }
}

#[must_use]
pub fn hand_value(hand: &Hand) -> i64 {
    hand.iter().map(card_value).sum()
}

/// Score every seat once `winner` has emptied their hand.
pub fn score<'a>(
    mode: ScoringMode,
    winner: Seat,
    hands: impl IntoIterator<Item = &'a Hand>,
) -> SeatMap<i64> {
    let values: Vec<i64> = hands.into_iter().map(hand_value).collect();

    match mode {
        ScoringMode::Positive => {
            let pot: i64 = values
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != winner.index())
                .map(|(_, v)| v)
                .sum();
            SeatMap::new(values.len(), |seat| if seat == winner { pot } else { 0 })
        }
        ScoringMode::Negative => values.into_iter().map(|v| -v).collect(),
    }
}
