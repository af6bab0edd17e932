//! Decision algorithms for automated players.
//!
//! A `Strategy` only ever sees its own hand and the read-only `TableView`.
//! The engine re-validates whatever it returns, so a strategy cannot break
//! the rules, only play badly.

use crate::cards::Suit;
use crate::core::{Action, GameRng, TableView};
use crate::rules::playable_indices;
use crate::zones::Hand;

/// Pluggable decision algorithm for an automated player.
pub trait Strategy: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Pick a play or a draw.
    fn choose_action(&mut self, hand: &Hand, view: &TableView<'_>) -> Action;

    /// Pick the suit to force after playing a wildcard.
    ///
    /// Defaults to the suit most represented in the remaining hand.
    fn choose_suit(&mut self, hand: &Hand, view: &TableView<'_>) -> Suit {
        hand.dominant_suit().unwrap_or_else(|| view.suit_to_follow())
    }
}

/// Plays the first playable card in hand order, otherwise draws.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveStrategy;

impl Strategy for NaiveStrategy {
    fn name(&self) -> &str {
        "naive"
    }

    fn choose_action(&mut self, hand: &Hand, view: &TableView<'_>) -> Action {
        playable_indices(hand, view.top, view.turn.forced_suit)
            .first()
            .map_or(Action::Draw, |&index| Action::play(index))
    }
}

/// Plays a uniformly random playable card, otherwise draws.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_action(&mut self, hand: &Hand, view: &TableView<'_>) -> Action {
        let playable = playable_indices(hand, view.top, view.turn.forced_suit);
        self.rng
            .choose(&playable)
            .map_or(Action::Draw, |&index| Action::play(index))
    }
}

/// Keeps wildcards for last and leads with cards that hurt the next seat.
///
/// Preference order among playable cards:
/// 1. natural cards that force a draw or skip the next seat
/// 2. any other natural card
/// 3. wildcards
///
/// Once the next seat is down to its last card, wildcards move ahead of
/// plain naturals so the suit can be switched away from them.
#[derive(Clone, Copy, Debug, Default)]
pub struct HoldWildStrategy;

impl Strategy for HoldWildStrategy {
    fn name(&self) -> &str {
        "hold-wild"
    }

    fn choose_action(&mut self, hand: &Hand, view: &TableView<'_>) -> Action {
        let playable = playable_indices(hand, view.top, view.turn.forced_suit);
        let (natural, wild) = if view.next_hand_size() <= 1 { (2, 1) } else { (1, 2) };

        let ranked = playable.iter().copied().filter_map(|index| {
            let card = hand.get(index)?;
            let preference = if card.is_wild() {
                wild
            } else if card.effect().targets_next() {
                0
            } else {
                natural
            };
            Some((preference, index))
        });

        ranked
            .min()
            .map_or(Action::Draw, |(_, index)| Action::play(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank};
    use crate::core::TurnState;
    use crate::effects::EffectKind;
    use smallvec::SmallVec;

    fn view<'a>(top: &'a Card, turn: &'a TurnState) -> TableView<'a> {
        TableView {
            top,
            turn,
            deck_len: 20,
            discard_len: 1,
            hand_sizes: SmallVec::from_slice(&[3, 3]),
        }
    }

    fn wild(suit: Suit) -> Card {
        Card::new(suit, Rank::Eight, EffectKind::ChooseSuit)
    }

    #[test]
    fn test_naive_plays_first_playable() {
        let top = Card::plain(Suit::Hearts, Rank::Four);
        let turn = TurnState::new(2);
        let hand = Hand::from_cards([
            Card::plain(Suit::Spades, Rank::Nine),
            Card::plain(Suit::Hearts, Rank::Nine),
            Card::plain(Suit::Hearts, Rank::Ten),
        ]);

        assert_eq!(NaiveStrategy.choose_action(&hand, &view(&top, &turn)), Action::play(1));
    }

    #[test]
    fn test_naive_draws_without_playable() {
        let top = Card::plain(Suit::Hearts, Rank::Four);
        let turn = TurnState::new(2);
        let hand = Hand::from_cards([Card::plain(Suit::Spades, Rank::Nine)]);

        assert_eq!(NaiveStrategy.choose_action(&hand, &view(&top, &turn)), Action::Draw);
    }

    #[test]
    fn test_naive_follows_forced_suit() {
        let top = wild(Suit::Hearts);
        let mut turn = TurnState::new(2);
        turn.forced_suit = Some(Suit::Clubs);
        let hand = Hand::from_cards([
            Card::plain(Suit::Hearts, Rank::Nine),
            Card::plain(Suit::Clubs, Rank::Two),
        ]);

        assert_eq!(NaiveStrategy.choose_action(&hand, &view(&top, &turn)), Action::play(1));
    }

    #[test]
    fn test_random_only_picks_playable() {
        let top = Card::plain(Suit::Hearts, Rank::Four);
        let turn = TurnState::new(2);
        let hand = Hand::from_cards([
            Card::plain(Suit::Spades, Rank::Nine),
            Card::plain(Suit::Hearts, Rank::Nine),
            Card::plain(Suit::Clubs, Rank::Ten),
            Card::plain(Suit::Diamonds, Rank::Four),
        ]);
        let mut strategy = RandomStrategy::new(11);

        for _ in 0..50 {
            let action = strategy.choose_action(&hand, &view(&top, &turn));
            assert!(matches!(action, Action::Play { index: 1 | 3 }), "unexpected {action:?}");
        }
    }

    #[test]
    fn test_hold_wild_prefers_punishing_then_natural() {
        let top = Card::plain(Suit::Hearts, Rank::Four);
        let turn = TurnState::new(2);
        let hand = Hand::from_cards([
            wild(Suit::Spades),
            Card::plain(Suit::Hearts, Rank::Nine),
            Card::new(Suit::Hearts, Rank::Jack, EffectKind::SkipNext),
        ]);
        let mut strategy = HoldWildStrategy;

        assert_eq!(strategy.choose_action(&hand, &view(&top, &turn)), Action::play(2));

        let hand = Hand::from_cards([wild(Suit::Spades), Card::plain(Suit::Hearts, Rank::Nine)]);
        assert_eq!(strategy.choose_action(&hand, &view(&top, &turn)), Action::play(1));

        let hand = Hand::from_cards([Card::plain(Suit::Clubs, Rank::Nine), wild(Suit::Spades)]);
        assert_eq!(strategy.choose_action(&hand, &view(&top, &turn)), Action::play(1));
    }

    #[test]
    fn test_hold_wild_switches_suit_when_next_seat_is_on_last_card() {
        let top = Card::plain(Suit::Hearts, Rank::Four);
        let turn = TurnState::new(2);
        let mut last_card = view(&top, &turn);
        last_card.hand_sizes = SmallVec::from_slice(&[3, 1]);
        let hand = Hand::from_cards([Card::plain(Suit::Hearts, Rank::Nine), wild(Suit::Spades)]);
        let mut strategy = HoldWildStrategy;

        assert_eq!(strategy.choose_action(&hand, &last_card), Action::play(1));
        assert_eq!(strategy.choose_action(&hand, &view(&top, &turn)), Action::play(0));

        let hand = Hand::from_cards([
            wild(Suit::Spades),
            Card::new(Suit::Hearts, Rank::Two, EffectKind::force_draw(2)),
        ]);
        assert_eq!(strategy.choose_action(&hand, &last_card), Action::play(1));
    }

    #[test]
    fn test_choose_suit_uses_dominant_suit() {
        let top = Card::plain(Suit::Hearts, Rank::Four);
        let turn = TurnState::new(2);
        let hand = Hand::from_cards([
            Card::plain(Suit::Clubs, Rank::Nine),
            Card::plain(Suit::Clubs, Rank::Two),
            Card::plain(Suit::Spades, Rank::Two),
        ]);

        assert_eq!(NaiveStrategy.choose_suit(&hand, &view(&top, &turn)), Suit::Clubs);
        assert_eq!(NaiveStrategy.choose_suit(&Hand::new(), &view(&top, &turn)), Suit::Hearts);
    }
}
