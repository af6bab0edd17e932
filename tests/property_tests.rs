//! Property-based tests for legality, turn order, refills and conservation.

use proptest::prelude::*;

use eights::core::{Direction, TurnState};
use eights::rules::{check_play, playable_indices, score};
use eights::{
    Card, Deck, DiscardPile, EffectKind, EngineConfig, GameEngine, GameRng, Hand, Player, RandomStrategy, Rank,
    RuleSet, ScoringMode, Seat, Suit, Table,
};

fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::STANDARD.to_vec())
}

/// A card that is either plain or an eight-style wildcard.
fn card() -> impl Strategy<Value = Card> {
    (suit(), rank(), prop::bool::weighted(0.1)).prop_map(|(suit, rank, wild)| {
        if wild {
            Card::new(suit, rank, EffectKind::ChooseSuit)
        } else {
            Card::plain(suit, rank)
        }
    })
}

fn hand() -> impl Strategy<Value = Hand> {
    prop::collection::vec(card(), 0..12).prop_map(Hand::from_cards)
}

fn sorted(cards: impl IntoIterator<Item = Card>) -> Vec<(Suit, Rank)> {
    let mut keys: Vec<(Suit, Rank)> = cards.into_iter().map(|c| (c.suit(), c.rank())).collect();
    keys.sort();
    keys
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: every playable card follows the suit, matches the rank, or is wild,
    /// and every such card is playable.
    #[test]
    fn prop_playable_matches_rule(
        hand in hand(),
        top in card(),
        forced in proptest::option::of(suit()),
    ) {
        let playable = playable_indices(&hand, &top, forced);
        let suit_to_follow = forced.unwrap_or_else(|| top.suit());

        for (i, c) in hand.iter().enumerate() {
            let expected = c.is_wild() || c.suit() == suit_to_follow || c.rank() == top.rank();
            prop_assert_eq!(playable.contains(&i), expected, "card {} on {}", c, top);
            prop_assert_eq!(check_play(&hand, i, &top, forced).is_ok(), expected);
        }
        prop_assert!(check_play(&hand, hand.len(), &top, forced).is_err());
    }

    /// Property: reversing twice restores the direction and the next seat.
    #[test]
    fn prop_reverse_twice_is_identity(players in 2usize..=12, active in 0usize..12, flips in 0u32..6) {
        let mut state = TurnState::new(players);
        state.active = Seat::new((active % players) as u8);
        for _ in 0..flips {
            state.reverse();
        }
        let direction = state.direction;
        let next = state.next_seat();

        state.reverse();
        state.reverse();

        prop_assert_eq!(state.direction, direction);
        prop_assert_eq!(state.next_seat(), next);
        prop_assert_eq!(
            direction,
            if flips % 2 == 0 { Direction::Clockwise } else { Direction::CounterClockwise }
        );
    }

    /// Property: advancing visits every seat once per lap, in either direction.
    #[test]
    fn prop_advance_cycles_all_seats(players in 2usize..=9, reversed in any::<bool>()) {
        let mut state = TurnState::new(players);
        if reversed {
            state.reverse();
        }

        let mut seen = vec![false; players];
        for _ in 0..players {
            seen[state.active.index()] = true;
            state.advance();
        }

        prop_assert!(seen.iter().all(|&s| s));
        prop_assert_eq!(state.active, Seat::new(0));
    }

    /// Property: a refill moves exactly the buried discards into the deck.
    #[test]
    fn prop_refill_moves_buried_cards(discards in prop::collection::vec(card(), 1..40), seed in any::<u64>()) {
        let top = discards[discards.len() - 1].clone();
        let buried = sorted(discards[..discards.len() - 1].iter().cloned());
        let mut table = Table::new(Deck::new(), DiscardPile::from_cards(discards));
        let mut rng = GameRng::new(seed);

        let moved = table.refill(&mut rng);

        prop_assert_eq!(moved, buried.len());
        prop_assert_eq!(sorted(table.deck.iter().cloned()), buried);
        prop_assert_eq!(table.discard.len(), 1);
        prop_assert_eq!(table.discard.top().unwrap(), &top);
    }

    /// Property: negative scores are never positive; positive scores go to the winner only.
    #[test]
    fn prop_scores_by_mode(hands in prop::collection::vec(hand(), 2..6), winner in 0usize..6) {
        let winner = Seat::new((winner % hands.len()) as u8);

        let negative = score(ScoringMode::Negative, winner, &hands);
        prop_assert!(negative.values().all(|&s| s <= 0));

        let positive = score(ScoringMode::Positive, winner, &hands);
        let opponents: i64 = negative
            .iter()
            .filter(|&(seat, _)| seat != winner)
            .map(|(_, &s)| -s)
            .sum();
        prop_assert_eq!(positive[winner], opponents);
        prop_assert!(positive.iter().filter(|&(seat, _)| seat != winner).all(|(_, &s)| s == 0));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: cards are conserved on every turn and every game ends with a winner.
    #[test]
    fn prop_full_games_conserve_cards(players in 2usize..=5, seed in any::<u64>(), wildcard in any::<bool>()) {
        let rules = RuleSet::classic(players, wildcard).unwrap();
        let total = rules.total_cards();
        let seats: Vec<Player> = (0..players)
            .map(|i| Player::automated(format!("bot {i}"), RandomStrategy::new(seed ^ i as u64)))
            .collect();
        let config = EngineConfig::new(seed).without_delay().with_turn_limit(20_000);
        let mut engine = GameEngine::new(rules, seats, config).unwrap();

        loop {
            let phase = engine.play_turn().unwrap();
            prop_assert_eq!(engine.card_count(), total);
            if phase.is_terminal() {
                break;
            }
        }

        let winner = engine.outcome().and_then(|o| o.winner()).unwrap();
        prop_assert!(engine.player(winner).unwrap().hand().is_empty());
    }
}
