//! Playing card values.
//!
//! A `Card` is an immutable (suit, rank) pair that also carries the
//! `EffectKind` its rank was assigned by the `RuleSet`. Two cards compare
//! equal when suit and rank match; the effect is derived data and takes
//! no part in equality or hashing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::effects::EffectKind;

/// The four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in canonical order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = String;

    /// Accepts full names and single-letter shorthands, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hearts" | "heart" | "h" => Ok(Suit::Hearts),
            "diamonds" | "diamond" | "d" => Ok(Suit::Diamonds),
            "clubs" | "club" | "c" => Ok(Suit::Clubs),
            "spades" | "spade" | "s" => Ok(Suit::Spades),
            other => Err(format!("unknown suit '{other}'")),
        }
    }
}

/// Card ranks. `Joker` only exists when the rule set enables the wildcard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Rank {
    /// The thirteen ranks of a standard deck.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Standard ranks plus the joker.
    pub const ALL: [Rank; 14] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Joker,
    ];

    /// Ranks a rule set must cover.
    #[must_use]
    pub fn required(wildcard: bool) -> &'static [Rank] {
        if wildcard {
            &Self::ALL
        } else {
            &Self::STANDARD
        }
    }

    /// Penalty value of the rank when left in hand at game end.
    ///
    /// Wildcard-effect cards are valued separately by the scorer.
    #[must_use]
    pub const fn points(self) -> i64 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Joker => 50,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Joker => "joker",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rank {
    type Err = String;

    /// Accepts display names, digits and spelled-out numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_lowercase().as_str() {
            "ace" | "a" | "1" => Rank::Ace,
            "two" | "2" => Rank::Two,
            "three" | "3" => Rank::Three,
            "four" | "4" => Rank::Four,
            "five" | "5" => Rank::Five,
            "six" | "6" => Rank::Six,
            "seven" | "7" => Rank::Seven,
            "eight" | "8" => Rank::Eight,
            "nine" | "9" => Rank::Nine,
            "ten" | "10" => Rank::Ten,
            "jack" | "j" => Rank::Jack,
            "queen" | "q" => Rank::Queen,
            "king" | "k" => Rank::King,
            "joker" => Rank::Joker,
            other => return Err(format!("unknown rank '{other}'")),
        };
        Ok(rank)
    }
}

/// An immutable playing card.
///
/// ```
/// use eights::cards::{Card, Rank, Suit};
/// use eights::effects::EffectKind;
///
/// let a = Card::new(Suit::Hearts, Rank::Two, EffectKind::force_draw(2));
/// let b = Card::new(Suit::Hearts, Rank::Two, EffectKind::Normal);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "2 of hearts");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: Rank,
    effect: EffectKind,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub fn new(suit: Suit, rank: Rank, effect: EffectKind) -> Self {
        Self { suit, rank, effect }
    }

    /// Create a card with no effect.
    #[must_use]
    pub fn plain(suit: Suit, rank: Rank) -> Self {
        Self::new(suit, rank, EffectKind::Normal)
    }

    #[must_use]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    #[must_use]
    pub fn effect(&self) -> &EffectKind {
        &self.effect
    }

    /// Whether this card can be played on anything and lets its player pick a suit.
    #[must_use]
    pub fn is_wild(&self) -> bool {
        self.effect.chooses_suit()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank == Rank::Joker {
            write!(f, "joker ({})", self.suit)
        } else {
            write!(f, "{} of {}", self.rank, self.suit)
        }
    }
}
