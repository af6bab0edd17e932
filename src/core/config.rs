//! Rule set configuration.
//!
//! A `RuleSet` is produced once at game setup and never changes:
//! - player count, number of physical decks combined, starting hand size
//! - scoring mode applied at game end
//! - whether jokers (the wildcard rank) are shuffled in
//! - the rank → `EffectKind` table
//!
//! Construction validates everything up front: a rule set that exists is
//! playable. The rank table must cover every rank in play explicitly;
//! `RuleSetBuilder::fill_unassigned` exists for callers that want a
//! default, but the filling is a visible step rather than an assumption.
//!
//! Rule sets can also be loaded from TOML:
//!
//! ```
//! use eights::core::RuleSet;
//! use eights::cards::Rank;
//! use eights::effects::EffectKind;
//!
//! let rules = RuleSet::from_toml_str(r#"
//!     players = 3
//!     decks = 1
//!     hand_size = 7
//!     scoring = "negative"
//!     default_effect = { kind = "normal" }
//!
//!     [effects]
//!     two = { kind = "force_draw", count = 2 }
//!     eight = { kind = "choose_suit" }
//! "#).unwrap();
//!
//! assert_eq!(rules.player_count(), 3);
//! assert_eq!(rules.effect_for(Rank::Two), &EffectKind::force_draw(2));
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, Rank, Suit};
use crate::effects::EffectKind;

/// Jokers contributed by each physical deck when the wildcard is enabled.
pub const JOKERS_PER_DECK: usize = 2;

/// Cards per physical deck, jokers excluded.
pub const STANDARD_DECK_SIZE: usize = 52;

/// Starting hand size when none is configured.
pub const DEFAULT_HAND_SIZE: usize = 7;

/// Maximum number of seats.
pub const MAX_PLAYERS: usize = 255;

/// Errors raised while building or loading a rule set.
#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("at least 2 players are required, got {count}")]
    TooFewPlayers { count: usize },

    #[error("at most {MAX_PLAYERS} players are supported, got {count}")]
    TooManyPlayers { count: usize },

    #[error("at least one deck is required")]
    NoDecks,

    #[error("starting hand size must be at least 1")]
    EmptyStartingHand,

    #[error("dealing needs {needed} cards but the decks only hold {available}")]
    NotEnoughCards { needed: usize, available: usize },

    #[error("no effect assigned to rank {0}")]
    MissingRankEffect(Rank),

    #[error("an effect is assigned to the joker but the wildcard is disabled")]
    JokerWithoutWildcard,

    #[error("unknown rank '{0}' in effect table")]
    UnknownRank(String),

    #[error("invalid rule file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// How hands left at game end are scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// The winner collects the value of every card left in opponents' hands.
    Positive,
    /// Every seat is charged the value of its own remaining hand.
    #[default]
    Negative,
}

/// Immutable game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleSetFile", into = "RuleSetFile")]
pub struct RuleSet {
    player_count: usize,
    deck_count: usize,
    hand_size: usize,
    scoring: ScoringMode,
    wildcard: bool,
    rank_effects: FxHashMap<Rank, EffectKind>,
}

impl RuleSet {
    /// Start building a rule set for `player_count` players.
    pub fn builder(player_count: usize) -> RuleSetBuilder {
        RuleSetBuilder::new(player_count)
    }

    /// The minimal variant: twos force the next player to draw two,
    /// every other rank is plain. An enabled joker is wild.
    pub fn minimal(
        player_count: usize,
        deck_count: usize,
        scoring: ScoringMode,
        wildcard: bool,
    ) -> Result<Self, RuleSetError> {
        let mut builder = Self::builder(player_count)
            .deck_count(deck_count)
            .scoring(scoring)
            .wildcard(wildcard)
            .effect(Rank::Two, EffectKind::force_draw(2));
        if wildcard {
            builder = builder.effect(Rank::Joker, EffectKind::ChooseSuit);
        }
        builder.fill_unassigned(EffectKind::Normal).build()
    }

    /// The common table variant: eights are wild, twos make the next
    /// player draw two, jacks skip, aces reverse. Jokers, when enabled,
    /// choose the suit and make the next player draw four.
    pub fn classic(player_count: usize, wildcard: bool) -> Result<Self, RuleSetError> {
        Self::builder(player_count).wildcard(wildcard).classic_effects().build()
    }

    /// Parse and validate a TOML rule file.
    pub fn from_toml_str(source: &str) -> Result<Self, RuleSetError> {
        let file: RuleSetFile = toml::from_str(source)?;
        Self::try_from(file)
    }

    /// Load and validate a TOML rule file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| RuleSetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.deck_count
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    #[must_use]
    pub fn scoring(&self) -> ScoringMode {
        self.scoring
    }

    #[must_use]
    pub fn wildcard(&self) -> bool {
        self.wildcard
    }

    /// The effect bound to `rank`.
    ///
    /// Ranks outside the rule set (a joker when the wildcard is off) are plain.
    #[must_use]
    pub fn effect_for(&self, rank: Rank) -> &EffectKind {
        const NORMAL: &EffectKind = &EffectKind::Normal;
        self.rank_effects.get(&rank).unwrap_or(NORMAL)
    }

    /// Build a card with the effect this rule set assigns to its rank.
    #[must_use]
    pub fn card(&self, suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank, self.effect_for(rank).clone())
    }

    /// Number of cards in play for the whole game.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        let per_deck = if self.wildcard {
            STANDARD_DECK_SIZE + JOKERS_PER_DECK
        } else {
            STANDARD_DECK_SIZE
        };
        per_deck * self.deck_count
    }

    /// Every card of every physical deck, in a fixed unshuffled order.
    #[must_use]
    pub fn full_deck(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total_cards());
        for _ in 0..self.deck_count {
            for suit in Suit::ALL {
                for rank in Rank::STANDARD {
                    cards.push(self.card(suit, rank));
                }
            }
            if self.wildcard {
                // Jokers carry a nominal suit: one red, one black.
                cards.push(self.card(Suit::Hearts, Rank::Joker));
                cards.push(self.card(Suit::Spades, Rank::Joker));
            }
        }
        cards
    }
}

/// Builder for `RuleSet`.
#[derive(Clone, Debug)]
pub struct RuleSetBuilder {
    player_count: usize,
    deck_count: usize,
    hand_size: usize,
    scoring: ScoringMode,
    wildcard: bool,
    rank_effects: FxHashMap<Rank, EffectKind>,
}

impl RuleSetBuilder {
    fn new(player_count: usize) -> Self {
        Self {
            player_count,
            deck_count: 1,
            hand_size: DEFAULT_HAND_SIZE,
            scoring: ScoringMode::default(),
            wildcard: false,
            rank_effects: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn deck_count(mut self, count: usize) -> Self {
        self.deck_count = count;
        self
    }

    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn scoring(mut self, scoring: ScoringMode) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn wildcard(mut self, enabled: bool) -> Self {
        self.wildcard = enabled;
        self
    }

    /// Bind an effect to a rank, replacing any earlier binding.
    #[must_use]
    pub fn effect(mut self, rank: Rank, effect: EffectKind) -> Self {
        self.rank_effects.insert(rank, effect);
        self
    }

    /// Bind `effect` to every rank in play that has no binding yet.
    #[must_use]
    pub fn fill_unassigned(mut self, effect: EffectKind) -> Self {
        for &rank in Rank::required(self.wildcard) {
            self.rank_effects.entry(rank).or_insert_with(|| effect.clone());
        }
        self
    }

    /// Bind the classic table: eights wild, twos draw two, jacks skip,
    /// aces reverse, jokers (if enabled) choose the suit and draw four.
    /// Every other rank is plain.
    ///
    /// Set `wildcard` before calling this.
    #[must_use]
    pub fn classic_effects(self) -> Self {
        let wildcard = self.wildcard;
        let builder = self
            .effect(Rank::Eight, EffectKind::ChooseSuit)
            .effect(Rank::Two, EffectKind::force_draw(2))
            .effect(Rank::Jack, EffectKind::SkipNext)
            .effect(Rank::Ace, EffectKind::ReverseDirection);
        let builder = if wildcard {
            builder.effect(
                Rank::Joker,
                EffectKind::batch([EffectKind::ChooseSuit, EffectKind::force_draw(4)]),
            )
        } else {
            builder
        };
        builder.fill_unassigned(EffectKind::Normal)
    }

    /// Validate and build.
    pub fn build(self) -> Result<RuleSet, RuleSetError> {
        if self.player_count < 2 {
            return Err(RuleSetError::TooFewPlayers { count: self.player_count });
        }
        if self.player_count > MAX_PLAYERS {
            return Err(RuleSetError::TooManyPlayers { count: self.player_count });
        }
        if self.deck_count == 0 {
            return Err(RuleSetError::NoDecks);
        }
        if self.hand_size == 0 {
            return Err(RuleSetError::EmptyStartingHand);
        }
        if !self.wildcard && self.rank_effects.contains_key(&Rank::Joker) {
            return Err(RuleSetError::JokerWithoutWildcard);
        }
        if let Some(&missing) = Rank::required(self.wildcard)
            .iter()
            .find(|rank| !self.rank_effects.contains_key(rank))
        {
            return Err(RuleSetError::MissingRankEffect(missing));
        }

        let rules = RuleSet {
            player_count: self.player_count,
            deck_count: self.deck_count,
            hand_size: self.hand_size,
            scoring: self.scoring,
            wildcard: self.wildcard,
            rank_effects: self.rank_effects,
        };

        // Every hand plus the first discard must come out of the fresh deck.
        let needed = rules.hand_size * rules.player_count + 1;
        let available = rules.total_cards();
        if needed > available {
            return Err(RuleSetError::NotEnoughCards { needed, available });
        }

        Ok(rules)
    }
}

/// On-disk form of a rule set.
///
/// `effects` maps rank names (`"two"`, `"8"`, `"jack"`, ...) to effects;
/// `default_effect`, when present, fills every rank the table leaves out.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSetFile {
    pub players: usize,

    #[serde(default = "default_decks")]
    pub decks: usize,

    #[serde(default)]
    pub hand_size: Option<usize>,

    #[serde(default)]
    pub scoring: ScoringMode,

    #[serde(default)]
    pub wildcard: bool,

    #[serde(default)]
    pub default_effect: Option<EffectKind>,

    #[serde(default)]
    pub effects: BTreeMap<String, EffectKind>,
}

fn default_decks() -> usize {
    1
}

impl TryFrom<RuleSetFile> for RuleSet {
    type Error = RuleSetError;

    fn try_from(file: RuleSetFile) -> Result<Self, Self::Error> {
        let mut builder = RuleSet::builder(file.players)
            .deck_count(file.decks)
            .hand_size(file.hand_size.unwrap_or(DEFAULT_HAND_SIZE))
            .scoring(file.scoring)
            .wildcard(file.wildcard);

        for (name, effect) in file.effects {
            let rank: Rank = name.parse().map_err(|_| RuleSetError::UnknownRank(name.clone()))?;
            builder = builder.effect(rank, effect);
        }
        if let Some(default) = file.default_effect {
            builder = builder.fill_unassigned(default);
        }

        builder.build()
    }
}

impl From<RuleSet> for RuleSetFile {
    fn from(rules: RuleSet) -> Self {
        let effects = rules
            .rank_effects
            .into_iter()
            .map(|(rank, effect)| (format!("{rank:?}").to_ascii_lowercase(), effect))
            .collect();

        Self {
            players: rules.player_count,
            decks: rules.deck_count,
            hand_size: Some(rules.hand_size),
            scoring: rules.scoring,
            wildcard: rules.wildcard,
            default_effect: None,
            effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_rules() {
        let rules = RuleSet::minimal(2, 1, ScoringMode::Negative, false).unwrap();

        assert_eq!(rules.player_count(), 2);
        assert_eq!(rules.effect_for(Rank::Two), &EffectKind::force_draw(2));
        assert_eq!(rules.effect_for(Rank::Eight), &EffectKind::Normal);
        assert_eq!(rules.total_cards(), 52);
        assert_eq!(rules.full_deck().len(), 52);
    }

    #[test]
    fn test_classic_rules_with_jokers() {
        let rules = RuleSet::classic(4, true).unwrap();

        assert!(rules.effect_for(Rank::Eight).chooses_suit());
        assert!(rules.effect_for(Rank::Joker).chooses_suit());
        assert_eq!(rules.total_cards(), 54);

        let deck = rules.full_deck();
        assert_eq!(deck.len(), 54);
        assert_eq!(deck.iter().filter(|c| c.rank() == Rank::Joker).count(), 2);
        assert!(deck.iter().filter(|c| c.rank() == Rank::Jack).all(|c| *c.effect() == EffectKind::SkipNext));
    }

    #[test]
    fn test_multiple_decks() {
        let rules = RuleSet::minimal(6, 2, ScoringMode::Positive, true).unwrap();
        assert_eq!(rules.total_cards(), 108);
        assert_eq!(rules.full_deck().len(), 108);
    }

    #[test]
    fn test_rejects_too_few_players() {
        let err = RuleSet::minimal(1, 1, ScoringMode::Negative, false).unwrap_err();
        assert!(matches!(err, RuleSetError::TooFewPlayers { count: 1 }));
    }

    #[test]
    fn test_rejects_missing_rank() {
        let err = RuleSet::builder(2)
            .effect(Rank::Two, EffectKind::force_draw(2))
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleSetError::MissingRankEffect(Rank::Ace)));
    }

    #[test]
    fn test_rejects_missing_joker_when_wildcard() {
        let err = RuleSet::builder(2)
            .fill_unassigned(EffectKind::Normal)
            .wildcard(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleSetError::MissingRankEffect(Rank::Joker)));
    }

    #[test]
    fn test_rejects_joker_without_wildcard() {
        let err = RuleSet::builder(2)
            .effect(Rank::Joker, EffectKind::ChooseSuit)
            .fill_unassigned(EffectKind::Normal)
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleSetError::JokerWithoutWildcard));
    }

    #[test]
    fn test_rejects_oversized_deal() {
        let err = RuleSet::builder(8)
            .hand_size(7)
            .fill_unassigned(EffectKind::Normal)
            .build()
            .unwrap_err();
        assert!(matches!(err, RuleSetError::NotEnoughCards { needed: 57, available: 52 }));

        assert!(matches!(
            RuleSet::builder(2).hand_size(0).fill_unassigned(EffectKind::Normal).build(),
            Err(RuleSetError::EmptyStartingHand)
        ));
        assert!(matches!(
            RuleSet::builder(2).deck_count(0).fill_unassigned(EffectKind::Normal).build(),
            Err(RuleSetError::NoDecks)
        ));
    }

    #[test]
    fn test_toml_requires_full_coverage() {
        let err = RuleSet::from_toml_str(
            r#"
            players = 2
            [effects]
            two = { kind = "force_draw", count = 2 }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleSetError::MissingRankEffect(_)));
    }

    #[test]
    fn test_toml_unknown_rank() {
        let err = RuleSet::from_toml_str(
            r#"
            players = 2
            default_effect = { kind = "normal" }
            [effects]
            eleven = { kind = "skip_next" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, RuleSetError::UnknownRank(name) if name == "eleven"));
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = RuleSet::from_toml_str("players = ").unwrap_err();
        assert!(matches!(err, RuleSetError::Parse(_)));
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let rules = RuleSet::classic(3, true).unwrap();
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);

        let invalid = r#"{"players":1,"decks":1,"hand_size":7,"scoring":"negative","wildcard":false,"default_effect":{"kind":"normal"},"effects":{}}"#;
        assert!(serde_json::from_str::<RuleSet>(invalid).is_err());
    }
}
