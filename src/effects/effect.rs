//! Effect definitions.
//!
//! Every rank is bound to an `EffectKind` by the rule set. The engine
//! never branches on ranks; it only interprets the effect carried by the
//! card that was played.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happens when a card is legally played.
///
/// ## Simple Effects
///
/// - `Normal`: no state change beyond the play itself
/// - `ForceDraw`: the next seat draws `count` cards immediately
/// - `SkipNext`: the next seat loses its turn
/// - `ReverseDirection`: flips the direction of play
/// - `ChooseSuit`: wildcard; the player names the suit to follow
///
/// ## Composite Effects
///
/// - `Batch`: resolve several effects in order (e.g. choose suit and
///   force the next seat to draw four)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    #[default]
    Normal,

    ForceDraw {
        count: u8,
    },

    SkipNext,

    ReverseDirection,

    ChooseSuit,

    Batch {
        effects: Vec<EffectKind>,
    },
}

impl EffectKind {
    /// Create a forced-draw effect.
    #[must_use]
    pub fn force_draw(count: u8) -> Self {
        Self::ForceDraw { count }
    }

    /// Create a batch of effects.
    #[must_use]
    pub fn batch(effects: impl IntoIterator<Item = EffectKind>) -> Self {
        Self::Batch {
            effects: effects.into_iter().collect(),
        }
    }

    /// Whether resolving this effect asks the player for a suit.
    ///
    /// Cards carrying such an effect are wildcards: playable on any top.
    #[must_use]
    pub fn chooses_suit(&self) -> bool {
        match self {
            EffectKind::ChooseSuit => true,
            EffectKind::Batch { effects } => effects.iter().any(EffectKind::chooses_suit),
            _ => false,
        }
    }

    /// Whether this effect hurts the next seat (draw or skip).
    #[must_use]
    pub fn targets_next(&self) -> bool {
        match self {
            EffectKind::ForceDraw { count } => *count > 0,
            EffectKind::SkipNext => true,
            EffectKind::Batch { effects } => effects.iter().any(EffectKind::targets_next),
            _ => false,
        }
    }

    /// Whether resolving this effect changes nothing.
    #[must_use]
    pub fn is_normal(&self) -> bool {
        match self {
            EffectKind::Normal => true,
            EffectKind::Batch { effects } => effects.iter().all(EffectKind::is_normal),
            _ => false,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Normal => f.write_str("normal"),
            EffectKind::ForceDraw { count } => write!(f, "next player draws {count}"),
            EffectKind::SkipNext => f.write_str("skip next player"),
            EffectKind::ReverseDirection => f.write_str("reverse direction"),
            EffectKind::ChooseSuit => f.write_str("choose suit"),
            EffectKind::Batch { effects } => {
                for (i, effect) in effects.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" + ")?;
                    }
                    write!(f, "{effect}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chooses_suit() {
        assert!(EffectKind::ChooseSuit.chooses_suit());
        assert!(!EffectKind::SkipNext.chooses_suit());
        assert!(EffectKind::batch([EffectKind::force_draw(4), EffectKind::ChooseSuit]).chooses_suit());
    }

    #[test]
    fn test_targets_next() {
        assert!(EffectKind::force_draw(2).targets_next());
        assert!(!EffectKind::force_draw(0).targets_next());
        assert!(EffectKind::SkipNext.targets_next());
        assert!(!EffectKind::ReverseDirection.targets_next());
    }

    #[test]
    fn test_is_normal() {
        assert!(EffectKind::Normal.is_normal());
        assert!(EffectKind::batch([]).is_normal());
        assert!(!EffectKind::batch([EffectKind::Normal, EffectKind::SkipNext]).is_normal());
    }

    #[test]
    fn test_display() {
        let joker = EffectKind::batch([EffectKind::ChooseSuit, EffectKind::force_draw(4)]);
        assert_eq!(joker.to_string(), "choose suit + next player draws 4");
    }

    #[test]
    fn test_effect_serialization() {
        let effect = EffectKind::batch([EffectKind::SkipNext, EffectKind::force_draw(2)]);
        let json = serde_json::to_string(&effect).unwrap();
        let back: EffectKind = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);

        let parsed: EffectKind = serde_json::from_str(r#"{"kind":"force_draw","count":3}"#).unwrap();
        assert_eq!(parsed, EffectKind::force_draw(3));
    }
}
