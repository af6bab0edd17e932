//! Turn actions.
//!
//! A turn consumes exactly one action: play one card from hand, or draw
//! one card. Hand queries and malformed input never reach this type;
//! they are handled while the engine is still waiting for an action.

use serde::{Deserialize, Serialize};

/// What the active seat does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Play the card at this 0-based hand index.
    Play { index: usize },

    /// Draw one card and end the turn.
    Draw,
}

impl Action {
    #[must_use]
    pub const fn play(index: usize) -> Self {
        Self::Play { index }
    }

    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(self, Action::Draw)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Play { index } => write!(f, "play card {}", index + 1),
            Action::Draw => f.write_str("draw"),
        }
    }
}
