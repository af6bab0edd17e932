//! Game rules that do not depend on who is playing.
//!
//! - `legality`: whether a card may be played on the discard top
//! - `scoring`: hand values and end-of-game scores

pub mod legality;
pub mod scoring;

pub use legality::{check_play, is_playable, playable_indices, Rejection};
pub use scoring::{card_value, hand_value, score};
