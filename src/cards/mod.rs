//! Card values.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`: the classic French deck, plus an optional joker rank
//! - `Card`: immutable (suit, rank) carrying the effect its rank was
//!   assigned by the rule set

pub mod card;

pub use card::{Card, Rank, Suit};
