//! Card effects and their resolution.
//!
//! - `EffectKind`: the data-driven effect taxonomy bound to ranks
//! - `EffectResolver`: applies an effect to the table and turn state
//!
//! ## Design Philosophy
//!
//! Effects are data. The rule set decides which rank does what; the
//! resolver interprets whatever effect the played card carries, so adding
//! a variant never touches the turn loop.

mod effect;
mod resolver;

pub use effect::EffectKind;
pub use resolver::{EffectContext, EffectOutcome, EffectResolver, ForcedDraw};
