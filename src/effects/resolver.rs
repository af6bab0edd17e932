//! Effect resolution: applying a played card's effect to the game.
//!
//! The `EffectResolver` mutates the table, the hands and the turn state
//! through an `EffectContext` the engine assembles for one play. It runs
//! to completion once started; the only failure is a draw that finds both
//! piles exhausted, which the engine treats as fatal.

use smallvec::SmallVec;
use tracing::debug;

use crate::cards::{Card, Suit};
use crate::core::{GameRng, Seat, SeatMap, TurnState};
use crate::zones::{Hand, PileError, Table};

use super::EffectKind;

/// Everything an effect may touch while it resolves.
pub struct EffectContext<'a> {
    pub table: &'a mut Table,
    pub turn: &'a mut TurnState,
    pub hands: SeatMap<&'a mut Hand>,
    pub rng: &'a mut GameRng,
    /// Suit named by the player, used by `ChooseSuit`.
    pub chosen_suit: Option<Suit>,
}

/// A forced draw that was carried out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForcedDraw {
    pub seat: Seat,
    pub count: usize,
}

/// Observable consequences of resolving one play.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectOutcome {
    pub forced_draws: SmallVec<[ForcedDraw; 2]>,
    /// Cards moved by each deck refill triggered while drawing.
    pub refills: SmallVec<[usize; 2]>,
    /// Number of direction flips applied.
    pub reversals: u32,
    /// Skips added to the turn cursor.
    pub skips: u32,
    pub suit_chosen: Option<Suit>,
}

/// Resolves effects on the table and turn state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve the effect of a card that was just placed on the discard pile.
    ///
    /// A natural (non-wildcard) play clears any forced suit before its own
    /// effect resolves.
    pub fn resolve_play(card: &Card, ctx: &mut EffectContext<'_>) -> Result<EffectOutcome, PileError> {
        if !card.is_wild() {
            ctx.turn.forced_suit = None;
        }

        let mut outcome = EffectOutcome::default();
        Self::resolve(card.effect(), card, ctx, &mut outcome)?;
        Ok(outcome)
    }

    /// Resolve a single effect, accumulating into `outcome`.
    pub fn resolve(
        effect: &EffectKind,
        card: &Card,
        ctx: &mut EffectContext<'_>,
        outcome: &mut EffectOutcome,
    ) -> Result<(), PileError> {
        match effect {
            EffectKind::Normal => {}

            EffectKind::ForceDraw { count } => {
                let seat = ctx.turn.next_seat();
                for _ in 0..*count {
                    let draw = ctx.table.draw(ctx.rng)?;
                    if let Some(moved) = draw.refilled {
                        outcome.refills.push(moved);
                    }
                    ctx.hands[seat].add(draw.card);
                }
                debug!(%seat, count = *count, "forced draw");
                outcome.forced_draws.push(ForcedDraw {
                    seat,
                    count: usize::from(*count),
                });
            }

            EffectKind::SkipNext => {
                ctx.turn.pending_skips += 1;
                outcome.skips += 1;
            }

            EffectKind::ReverseDirection => {
                ctx.turn.reverse();
                outcome.reversals += 1;
            }

            EffectKind::ChooseSuit => {
                let suit = ctx.chosen_suit.unwrap_or_else(|| card.suit());
                ctx.turn.forced_suit = Some(suit);
                outcome.suit_chosen = Some(suit);
            }

            EffectKind::Batch { effects } => {
                for inner in effects {
                    Self::resolve(inner, card, ctx, outcome)?;
                }
            }
        }

        Ok(())
    }
}
