//! Turn state and the read-only table view.
//!
//! ## TurnState
//!
//! The turn cursor, mutated only by the engine between turns:
//! - turn counter, active seat, direction of play
//! - the suit forced by the last wildcard, if any
//! - skips owed to the next turn advance
//!
//! ## TableView
//!
//! What a deciding player may look at: the discard top, the forced suit,
//! pile sizes and every seat's hand size. Strategies and controllers only
//! ever see this view, never the engine's mutable state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::seat::{Direction, Seat};
use crate::cards::{Card, Suit};

/// Turn cursor and one-shot effect flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    player_count: usize,

    /// Turn number (starts at 1).
    pub turn: u32,

    /// Seat whose turn it is.
    pub active: Seat,

    pub direction: Direction,

    /// Suit named by the last wildcard; replaces the discard top's suit as
    /// the suit to follow until a non-wildcard card is played.
    pub forced_suit: Option<Suit>,

    /// Seats to pass over on the next advance.
    pub pending_skips: u32,
}

impl TurnState {
    /// Turn 1, seat 0 to act, clockwise, no flags.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");

        Self {
            player_count,
            turn: 1,
            active: Seat::new(0),
            direction: Direction::Clockwise,
            forced_suit: None,
            pending_skips: 0,
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Flip the direction of play.
    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }

    /// The seat that acts after the active one, ignoring skips.
    #[must_use]
    pub fn next_seat(&self) -> Seat {
        self.active.offset(self.direction, 1, self.player_count)
    }

    /// Move the cursor to the next seat, consuming pending skips.
    ///
    /// Returns the seats that were skipped, in the order they were passed.
    pub fn advance(&mut self) -> SmallVec<[Seat; 2]> {
        let mut skipped = SmallVec::new();
        let mut seat = self.next_seat();

        for _ in 0..self.pending_skips {
            skipped.push(seat);
            seat = seat.offset(self.direction, 1, self.player_count);
        }

        self.pending_skips = 0;
        self.active = seat;
        self.turn += 1;
        skipped
    }
}

/// Read-only snapshot of the table handed to deciding players.
#[derive(Clone, Debug)]
pub struct TableView<'a> {
    /// The discard pile's top card.
    pub top: &'a Card,

    pub turn: &'a TurnState,

    pub deck_len: usize,

    pub discard_len: usize,

    /// Hand size of every seat, in seat order.
    pub hand_sizes: SmallVec<[usize; 8]>,
}

impl TableView<'_> {
    /// The suit a non-wildcard play must follow (or match by rank).
    #[must_use]
    pub fn suit_to_follow(&self) -> Suit {
        self.turn.forced_suit.unwrap_or_else(|| self.top.suit())
    }

    /// Hand size of the seat that will act next.
    #[must_use]
    pub fn next_hand_size(&self) -> usize {
        self.hand_sizes
            .get(self.turn.next_seat().index())
            .copied()
            .unwrap_or(0)
    }
}
