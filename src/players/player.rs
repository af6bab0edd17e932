//! Seated participants.
//!
//! ## Design
//!
//! `Player` is one struct for every participant; what differs is the
//! `PlayerKind` tag. Humans answer through the engine's `Controller`,
//! automated players through their own injected `Strategy`. Both produce
//! the same `Decision`, which the engine validates the same way.

use std::fmt;

use crate::cards::{Card, Suit};
use crate::core::{Action, Seat, TableView};
use crate::zones::Hand;

use super::controller::{Command, CommandError, Controller, ControllerError};
use super::strategy::Strategy;

/// Who makes the decisions for a seat.
pub enum PlayerKind {
    Human,
    Automated(Box<dyn Strategy>),
}

impl fmt::Debug for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => f.write_str("Human"),
            PlayerKind::Automated(strategy) => write!(f, "Automated({})", strategy.name()),
        }
    }
}

/// Outcome of asking a player for their move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// A play or draw, still to be validated.
    Act(Action),
    /// The hand was displayed; the player still has to move.
    ShowedHand,
    /// The input could not be understood; ask again.
    Invalid(CommandError),
}

/// A participant with a fixed seat and a private hand.
#[derive(Debug)]
pub struct Player {
    seat: Seat,
    name: String,
    kind: PlayerKind,
    hand: Hand,
}

impl Player {
    /// A human player, seated by the engine.
    pub fn human(name: impl Into<String>) -> Self {
        Self::with_kind(name, PlayerKind::Human)
    }

    /// An automated player driven by `strategy`, seated by the engine.
    pub fn automated(name: impl Into<String>, strategy: impl Strategy + 'static) -> Self {
        Self::with_kind(name, PlayerKind::Automated(Box::new(strategy)))
    }

    pub fn with_kind(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            seat: Seat::new(0),
            name: name.into(),
            kind,
            hand: Hand::new(),
        }
    }

    /// Start with these cards already in hand.
    #[must_use]
    pub fn with_hand(mut self, hand: Hand) -> Self {
        self.hand = hand;
        self
    }

    pub(crate) fn seat_at(&mut self, seat: Seat) {
        self.seat = seat;
    }

    #[must_use]
    pub fn seat(&self) -> Seat {
        self.seat
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &PlayerKind {
        &self.kind
    }

    #[must_use]
    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Add drawn or dealt cards to the hand.
    pub fn receive_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        for card in cards {
            self.hand.add(card);
        }
    }

    /// Ask for this turn's move.
    ///
    /// Humans read one command from `controller`; a hand query is served
    /// here and reported as `ShowedHand`. Automated players never touch
    /// the controller.
    pub fn request_action(
        &mut self,
        view: &TableView<'_>,
        controller: Option<&mut (dyn Controller + 'static)>,
    ) -> Result<Decision, ControllerError> {
        match &mut self.kind {
            PlayerKind::Automated(strategy) => Ok(Decision::Act(strategy.choose_action(&self.hand, view))),
            PlayerKind::Human => {
                let controller = controller.ok_or(ControllerError::Missing(self.seat))?;
                let line = controller.next_command(self.seat, view)?;

                Ok(match Command::parse(&line, self.hand.len()) {
                    Ok(Command::Play(index)) => Decision::Act(Action::play(index)),
                    Ok(Command::Draw) => Decision::Act(Action::Draw),
                    Ok(Command::ShowHand) => {
                        controller.show_hand(self.seat, &self.hand)?;
                        Decision::ShowedHand
                    }
                    Err(err) => Decision::Invalid(err),
                })
            }
        }
    }

    /// Ask which suit a just-played wildcard forces.
    ///
    /// Humans get one attempt per call; an unreadable answer comes back as
    /// `Err(CommandError::UnknownSuit)` inside the `Ok` so the engine can
    /// report it and ask again.
    pub fn choose_suit(
        &mut self,
        view: &TableView<'_>,
        controller: Option<&mut (dyn Controller + 'static)>,
    ) -> Result<Result<Suit, CommandError>, ControllerError> {
        match &mut self.kind {
            PlayerKind::Automated(strategy) => Ok(Ok(strategy.choose_suit(&self.hand, view))),
            PlayerKind::Human => {
                let controller = controller.ok_or(ControllerError::Missing(self.seat))?;
                let line = controller.next_suit(self.seat)?;
                Ok(line.parse::<Suit>().map_err(CommandError::UnknownSuit))
            }
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.seat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::core::TurnState;
    use crate::players::{NaiveStrategy, ScriptedController};
    use smallvec::SmallVec;

    fn view<'a>(top: &'a Card, turn: &'a TurnState) -> TableView<'a> {
        TableView {
            top,
            turn,
            deck_len: 20,
            discard_len: 1,
            hand_sizes: SmallVec::from_slice(&[2, 2]),
        }
    }

    fn two_card_hand() -> Hand {
        Hand::from_cards([Card::plain(Suit::Clubs, Rank::Nine), Card::plain(Suit::Hearts, Rank::Nine)])
    }

    #[test]
    fn test_automated_consults_strategy() {
        let top = Card::plain(Suit::Hearts, Rank::Two);
        let turn = TurnState::new(2);
        let mut player = Player::automated("bot", NaiveStrategy).with_hand(two_card_hand());

        let decision = player.request_action(&view(&top, &turn), None).unwrap();
        assert_eq!(decision, Decision::Act(Action::play(1)));
    }

    #[test]
    fn test_human_parses_controller_input() {
        let top = Card::plain(Suit::Hearts, Rank::Two);
        let turn = TurnState::new(2);
        let mut controller = ScriptedController::new(["hand", "bogus", "9", "2"]);
        let mut player = Player::human("ana").with_hand(two_card_hand());
        let view = view(&top, &turn);

        assert_eq!(player.request_action(&view, Some(&mut controller)).unwrap(), Decision::ShowedHand);
        assert_eq!(
            player.request_action(&view, Some(&mut controller)).unwrap(),
            Decision::Invalid(CommandError::Unknown("bogus".into()))
        );
        assert_eq!(
            player.request_action(&view, Some(&mut controller)).unwrap(),
            Decision::Invalid(CommandError::OutOfRange { position: 9, hand_len: 2 })
        );
        assert_eq!(
            player.request_action(&view, Some(&mut controller)).unwrap(),
            Decision::Act(Action::play(1))
        );
        assert_eq!(controller.hands_shown(), 1);
        assert_eq!(player.hand().len(), 2);
    }

    #[test]
    fn test_human_without_controller() {
        let top = Card::plain(Suit::Hearts, Rank::Two);
        let turn = TurnState::new(2);
        let mut player = Player::human("ana");

        let err = player.request_action(&view(&top, &turn), None).unwrap_err();
        assert!(matches!(err, ControllerError::Missing(_)));
    }

    #[test]
    fn test_human_suit_choice() {
        let top = Card::plain(Suit::Hearts, Rank::Eight);
        let turn = TurnState::new(2);
        let mut controller = ScriptedController::new(["purple", "d"]);
        let mut player = Player::human("ana");
        let view = view(&top, &turn);

        let first = player.choose_suit(&view, Some(&mut controller)).unwrap();
        assert!(matches!(first, Err(CommandError::UnknownSuit(_))));
        assert_eq!(player.choose_suit(&view, Some(&mut controller)).unwrap(), Ok(Suit::Diamonds));
    }

    #[test]
    fn test_receive_cards() {
        let mut player = Player::automated("bot", NaiveStrategy);
        player.receive_cards([Card::plain(Suit::Clubs, Rank::Two), Card::plain(Suit::Clubs, Rank::Three)]);
        assert_eq!(player.hand().len(), 2);
    }
}
