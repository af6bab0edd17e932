//! The turn loop.
//!
//! ## Phases
//!
//! ```text
//! Dealing -> TurnStart -> AwaitingAction -> Validating -> ApplyingEffect -> TurnAdvance
//!               ^              ^   |             |                             |
//!               |              +---+-------------+ (hand query, bad input,     |
//!               |                                   rejected human play)       |
//!               +--------------------------------------------------------------+
//!                                                    TurnAdvance -> GameOver
//! ```
//!
//! `Cancelled` is reachable from `TurnStart` and `AwaitingAction`. Every
//! call to `step` performs exactly one transition; `run` steps until a
//! terminal phase.
//!
//! ## Ownership
//!
//! The engine owns the table, the players and the turn cursor outright.
//! Players and controllers only ever see a `TableView`.

use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cards::Suit;
use crate::core::{Action, GameRng, RuleSet, RuleSetError, Seat, SeatMap, TableView, TurnState};
use crate::effects::{EffectContext, EffectOutcome, EffectResolver};
use crate::events::{EventBus, GameEvent, Notifier};
use crate::players::{Controller, ControllerError, Decision, Player};
use crate::rules::{check_play, score};
use crate::zones::{Deck, DiscardPile, PileError, Table};

use super::{CancelToken, EngineConfig};

/// Where the turn loop currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Dealing,
    TurnStart,
    AwaitingAction,
    /// A decision was made and must be checked against the rules.
    Validating(Action),
    /// A checked action is about to be carried out.
    ApplyingEffect(Action),
    TurnAdvance,
    GameOver,
    Cancelled,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Cancelled)
    }
}

/// How a game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Won {
        winner: Seat,
        scores: SeatMap<i64>,
        /// Number of the turn on which the winner emptied their hand.
        turns: u32,
    },
    Cancelled {
        turn: u32,
    },
}

impl GameOutcome {
    #[must_use]
    pub fn winner(&self) -> Option<Seat> {
        match self {
            GameOutcome::Won { winner, .. } => Some(*winner),
            GameOutcome::Cancelled { .. } => None,
        }
    }
}

/// Fatal engine failures. Recoverable input problems are events, not errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    RuleSet(#[from] RuleSetError),

    #[error("rules are for {expected} players but {actual} were seated")]
    SeatCountMismatch { expected: usize, actual: usize },

    #[error("{seat} cannot act in a game of {players} players")]
    InvalidActiveSeat { seat: Seat, players: usize },

    #[error("deck and discard pile are both exhausted")]
    DeckExhausted,

    #[error("discard pile is empty")]
    EmptyDiscard,

    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("turn limit of {limit} reached")]
    TurnLimitReached { limit: u32 },
}

impl From<PileError> for EngineError {
    fn from(err: PileError) -> Self {
        match err {
            PileError::EmptyDeck => EngineError::DeckExhausted,
            PileError::EmptyDiscard => EngineError::EmptyDiscard,
        }
    }
}

/// Runs one game from the deal to a winner (or cancellation).
pub struct GameEngine {
    rules: RuleSet,
    config: EngineConfig,
    players: Vec<Player>,
    table: Table,
    turn: TurnState,
    phase: Phase,
    outcome: Option<GameOutcome>,

    /// Shuffles and refills.
    shuffle_rng: GameRng,
    /// Thinking delays; separate so pacing never changes the cards.
    pacing_rng: GameRng,

    controller: Option<Box<dyn Controller>>,
    bus: EventBus,
    cancel: CancelToken,
}

impl GameEngine {
    /// A fresh game, waiting to deal. Players are seated in the given order.
    pub fn new(rules: RuleSet, players: Vec<Player>, config: EngineConfig) -> Result<Self, EngineError> {
        let turn = TurnState::new(players.len().max(1));
        Self::assemble(rules, players, Table::default(), turn, config, Phase::Dealing)
    }

    /// A game already in progress, starting at the beginning of `turn.active`'s turn.
    ///
    /// Hands come from the players themselves (see `Player::with_hand`).
    /// Nothing is dealt.
    pub fn from_parts(
        rules: RuleSet,
        players: Vec<Player>,
        table: Table,
        turn: TurnState,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        if turn.player_count() != players.len() {
            return Err(EngineError::SeatCountMismatch {
                expected: turn.player_count(),
                actual: players.len(),
            });
        }
        if turn.active.index() >= players.len() {
            return Err(EngineError::InvalidActiveSeat {
                seat: turn.active,
                players: players.len(),
            });
        }
        Self::assemble(rules, players, table, turn, config, Phase::TurnStart)
    }

    fn assemble(
        rules: RuleSet,
        mut players: Vec<Player>,
        table: Table,
        turn: TurnState,
        config: EngineConfig,
        phase: Phase,
    ) -> Result<Self, EngineError> {
        if players.len() != rules.player_count() {
            return Err(EngineError::SeatCountMismatch {
                expected: rules.player_count(),
                actual: players.len(),
            });
        }

        for (seat, player) in Seat::all(players.len()).zip(players.iter_mut()) {
            player.seat_at(seat);
        }

        let root = GameRng::new(config.seed);

        Ok(Self {
            shuffle_rng: root.for_context("shuffle"),
            pacing_rng: root.for_context("pacing"),
            rules,
            config,
            players,
            table,
            turn,
            phase,
            outcome: None,
            controller: None,
            bus: EventBus::new(),
            cancel: CancelToken::new(),
        })
    }

    /// Attach the input source shared by every human seat.
    #[must_use]
    pub fn with_controller(mut self, controller: impl Controller + 'static) -> Self {
        self.controller = Some(Box::new(controller));
        self
    }

    /// Use an externally held cancellation token.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Add an observer. Events reach subscribers in subscription order.
    pub fn subscribe(&mut self, notifier: impl Notifier + 'static) {
        self.bus.subscribe(notifier);
    }

    /// A handle that cancels this game from any thread.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        self.players.get(seat.index())
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Cards in the deck, the discard pile and every hand.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.table.card_count() + self.players.iter().map(|p| p.hand().len()).sum::<usize>()
    }

    /// Deal, if that has not happened yet.
    pub fn start_game(&mut self) -> Result<(), EngineError> {
        if self.phase == Phase::Dealing {
            self.step()?;
        }
        Ok(())
    }

    /// Perform one phase transition and return the new phase.
    ///
    /// Terminal phases are sticky.
    pub fn step(&mut self) -> Result<Phase, EngineError> {
        let next = match self.phase {
            Phase::Dealing => self.deal()?,
            Phase::TurnStart => self.start_turn()?,
            Phase::AwaitingAction => self.await_action()?,
            Phase::Validating(action) => self.validate(action)?,
            Phase::ApplyingEffect(action) => self.apply(action)?,
            Phase::TurnAdvance => self.advance(),
            Phase::GameOver | Phase::Cancelled => return Ok(self.phase),
        };
        self.phase = next;
        Ok(next)
    }

    /// Step until the next turn begins or the game ends.
    pub fn play_turn(&mut self) -> Result<Phase, EngineError> {
        loop {
            let phase = self.step()?;
            if phase == Phase::TurnStart || phase.is_terminal() {
                return Ok(phase);
            }
        }
    }

    /// Step until the game ends.
    pub fn run(&mut self) -> Result<GameOutcome, EngineError> {
        loop {
            self.step()?;
            if let Some(outcome) = &self.outcome {
                return Ok(outcome.clone());
            }
        }
    }

    // === Phases ===

    fn deal(&mut self) -> Result<Phase, EngineError> {
        let mut deck = Deck::from_cards(self.rules.full_deck());
        deck.shuffle(&mut self.shuffle_rng);
        self.table = Table::new(deck, DiscardPile::new());

        for _ in 0..self.rules.hand_size() {
            for player in &mut self.players {
                let card = self.table.deck.draw_top()?;
                player.receive_cards([card]);
            }
        }

        let top = self.table.deck.draw_top()?;
        self.table.discard.push(top.clone());

        info!(
            players = self.players.len(),
            seed = self.config.seed,
            hand_size = self.rules.hand_size(),
            %top,
            "dealt"
        );
        self.emit(GameEvent::GameStarted {
            players: self.players.len(),
            seed: self.config.seed,
            top,
        });
        Ok(Phase::TurnStart)
    }

    fn start_turn(&mut self) -> Result<Phase, EngineError> {
        if self.cancel.is_cancelled() {
            return Ok(self.cancelled());
        }
        if let Some(limit) = self.config.turn_limit {
            if self.turn.turn > limit {
                warn!(limit, "turn limit reached");
                return Err(EngineError::TurnLimitReached { limit });
            }
        }

        let seat = self.turn.active;
        debug!(%seat, turn = self.turn.turn, "turn started");
        self.emit(GameEvent::TurnStarted {
            seat,
            turn: self.turn.turn,
        });
        Ok(Phase::AwaitingAction)
    }

    fn await_action(&mut self) -> Result<Phase, EngineError> {
        let seat = self.turn.active;
        let index = seat.index();

        let cancelled = if self.players[index].is_human() {
            self.cancel.is_cancelled()
        } else {
            let pause = self.config.think_delay.sample(&mut self.pacing_rng);
            self.cancel.wait_timeout(pause)
        };
        if cancelled {
            return Ok(self.cancelled());
        }

        let hand_sizes = self.hand_sizes();
        let view = TableView {
            top: self.table.discard.top()?,
            turn: &self.turn,
            deck_len: self.table.deck.len(),
            discard_len: self.table.discard.len(),
            hand_sizes,
        };
        let decision = self.players[index].request_action(&view, self.controller.as_deref_mut())?;

        Ok(match decision {
            Decision::Act(action) => Phase::Validating(action),
            Decision::ShowedHand => {
                let cards = self.players[index].hand().cards().to_vec();
                self.emit(GameEvent::HandShown { seat, cards });
                Phase::AwaitingAction
            }
            Decision::Invalid(err) => {
                debug!(%seat, %err, "unreadable input");
                self.emit(GameEvent::InputError {
                    seat,
                    message: err.to_string(),
                });
                Phase::AwaitingAction
            }
        })
    }

    fn validate(&mut self, action: Action) -> Result<Phase, EngineError> {
        let Action::Play { index } = action else {
            return Ok(Phase::ApplyingEffect(action));
        };

        let seat = self.turn.active;
        let player = &self.players[seat.index()];
        let checked = check_play(player.hand(), index, self.table.discard.top()?, self.turn.forced_suit).map(|_| ());
        let automated = !player.is_human();

        match checked {
            Ok(()) => Ok(Phase::ApplyingEffect(action)),
            Err(rejection) => {
                debug!(%seat, %rejection, "play rejected");
                self.emit(GameEvent::PlayRejected {
                    seat,
                    reason: rejection.to_string(),
                });

                if automated {
                    warn!(%seat, "automated player chose an illegal play, drawing instead");
                    Ok(Phase::ApplyingEffect(Action::Draw))
                } else {
                    Ok(Phase::AwaitingAction)
                }
            }
        }
    }

    fn apply(&mut self, action: Action) -> Result<Phase, EngineError> {
        let seat = self.turn.active;
        let index = seat.index();

        match action {
            Action::Draw => {
                let draw = self.table.draw(&mut self.shuffle_rng)?;
                if let Some(moved) = draw.refilled {
                    self.emit(GameEvent::DeckRefilled { moved });
                }
                self.players[index].receive_cards([draw.card]);
                self.emit(GameEvent::CardsDrawn {
                    seat,
                    count: 1,
                    forced: false,
                });
            }

            Action::Play { index: position } => {
                let Some(card) = self.players[index].hand_mut().remove(position) else {
                    return Ok(Phase::AwaitingAction);
                };
                self.table.discard.push(card.clone());
                debug!(%seat, %card, "played");
                self.emit(GameEvent::CardPlayed {
                    seat,
                    card: card.clone(),
                });

                let chosen_suit = if card.effect().chooses_suit() && !self.players[index].hand().is_empty() {
                    Some(self.ask_suit(seat)?)
                } else {
                    None
                };

                let mut ctx = EffectContext {
                    table: &mut self.table,
                    turn: &mut self.turn,
                    hands: self.players.iter_mut().map(Player::hand_mut).collect(),
                    rng: &mut self.shuffle_rng,
                    chosen_suit,
                };
                let outcome = EffectResolver::resolve_play(&card, &mut ctx)?;
                self.report(seat, &outcome);
            }
        }

        Ok(Phase::TurnAdvance)
    }

    fn advance(&mut self) -> Phase {
        if let Some(winner) = self.players.iter().find(|p| p.hand().is_empty()).map(Player::seat) {
            return self.finish(winner);
        }

        let skipped = self.turn.advance();
        for seat in skipped {
            debug!(%seat, "skipped");
            self.emit(GameEvent::TurnSkipped { seat });
        }
        Phase::TurnStart
    }

    // === Helpers ===

    fn emit(&mut self, event: GameEvent) {
        self.bus.publish(&event);
    }

    fn hand_sizes(&self) -> SmallVec<[usize; 8]> {
        self.players.iter().map(|p| p.hand().len()).collect()
    }

    /// Ask `seat` for a suit until it names one.
    fn ask_suit(&mut self, seat: Seat) -> Result<Suit, EngineError> {
        loop {
            let hand_sizes = self.hand_sizes();
            let view = TableView {
                top: self.table.discard.top()?,
                turn: &self.turn,
                deck_len: self.table.deck.len(),
                discard_len: self.table.discard.len(),
                hand_sizes,
            };

            match self.players[seat.index()].choose_suit(&view, self.controller.as_deref_mut())? {
                Ok(suit) => return Ok(suit),
                Err(err) => self.emit(GameEvent::InputError {
                    seat,
                    message: err.to_string(),
                }),
            }
        }
    }

    fn report(&mut self, seat: Seat, outcome: &EffectOutcome) {
        for &moved in &outcome.refills {
            self.emit(GameEvent::DeckRefilled { moved });
        }
        for draw in &outcome.forced_draws {
            self.emit(GameEvent::CardsDrawn {
                seat: draw.seat,
                count: draw.count,
                forced: true,
            });
        }
        if outcome.reversals > 0 {
            self.emit(GameEvent::DirectionReversed {
                direction: self.turn.direction,
            });
        }
        if let Some(suit) = outcome.suit_chosen {
            self.emit(GameEvent::SuitChosen { seat, suit });
        }
    }

    fn finish(&mut self, winner: Seat) -> Phase {
        let scores = score(self.rules.scoring(), winner, self.players.iter().map(Player::hand));
        let turns = self.turn.turn;

        info!(%winner, turns, "game over");
        self.emit(GameEvent::GameOver {
            winner,
            scores: scores.clone(),
        });
        self.outcome = Some(GameOutcome::Won { winner, scores, turns });
        Phase::GameOver
    }

    fn cancelled(&mut self) -> Phase {
        let turn = self.turn.turn;

        info!(turn, "game cancelled");
        self.emit(GameEvent::Cancelled { turn });
        self.outcome = Some(GameOutcome::Cancelled { turn });
        Phase::Cancelled
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("players", &self.players)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
