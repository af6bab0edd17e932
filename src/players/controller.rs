//! Human input.
//!
//! A `Controller` is the external source of a human player's text input.
//! It only supplies raw lines; `Command::parse` checks the syntax and the
//! engine checks legality.
//!
//! ## Command vocabulary
//!
//! Case-insensitive, surrounding whitespace ignored:
//! - `k` (an integer): play card `k` of the hand, 1-based
//! - `draw`, `d`, `pioche`, `piocher`, `p`: draw a card
//! - `hand`, `h`, `main`, `m`: show the hand (does not use the turn)
//! - `counter`, `cc`, `contre carte`: reserved, always refused

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use thiserror::Error;

use crate::core::{Seat, TableView};
use crate::zones::Hand;

/// A syntactically valid human command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Play the card at this 0-based hand index.
    Play(usize),
    Draw,
    ShowHand,
}

/// Why a line of input was not a usable command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("card {position} does not exist, choose between 1 and {hand_len}")]
    OutOfRange { position: usize, hand_len: usize },

    #[error("counter cards are not available in this game")]
    CounterCardReserved,

    #[error("{0}")]
    UnknownSuit(String),
}

impl Command {
    /// Parse one line of input against a hand of `hand_len` cards.
    pub fn parse(input: &str, hand_len: usize) -> Result<Self, CommandError> {
        let normalized = input.trim().to_ascii_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        match words.as_slice() {
            [] => Err(CommandError::Empty),
            ["draw" | "d" | "pioche" | "piocher" | "p"] => Ok(Command::Draw),
            ["hand" | "h" | "main" | "m"] => Ok(Command::ShowHand),
            ["counter" | "cc"] | ["contre", "carte"] => Err(CommandError::CounterCardReserved),
            [word] => match word.parse::<usize>() {
                Ok(position) if (1..=hand_len).contains(&position) => Ok(Command::Play(position - 1)),
                Ok(position) => Err(CommandError::OutOfRange { position, hand_len }),
                Err(_) => Err(CommandError::Unknown(normalized.clone())),
            },
            _ => Err(CommandError::Unknown(normalized.clone())),
        }
    }
}

/// Failure of the input source itself.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("input closed")]
    Closed,

    #[error("no controller attached for human seat {0}")]
    Missing(Seat),

    #[error("controller I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// External source of human commands.
pub trait Controller: Send {
    /// Next raw command line for `seat`.
    ///
    /// The engine cannot interrupt this call. A cancellation requested while
    /// it blocks takes effect at the next turn boundary, so hosts that read
    /// from slow sources should poll a `CancelToken` themselves.
    fn next_command(&mut self, seat: Seat, view: &TableView<'_>) -> Result<String, ControllerError>;

    /// Next raw suit answer for `seat`, after it played a wildcard.
    fn next_suit(&mut self, seat: Seat) -> Result<String, ControllerError>;

    /// Display `hand` to the player at `seat`.
    fn show_hand(&mut self, seat: Seat, hand: &Hand) -> Result<(), ControllerError>;
}

/// Replays a fixed list of input lines, then reports the input as closed.
#[derive(Clone, Debug, Default)]
pub struct ScriptedController {
    lines: VecDeque<String>,
    shown: usize,
}

impl ScriptedController {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            shown: 0,
        }
    }

    /// How many times a hand was displayed.
    #[must_use]
    pub fn hands_shown(&self) -> usize {
        self.shown
    }

    fn next_line(&mut self) -> Result<String, ControllerError> {
        self.lines.pop_front().ok_or(ControllerError::Closed)
    }
}

impl Controller for ScriptedController {
    fn next_command(&mut self, _seat: Seat, _view: &TableView<'_>) -> Result<String, ControllerError> {
        self.next_line()
    }

    fn next_suit(&mut self, _seat: Seat) -> Result<String, ControllerError> {
        self.next_line()
    }

    fn show_hand(&mut self, _seat: Seat, _hand: &Hand) -> Result<(), ControllerError> {
        self.shown += 1;
        Ok(())
    }
}

/// Line-oriented terminal controller: prompts on `output`, reads `input`.
pub struct LineController<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, text: &str) -> Result<String, ControllerError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ControllerError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead + Send, W: Write + Send> Controller for LineController<R, W> {
    fn next_command(&mut self, seat: Seat, view: &TableView<'_>) -> Result<String, ControllerError> {
        let forced = view
            .turn
            .forced_suit
            .map(|suit| format!(", {suit} forced"))
            .unwrap_or_default();
        writeln!(
            self.output,
            "Top card: {}{forced} (deck {}, discard {})",
            view.top, view.deck_len, view.discard_len
        )?;
        self.prompt(&format!("{seat}, your move (card number, draw, hand): "))
    }

    fn next_suit(&mut self, seat: Seat) -> Result<String, ControllerError> {
        self.prompt(&format!("{seat}, choose a suit (hearts, diamonds, clubs, spades): "))
    }

    fn show_hand(&mut self, _seat: Seat, hand: &Hand) -> Result<(), ControllerError> {
        writeln!(self.output, "Your hand: {hand}")?;
        Ok(())
    }
}
