//! The core abstractions for this application
//!

use std::fmt::Display;

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use crate::game::tictactoe::{TTTAddr, TTTBoard};

#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Default, Sequence, Serialize, Deserialize,
)]
pub enum PlayerMark {
    #[default]
    Cross,
    Naught,
}

impl PlayerMark {
    pub fn other(&self) -> Self {
        match *self {
            Self::Cross => Self::Naught,
            Self::Naught => Self::Cross,
        }
    }
}

impl Display for PlayerMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerMark::Cross => write!(f, "X"),
            PlayerMark::Naught => write!(f, "O"),
        }
    }
}

/// Three cell indices that together form a row, a column or a diagonal.
pub type WinLine = [usize; 3];

/// The result of looking at a board from the point of view of one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    Undecided,
    /// The mark completed the line. The line is the first one in declaration order.
    Won(PlayerMark, WinLine),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        match self {
            Outcome::Won(_, line) => Some(*line),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<PlayerMark> {
        match self {
            Outcome::Won(mark, _) => Some(*mark),
            _ => None,
        }
    }

    pub fn end_status(&self) -> Option<GameEndStatus> {
        match self {
            Outcome::Undecided => None,
            Outcome::Draw => Some(GameEndStatus::Draw),
            Outcome::Won(PlayerMark::Cross, _) => Some(GameEndStatus::X),
            Outcome::Won(PlayerMark::Naught, _) => Some(GameEndStatus::O),
        }
    }
}

/// The title a front end shows above the board
impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "Choose"),
            Outcome::Won(mark, _) => write!(f, "{} Win", mark),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum GameEndStatus {
    Draw,
    X,
    O,
}

/// The status of a game won by `mark`
impl From<PlayerMark> for GameEndStatus {
    fn from(mark: PlayerMark) -> Self {
        match mark {
            PlayerMark::Cross => GameEndStatus::X,
            PlayerMark::Naught => GameEndStatus::O,
        }
    }
}

impl Display for GameEndStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEndStatus::Draw => write!(f, "Draw"),
            GameEndStatus::X => write!(f, "X"),
            GameEndStatus::O => write!(f, "O"),
        }
    }
}

/// Reasons a move is turned down. None of them change the game state.
/// Messages count cells 1-9, like the `Display` of `TTTAddr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Holds the zero-based index that was asked for
    #[display("Cell {} is outside the board 1-9", _0.saturating_add(1))]
    OutOfRange(usize),
    #[display("Cell {_0} is already occupied")]
    CellOccupied(TTTAddr),
    #[display("The game is already over")]
    GameFinished,
    #[display("The opponent has not replied yet")]
    AwaitingReply,
}

impl std::error::Error for MoveError {}

/// The Player trait is the struct that represents an automated player.
pub trait Player {
    /// You observe the whole board through a reference, and return the cell to play.
    /// `None` means there is nowhere left to play.
    fn play(&mut self, b: &TTTBoard) -> Option<TTTAddr>;
}
