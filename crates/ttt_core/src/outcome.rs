//! Result of evaluating a board.

use crate::position::Position;
use crate::types::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line is complete and at least one square is empty.
    Ongoing,
    /// A mark owns a full line, reported in ascending index order.
    Win(Mark, [Position; 3]),
    /// Every square is filled and no line is complete.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(mark, _) => Some(*mark),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// Returns the winning line if there is one.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        match self {
            Outcome::Win(_, line) => Some(*line),
            Outcome::Ongoing | Outcome::Draw => None,
        }
    }

    /// Returns true once the game has a winner or is drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win(mark, _) => write!(f, "{} wins", mark),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
