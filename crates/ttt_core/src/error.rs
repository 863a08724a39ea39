//! Errors raised by the board and the move selector.

use crate::position::Position;
use crate::types::Mark;

/// A move request that cannot be applied.
///
/// Every variant is recoverable: the caller drops the request and the game
/// state stays as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It's not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),

    /// The mark belongs to the computer and cannot be played from outside.
    #[display("{} is played by the computer", _0)]
    ComputerControlled(Mark),
}

impl std::error::Error for MoveError {}

/// Failure to pick a computer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SelectError {
    /// The board has no empty square left.
    #[display("No move available on a full board")]
    NoMoveAvailable,
}

impl std::error::Error for SelectError {}
