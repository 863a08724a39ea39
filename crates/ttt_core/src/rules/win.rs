//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Mark, Square};

/// The eight winning lines: rows, then columns, then diagonals.
///
/// Each triple lists its positions in ascending index order.
pub const WIN_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark and the first complete line found, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<(Mark, [Position; 3])> {
    for line in WIN_LINES {
        let [a, b, c] = line;
        if let Square::Occupied(mark) = board.get(a)
            && board.get(b) == Square::Occupied(mark)
            && board.get(c) == Square::Occupied(mark)
        {
            return Some((mark, line));
        }
    }

    None
}
