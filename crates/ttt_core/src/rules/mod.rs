//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The session calls [`evaluate`] after each
//! placement and the search strategies call it on hypothetical boards, so
//! everything here is allocation-free and bounded by the fixed line count.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, check_winner};

use crate::outcome::Outcome;
use crate::types::Board;

/// Determines whether the board is won, drawn, or still being played.
///
/// Lines are scanned in [`WIN_LINES`] order; a win takes precedence over a
/// full board.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((mark, line)) = check_winner(board) {
        return Outcome::Win(mark, line);
    }
    if is_full(board) {
        return Outcome::Draw;
    }
    Outcome::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position, Square};

    const X: Square = Square::Occupied(Mark::X);
    const O: Square = Square::Occupied(Mark::O);
    const E: Square = Square::Empty;

    #[test]
    fn test_empty_board_ongoing() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X / O X X / O X O
        let board = Board::from_squares([X, O, X, O, X, X, O, X, O]);
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_win_on_last_square_beats_draw() {
        // X O X / O X O / O X X : board is full and X owns the main diagonal
        let board = Board::from_squares([X, O, X, O, X, O, O, X, X]);
        assert_eq!(
            evaluate(&board),
            Outcome::Win(
                Mark::X,
                [Position::TopLeft, Position::Center, Position::BottomRight]
            )
        );
    }

    #[test]
    fn test_anti_diagonal_line_ascending() {
        let board = Board::from_squares([E, E, O, E, O, E, O, X, X]);
        assert_eq!(
            evaluate(&board).winning_line(),
            Some([Position::TopRight, Position::Center, Position::BottomLeft])
        );
    }
}
