//! Core domain types for tic-tac-toe.

use crate::error::MoveError;
use crate::position::Position;
use crate::rules;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player symbol occupying a cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// Mark X (moves first unless the turn order is kept).
    #[default]
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values. [`Board::place`] hands back a new board and
/// leaves the receiver as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from raw squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns true when every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in ascending index order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .into_iter()
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the board already holds a win or a draw
    /// - [`MoveError::SquareOccupied`] if the square is taken
    #[instrument(skip(self), fields(board = %self.display()))]
    pub fn place(&self, pos: Position, mark: Mark) -> Result<Board, MoveError> {
        if rules::evaluate(self).is_over() {
            return Err(MoveError::GameOver);
        }
        if !self.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        let mut next = *self;
        next.set(pos, Square::Occupied(mark));
        Ok(next)
    }

    /// Overwrites a square without validation. Search code uses this to
    /// play and take back hypothetical moves on a private copy.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cells_ascending() {
        let board = Board::new()
            .place(Position::Center, Mark::X)
            .and_then(|b| b.place(Position::TopLeft, Mark::O))
            .expect("legal moves");
        let empty = board.empty_cells();
        assert_eq!(empty.len(), 7);
        assert!(empty.windows(2).all(|w| w[0].to_index() < w[1].to_index()));
        assert!(!empty.contains(&Position::Center));
    }

    #[test]
    fn test_place_leaves_input_untouched() {
        let board = Board::new();
        let next = board.place(Position::BottomRight, Mark::O).expect("legal move");
        assert!(board.is_empty(Position::BottomRight));
        assert_eq!(next.get(Position::BottomRight), Square::Occupied(Mark::O));
    }

    #[test]
    fn test_place_rejects_occupied() {
        let board = Board::new().place(Position::Center, Mark::X).expect("legal move");
        assert_eq!(
            board.place(Position::Center, Mark::O),
            Err(MoveError::SquareOccupied(Position::Center))
        );
    }

    #[test]
    fn test_place_rejects_finished_board() {
        let x = Square::Occupied(Mark::X);
        let e = Square::Empty;
        let board = Board::from_squares([x, x, x, e, e, e, e, e, e]);
        assert_eq!(board.place(Position::Center, Mark::O), Err(MoveError::GameOver));
    }

    #[test]
    fn test_display_grid() {
        let board = Board::new().place(Position::TopLeft, Mark::X).expect("legal move");
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9");
    }
}
