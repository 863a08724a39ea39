//! Computer move selection.
//!
//! Three interchangeable strategies sit behind [`MoveStrategy`]. The session
//! picks one through [`Difficulty`] and calls [`select_move`] only when the
//! computer is to move on an unfinished board.

mod heuristic;
mod minimax;
mod random;

pub use heuristic::HeuristicStrategy;
pub use minimax::MinimaxStrategy;
pub use random::RandomStrategy;

use crate::error::SelectError;
use crate::position::Position;
use crate::types::{Board, Mark};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random empty square.
    Easy,
    /// Win, block, center, corner, anything.
    Normal,
    /// Perfect play via full-depth minimax.
    #[default]
    Hard,
}

impl Difficulty {
    /// Returns the strategy backing this tier.
    pub fn strategy(self) -> &'static dyn MoveStrategy {
        match self {
            Difficulty::Easy => &RandomStrategy,
            Difficulty::Normal => &HeuristicStrategy,
            Difficulty::Hard => &MinimaxStrategy,
        }
    }
}

/// A way of choosing the computer's next square.
///
/// Implementations only ever return empty squares and never modify the board
/// they are given.
pub trait MoveStrategy: Send + Sync {
    /// Chooses a square for `computer` to play; `human` is the opposing mark.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::NoMoveAvailable`] if the board is full.
    fn choose(
        &self,
        board: &Board,
        computer: Mark,
        human: Mark,
        rng: &mut dyn RngCore,
    ) -> Result<Position, SelectError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Selects the computer's move for the given difficulty.
///
/// # Errors
///
/// Returns [`SelectError::NoMoveAvailable`] if the board has no empty square.
#[instrument(skip(board, rng), fields(board = %board.display()))]
pub fn select_move(
    board: &Board,
    computer: Mark,
    human: Mark,
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Result<Position, SelectError> {
    let strategy = difficulty.strategy();
    let choice = strategy.choose(board, computer, human, rng)?;
    debug!(strategy = strategy.name(), position = %choice, "Computer chose position");
    Ok(choice)
}

/// Empty cells, or [`SelectError::NoMoveAvailable`] if there are none.
fn available(board: &Board) -> Result<Vec<Position>, SelectError> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return Err(SelectError::NoMoveAvailable);
    }
    Ok(empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_full_board_has_no_move() {
        let board = Board::from_squares([Square::Occupied(Mark::X); 9]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for difficulty in Difficulty::iter() {
            assert_eq!(
                select_move(&board, Mark::O, Mark::X, difficulty, &mut rng),
                Err(SelectError::NoMoveAvailable)
            );
        }
    }

    #[test]
    fn test_difficulty_parses_lowercase() {
        assert_eq!("normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert!("brutal".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_only_empty_squares_chosen() {
        let board = Board::new()
            .place(Position::Center, Mark::X)
            .and_then(|b| b.place(Position::TopLeft, Mark::O))
            .and_then(|b| b.place(Position::BottomRight, Mark::X))
            .expect("legal moves");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for difficulty in Difficulty::iter() {
            for _ in 0..20 {
                let before = board;
                let pos = select_move(&board, Mark::O, Mark::X, difficulty, &mut rng)
                    .expect("move available");
                assert!(board.is_empty(pos), "{difficulty} chose occupied {pos}");
                assert_eq!(board, before);
            }
        }
    }
}
