//! Hard tier: exhaustive minimax.
//!
//! The full game tree from any position has at most 9! leaves, so the search
//! runs to terminal positions without pruning or memoization.

use super::{MoveStrategy, available};
use crate::error::SelectError;
use crate::outcome::Outcome;
use crate::position::Position;
use crate::rules::evaluate;
use crate::types::{Board, Mark, Square};
use rand::RngCore;

/// Base score of a decided game; shifted by depth so faster wins and slower
/// losses score higher.
const WIN_SCORE: i32 = 10;

/// Perfect play. Never loses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

/// Score of a subtree and the root move that reaches it.
#[derive(Debug, Clone, Copy)]
struct Scored {
    score: i32,
    best: Option<Position>,
}

struct Search {
    computer: Mark,
    human: Mark,
}

impl Search {
    fn terminal_score(&self, board: &Board, depth: i32) -> Option<i32> {
        match evaluate(board) {
            Outcome::Win(mark, _) if mark == self.computer => Some(WIN_SCORE - depth),
            Outcome::Win(_, _) => Some(depth - WIN_SCORE),
            Outcome::Draw => Some(0),
            Outcome::Ongoing => None,
        }
    }

    /// Plays every empty square for `to_move` on `board`, undoing each one.
    fn minimax(&self, board: &mut Board, to_move: Mark, depth: i32) -> Scored {
        if let Some(score) = self.terminal_score(board, depth) {
            return Scored { score, best: None };
        }

        let maximizing = to_move == self.computer;
        let mut result = Scored {
            score: if maximizing { i32::MIN } else { i32::MAX },
            best: None,
        };
        let next = if maximizing { self.human } else { self.computer };

        for pos in board.empty_cells() {
            board.set(pos, Square::Occupied(to_move));
            let child = self.minimax(board, next, depth + 1);
            board.set(pos, Square::Empty);

            // Strict comparison keeps the first best square in index order.
            let better = if maximizing {
                child.score > result.score
            } else {
                child.score < result.score
            };
            if better {
                result = Scored {
                    score: child.score,
                    best: Some(pos),
                };
            }
        }

        result
    }
}

impl MoveStrategy for MinimaxStrategy {
    fn choose(
        &self,
        board: &Board,
        computer: Mark,
        human: Mark,
        _rng: &mut dyn RngCore,
    ) -> Result<Position, SelectError> {
        let empty = available(board)?;
        if empty.len() == Position::ALL.len() {
            return Ok(Position::Center);
        }

        let search = Search { computer, human };
        let mut scratch = *board;
        search
            .minimax(&mut scratch, computer, 0)
            .best
            .ok_or(SelectError::NoMoveAvailable)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
