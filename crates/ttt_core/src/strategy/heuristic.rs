//! Normal tier: fixed priority rules.
//!
//! The rules do not look for forks, so a careful opponent can beat this tier.

use super::{MoveStrategy, available};
use crate::error::SelectError;
use crate::position::Position;
use crate::rules::check_winner;
use crate::types::{Board, Mark, Square};
use rand::RngCore;
use rand::seq::SliceRandom;

/// Win, then block, then center, then a random corner, then anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    /// First empty square (ascending) where `mark` completes a line.
    fn winning_square(board: &Board, empty: &[Position], mark: Mark) -> Option<Position> {
        empty.iter().copied().find(|&pos| {
            let mut trial = *board;
            trial.set(pos, Square::Occupied(mark));
            check_winner(&trial).is_some_and(|(winner, _)| winner == mark)
        })
    }
}

impl MoveStrategy for HeuristicStrategy {
    fn choose(
        &self,
        board: &Board,
        computer: Mark,
        human: Mark,
        rng: &mut dyn RngCore,
    ) -> Result<Position, SelectError> {
        let empty = available(board)?;

        if let Some(pos) = Self::winning_square(board, &empty, computer) {
            return Ok(pos);
        }
        if let Some(pos) = Self::winning_square(board, &empty, human) {
            return Ok(pos);
        }
        if empty.contains(&Position::Center) {
            return Ok(Position::Center);
        }

        let corners: Vec<Position> = empty.iter().copied().filter(|p| p.is_corner()).collect();
        if let Some(pos) = corners.choose(&mut *rng) {
            return Ok(*pos);
        }

        empty
            .choose(&mut *rng)
            .copied()
            .ok_or(SelectError::NoMoveAvailable)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
