//! Easy tier: a uniformly random empty square.

use super::{MoveStrategy, available};
use crate::error::SelectError;
use crate::position::Position;
use crate::types::{Board, Mark};
use rand::RngCore;
use rand::seq::SliceRandom;

/// Picks any empty square with equal probability.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl MoveStrategy for RandomStrategy {
    fn choose(
        &self,
        board: &Board,
        _computer: Mark,
        _human: Mark,
        rng: &mut dyn RngCore,
    ) -> Result<Position, SelectError> {
        let empty = available(board)?;
        empty
            .choose(rng)
            .copied()
            .ok_or(SelectError::NoMoveAvailable)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
