//! Pure tic-tac-toe engine.
//!
//! This crate holds everything that can be reasoned about without I/O:
//!
//! - **Board**: the fixed 3x3 grid and its cells
//! - **Rules**: win-line table, win and draw detection ([`evaluate`])
//! - **Strategies**: computer move selection at three difficulty tiers
//!
//! # Example
//!
//! ```
//! use ttt_core::{Board, Difficulty, Mark, Outcome, Position, evaluate, select_move};
//!
//! let board = Board::new().place(Position::TopLeft, Mark::X).unwrap();
//! assert_eq!(evaluate(&board), Outcome::Ongoing);
//!
//! let mut rng = rand::thread_rng();
//! let reply = select_move(&board, Mark::O, Mark::X, Difficulty::Hard, &mut rng).unwrap();
//! assert_eq!(reply, Position::Center);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod outcome;
mod position;
mod rules;
mod strategy;
mod types;

pub use error::{MoveError, SelectError};
pub use outcome::Outcome;
pub use position::Position;
pub use rules::{WIN_LINES, check_winner, evaluate, is_full};
pub use strategy::{
    Difficulty, HeuristicStrategy, MinimaxStrategy, MoveStrategy, RandomStrategy, select_move,
};
pub use types::{Board, Mark, Square};
