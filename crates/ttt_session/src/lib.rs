//! Tic-tac-toe game session.
//!
//! Builds the stateful side of the game on top of [`ttt_core`]:
//!
//! - **Session**: turn state machine, score tallies, computer turns
//! - **Scheduling**: delayed computer moves tagged by [`Generation`]
//! - **Driver**: a Tokio task owning one session, fed by [`DriverHandle`]
//! - **Persistence**: key-value stores for scores and the theme preference
//! - **Config**: [`EngineConfig`] loaded from TOML
//!
//! # Example
//!
//! ```
//! use ttt_session::{
//!     ManualScheduler, Mark, MemoryStore, PlayMode, Position, Session, SessionSettings,
//! };
//! use ttt_core::Difficulty;
//!
//! let scheduler = ManualScheduler::default();
//! let settings = SessionSettings::new(PlayMode::VsComputer, Mark::X, Difficulty::Hard);
//! let mut session = Session::new(settings, Box::new(MemoryStore::default()), Box::new(scheduler.clone()));
//!
//! session.request_move(Position::TopLeft, Mark::X).unwrap();
//! let turn = scheduler.pop_due().expect("computer turn scheduled");
//! assert_eq!(session.resolve_computer_turn(turn), Some(Position::Center));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod driver;
mod schedule;
mod scores;
mod session;
mod settings;
mod store;
mod theme;

pub use config::{ConfigError, EngineConfig};
pub use driver::{Command, DriverError, DriverHandle, GameDriver, GameEvent, TokioScheduler};
pub use schedule::{ComputerTurn, Generation, ManualScheduler, Scheduler};
pub use scores::Scores;
pub use session::{Session, SessionSnapshot, SessionState, Status, TurnDelays};
pub use settings::{PlayMode, SessionSettings};
pub use store::{KeyValueStore, MemoryStore, SCORES_KEY, SqliteStore, StorageError, THEME_KEY};
pub use theme::Theme;

pub use ttt_core::{Board, Difficulty, Mark, MoveError, Outcome, Position, Square};
