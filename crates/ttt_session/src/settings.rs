//! Session settings: play mode, the human's mark, and difficulty.

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use ttt_core::{Difficulty, Mark};

/// Who plays the second mark.
///
/// Defaults to [`PlayMode::VsComputer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// One human against the computer.
    #[default]
    #[serde(rename = "cpu")]
    VsComputer,
    /// Two humans sharing the board.
    #[serde(rename = "pvp")]
    TwoPlayer,
}

/// User-configurable settings for a session.
///
/// The computer always plays the complement of `human_mark`; in
/// [`PlayMode::TwoPlayer`] nothing is computer-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, new)]
pub struct SessionSettings {
    /// Play mode.
    pub mode: PlayMode,
    /// Mark played by the human in computer mode.
    pub human_mark: Mark,
    /// Computer strength in computer mode.
    pub difficulty: Difficulty,
}

impl SessionSettings {
    /// Returns the computer's mark, the complement of the human's.
    pub fn computer_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Returns true if `mark` is played by the computer.
    #[instrument(skip(self))]
    pub fn is_computer(&self, mark: Mark) -> bool {
        self.mode == PlayMode::VsComputer && mark == self.computer_mark()
    }
}
