//! Game session: turn state machine, scores, and computer turns.

use crate::config::EngineConfig;
use crate::schedule::{ComputerTurn, Generation, Scheduler};
use crate::scores::Scores;
use crate::settings::{PlayMode, SessionSettings};
use crate::store::KeyValueStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use ttt_core::{Board, Mark, MoveError, Outcome, Position, evaluate, select_move};

/// Where the session sits in its state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Waiting for the given mark to play.
    AwaitingMove(Mark),
    /// The board is frozen until a new game starts.
    Ended(Outcome),
}

/// One-line description of the session for a status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Status {
    /// Computer mode, human to move.
    #[display("Your turn")]
    YourTurn,
    /// Computer mode, computer to move.
    #[display("Computer is thinking")]
    ComputerThinking,
    /// Two-player mode, the given mark to move.
    #[display("{} to move", _0)]
    PlayerTurn(Mark),
    /// The given mark won.
    #[display("{} wins", _0)]
    Won(Mark),
    /// The game was drawn.
    #[display("Draw")]
    Draw,
}

/// Pauses inserted before computer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnDelays {
    /// Before answering a human move.
    pub after_move: Duration,
    /// Before opening a fresh game.
    pub opening: Duration,
}

impl Default for TurnDelays {
    fn default() -> Self {
        Self {
            after_move: Duration::from_millis(180),
            opening: Duration::from_millis(250),
        }
    }
}

/// Read-only view of a session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current board.
    pub board: Board,
    /// Mark to move, or the last mover once the game has ended.
    pub active_mark: Mark,
    /// Current outcome.
    pub outcome: Outcome,
    /// State machine position.
    pub state: SessionState,
    /// Status line.
    pub status: Status,
    /// Score tallies.
    pub scores: Scores,
    /// Active settings.
    pub settings: SessionSettings,
    /// Current game generation.
    pub generation: Generation,
    /// True while a computer move is scheduled but not yet played.
    pub computer_pending: bool,
}

/// A single tic-tac-toe session.
///
/// The session owns the board and the score record and is the only thing
/// that mutates them. Scores are persisted through the injected store after
/// every finished game and on reset; computer moves are timed through the
/// injected scheduler.
#[derive(Debug)]
pub struct Session {
    settings: SessionSettings,
    delays: TurnDelays,
    board: Board,
    active: Mark,
    outcome: Outcome,
    scores: Scores,
    generation: Generation,
    pending: Option<ComputerTurn>,
    store: Box<dyn KeyValueStore>,
    scheduler: Box<dyn Scheduler>,
    rng: ChaCha8Rng,
}

impl Session {
    /// Creates a session with default delays and a randomly seeded RNG.
    ///
    /// Scores are loaded from `store`. If the computer moves first, its
    /// opening move is scheduled immediately.
    #[instrument(skip(store, scheduler))]
    pub fn new(
        settings: SessionSettings,
        store: Box<dyn KeyValueStore>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(rand::random());
        Self::build(settings, TurnDelays::default(), rng, store, scheduler)
    }

    /// Creates a session from an [`EngineConfig`].
    #[instrument(skip(config, store, scheduler))]
    pub fn from_config(
        config: &EngineConfig,
        store: Box<dyn KeyValueStore>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let delays = TurnDelays {
            after_move: config.move_delay(),
            opening: config.opening_delay(),
        };
        let seed = (*config.seed()).unwrap_or_else(rand::random::<u64>);
        Self::build(
            config.settings(),
            delays,
            ChaCha8Rng::seed_from_u64(seed),
            store,
            scheduler,
        )
    }

    fn build(
        settings: SessionSettings,
        delays: TurnDelays,
        rng: ChaCha8Rng,
        store: Box<dyn KeyValueStore>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let scores = Scores::load(store.as_ref());
        info!(?settings, ?scores, "Creating game session");
        let mut session = Self {
            settings,
            delays,
            board: Board::new(),
            active: Mark::X,
            outcome: Outcome::Ongoing,
            scores,
            generation: Generation::default(),
            pending: None,
            store,
            scheduler,
            rng,
        };
        session.new_game(false);
        session
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move, or the last mover once the game has ended.
    pub fn active_mark(&self) -> Mark {
        self.active
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Score tallies.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Active settings.
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Computer's mark, `None` in two-player mode.
    pub fn computer_mark(&self) -> Option<Mark> {
        match self.settings.mode {
            PlayMode::VsComputer => Some(self.settings.computer_mark()),
            PlayMode::TwoPlayer => None,
        }
    }

    /// Current game generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The computer turn waiting on the scheduler, if any.
    pub fn pending_computer_turn(&self) -> Option<ComputerTurn> {
        self.pending
    }

    /// State machine position.
    pub fn state(&self) -> SessionState {
        if self.outcome.is_over() {
            SessionState::Ended(self.outcome)
        } else {
            SessionState::AwaitingMove(self.active)
        }
    }

    /// Status line for the current position.
    pub fn status(&self) -> Status {
        match self.outcome {
            Outcome::Win(mark, _) => Status::Won(mark),
            Outcome::Draw => Status::Draw,
            Outcome::Ongoing => match self.settings.mode {
                PlayMode::VsComputer if self.active == self.settings.human_mark => Status::YourTurn,
                PlayMode::VsComputer => Status::ComputerThinking,
                PlayMode::TwoPlayer => Status::PlayerTurn(self.active),
            },
        }
    }

    /// Captures everything the presentation layer renders.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            active_mark: self.active,
            outcome: self.outcome,
            state: self.state(),
            status: self.status(),
            scores: self.scores,
            settings: self.settings,
            generation: self.generation,
            computer_pending: self.pending.is_some(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    /// Plays `mark` at `position` on behalf of a human.
    ///
    /// Returns the outcome after the move. On error nothing changes.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] if the game has ended
    /// - [`MoveError::ComputerControlled`] if `mark` belongs to the computer
    /// - [`MoveError::WrongPlayer`] if it is not `mark`'s turn
    /// - [`MoveError::SquareOccupied`] if the square is taken
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn request_move(&mut self, position: Position, mark: Mark) -> Result<Outcome, MoveError> {
        let check = if self.outcome.is_over() {
            Err(MoveError::GameOver)
        } else if self.settings.is_computer(mark) {
            Err(MoveError::ComputerControlled(mark))
        } else if mark != self.active {
            Err(MoveError::WrongPlayer(mark))
        } else {
            Ok(())
        };

        check
            .and_then(|()| self.apply(position, mark))
            .inspect_err(|e| warn!(%position, ?mark, error = %e, "Move rejected"))
    }

    /// Plays the computer's move for a ticket handed back by the scheduler.
    ///
    /// Returns the square played, or `None` when the ticket is stale (older
    /// generation, already resolved) or the computer is no longer to move.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn resolve_computer_turn(&mut self, turn: ComputerTurn) -> Option<Position> {
        if turn.generation() != self.generation {
            debug!(ticket = %turn.generation(), "Discarding computer turn from an earlier game");
            return None;
        }
        if self.pending != Some(turn) {
            debug!("Discarding computer turn that is no longer pending");
            return None;
        }
        self.pending = None;

        if self.outcome.is_over() || !self.settings.is_computer(self.active) {
            debug!("Computer is not to move, ignoring turn");
            return None;
        }

        let computer = self.active;
        let choice = select_move(
            &self.board,
            computer,
            computer.opponent(),
            self.settings.difficulty,
            &mut self.rng,
        );
        debug_assert!(choice.is_ok(), "computer asked to move on a full board");
        let position = match choice {
            Ok(position) => position,
            Err(e) => {
                error!(error = %e, board = %self.board.display(), "Computer could not pick a move");
                return None;
            }
        };

        let applied = self.apply(position, computer);
        debug_assert!(applied.is_ok(), "strategy returned an illegal square");
        match applied {
            Ok(_) => Some(position),
            Err(e) => {
                error!(error = %e, %position, "Computer picked an illegal move");
                None
            }
        }
    }

    /// Clears the board and starts the next game.
    ///
    /// With `keep_turn_order` the last active mark opens; otherwise X does.
    /// Any scheduled computer move from the previous game is dropped.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn new_game(&mut self, keep_turn_order: bool) {
        self.scheduler.cancel();
        self.pending = None;
        self.generation = self.generation.next();
        self.board = Board::new();
        self.outcome = Outcome::Ongoing;
        if !keep_turn_order {
            self.active = Mark::X;
        }
        info!(generation = %self.generation, first = ?self.active, "New game started");

        if self.settings.is_computer(self.active) {
            self.schedule_computer_turn(self.delays.opening);
        }
    }

    /// Replaces the settings and starts a new game with X to move.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub fn reconfigure(&mut self, settings: SessionSettings) {
        info!(?settings, "Reconfiguring session");
        self.settings = settings;
        self.active = Mark::X;
        self.new_game(false);
    }

    /// Zeroes the score tallies and persists them. The board is untouched.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
        self.persist_scores();
        info!("Scores reset");
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Places an already-authorized move and advances the state machine.
    fn apply(&mut self, position: Position, mark: Mark) -> Result<Outcome, MoveError> {
        self.board = self.board.place(position, mark)?;
        let outcome = evaluate(&self.board);
        debug!(%position, ?mark, board = %self.board.display(), "Move applied");

        if outcome.is_over() {
            self.outcome = outcome;
            self.scores.record(&outcome);
            self.persist_scores();
            info!(%outcome, scores = ?self.scores, "Game over");
        } else {
            self.active = mark.opponent();
            if self.settings.is_computer(self.active) {
                self.schedule_computer_turn(self.delays.after_move);
            }
        }

        Ok(outcome)
    }

    /// Records the pending ticket before arming the timer, so the human is
    /// locked out from the moment the computer becomes active.
    fn schedule_computer_turn(&mut self, delay: Duration) {
        let turn = ComputerTurn::new(self.generation, delay);
        self.pending = Some(turn);
        debug!(generation = %self.generation, ?delay, "Scheduling computer turn");
        self.scheduler.schedule(turn);
    }

    fn persist_scores(&self) {
        if let Err(e) = self.scores.save(self.store.as_ref()) {
            warn!(error = %e, "Failed to persist scores");
        }
    }
}
