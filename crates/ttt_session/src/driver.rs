//! Async driver: one Tokio task owns the session and serializes all access.
//!
//! The presentation layer talks to the task through a [`DriverHandle`] and
//! listens on the [`GameEvent`] channel. Computer turns come back into the
//! same command channel from a [`TokioScheduler`], so every transition runs on
//! the driver task.

use crate::config::EngineConfig;
use crate::schedule::{ComputerTurn, Scheduler};
use crate::session::{Session, SessionSnapshot};
use crate::settings::SessionSettings;
use crate::store::KeyValueStore;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use ttt_core::{Mark, MoveError, Outcome, Position};

/// Requests handled by the driver task.
#[derive(Debug)]
pub enum Command {
    /// A human plays `mark` at `position`.
    RequestMove {
        /// Target square.
        position: Position,
        /// Mark being played.
        mark: Mark,
    },
    /// Start the next game.
    NewGame {
        /// Keep the last active mark as the opener.
        keep_turn_order: bool,
    },
    /// Replace the settings and restart.
    Reconfigure(SessionSettings),
    /// Zero the score tallies.
    ResetScores,
    /// A scheduled computer turn is due.
    ComputerTurnDue(ComputerTurn),
    /// Reply with the current snapshot.
    Snapshot(oneshot::Sender<SessionSnapshot>),
    /// Stop the driver task.
    Shutdown,
}

/// Messages sent from the driver to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Session state changed.
    StateChanged(SessionSnapshot),
    /// A mark was placed.
    MovePlayed {
        /// Mark placed.
        mark: Mark,
        /// Square played.
        position: Position,
    },
    /// A move request was refused; nothing changed.
    MoveRejected(MoveError),
    /// The game ended.
    GameOver(Outcome),
}

/// Error returned when the driver task is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum DriverError {
    /// The driver task has stopped.
    #[display("Game driver has stopped")]
    Stopped,
}

impl std::error::Error for DriverError {}

/// Scheduler backed by Tokio timers.
///
/// Each ticket sleeps on its own task and is then sent back to the driver as
/// [`Command::ComputerTurnDue`]. The sender is weak so pending timers do not
/// keep a dropped driver alive.
#[derive(Debug)]
pub struct TokioScheduler {
    commands: mpsc::WeakUnboundedSender<Command>,
    timer: Option<JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler that reports due turns on `commands`.
    pub fn new(commands: &mpsc::UnboundedSender<Command>) -> Self {
        Self {
            commands: commands.downgrade(),
            timer: None,
        }
    }
}

impl Scheduler for TokioScheduler {
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[instrument(skip(self))]
    fn schedule(&mut self, turn: ComputerTurn) {
        self.cancel();
        let commands = self.commands.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(turn.delay()).await;
            match commands.upgrade() {
                Some(tx) => {
                    if tx.send(Command::ComputerTurnDue(turn)).is_err() {
                        debug!("Driver stopped before computer turn fired");
                    }
                }
                None => debug!("Driver dropped before computer turn fired"),
            }
        }));
    }

    #[instrument(skip(self))]
    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Clonable front end to a running driver.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl DriverHandle {
    fn send(&self, command: Command) -> Result<(), DriverError> {
        self.commands.send(command).map_err(|_| DriverError::Stopped)
    }

    /// Requests a human move.
    pub fn request_move(&self, position: Position, mark: Mark) -> Result<(), DriverError> {
        self.send(Command::RequestMove { position, mark })
    }

    /// Starts the next game.
    pub fn new_game(&self, keep_turn_order: bool) -> Result<(), DriverError> {
        self.send(Command::NewGame { keep_turn_order })
    }

    /// Replaces the settings and restarts.
    pub fn reconfigure(&self, settings: SessionSettings) -> Result<(), DriverError> {
        self.send(Command::Reconfigure(settings))
    }

    /// Zeroes the score tallies.
    pub fn reset_scores(&self) -> Result<(), DriverError> {
        self.send(Command::ResetScores)
    }

    /// Fetches the current session snapshot.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, DriverError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| DriverError::Stopped)
    }

    /// Stops the driver task.
    pub fn shutdown(&self) -> Result<(), DriverError> {
        self.send(Command::Shutdown)
    }
}

/// Task that owns a [`Session`] and applies commands one at a time.
pub struct GameDriver {
    session: Session,
    commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl GameDriver {
    /// Spawns a driver for a new session built from `config`.
    ///
    /// Returns the command handle, the event stream, and the task handle.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[instrument(skip(config, store))]
    pub fn spawn(
        config: &EngineConfig,
        store: Box<dyn KeyValueStore>,
    ) -> (DriverHandle, mpsc::UnboundedReceiver<GameEvent>, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let scheduler = TokioScheduler::new(&command_tx);
        let session = Session::from_config(config, store, Box::new(scheduler));
        let driver = Self {
            session,
            commands: command_rx,
            events: event_tx,
        };

        let task = tokio::spawn(driver.run());
        (DriverHandle { commands: command_tx }, event_rx, task)
    }

    /// Runs until shutdown or until every handle is dropped.
    async fn run(mut self) {
        info!("Game driver started");
        self.publish_state();

        while let Some(command) = self.commands.recv().await {
            match command {
                Command::RequestMove { position, mark } => {
                    match self.session.request_move(position, mark) {
                        Ok(outcome) => self.after_move(mark, position, outcome),
                        Err(e) => self.emit(GameEvent::MoveRejected(e)),
                    }
                }
                Command::ComputerTurnDue(turn) => {
                    let mark = self.session.active_mark();
                    if let Some(position) = self.session.resolve_computer_turn(turn) {
                        let outcome = self.session.outcome();
                        self.after_move(mark, position, outcome);
                    }
                }
                Command::NewGame { keep_turn_order } => {
                    self.session.new_game(keep_turn_order);
                    self.publish_state();
                }
                Command::Reconfigure(settings) => {
                    self.session.reconfigure(settings);
                    self.publish_state();
                }
                Command::ResetScores => {
                    self.session.reset_scores();
                    self.publish_state();
                }
                Command::Snapshot(reply) => {
                    if reply.send(self.session.snapshot()).is_err() {
                        debug!("Snapshot requester went away");
                    }
                }
                Command::Shutdown => break,
            }
        }

        info!("Game driver stopped");
    }

    fn after_move(&self, mark: Mark, position: Position, outcome: Outcome) {
        self.emit(GameEvent::MovePlayed { mark, position });
        if outcome.is_over() {
            self.emit(GameEvent::GameOver(outcome));
        }
        self.publish_state();
    }

    fn publish_state(&self) {
        self.emit(GameEvent::StateChanged(self.session.snapshot()));
    }

    fn emit(&self, event: GameEvent) {
        if self.events.send(event).is_err() {
            warn!("No listener for game events");
        }
    }
}
