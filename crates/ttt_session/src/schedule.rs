//! Delayed computer turns.
//!
//! The session never sleeps. When the computer is to move it hands a
//! [`ComputerTurn`] ticket to a [`Scheduler`], and the scheduler passes the
//! ticket back to [`Session::resolve_computer_turn`](crate::Session::resolve_computer_turn)
//! once the delay has elapsed. Tickets from an older [`Generation`] are
//! discarded on arrival.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, instrument};

/// Tag identifying one game instance. Bumped by every new game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{}", _0)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A computer move waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    generation: Generation,
    delay: Duration,
}

impl ComputerTurn {
    /// Creates a ticket for `generation` due after `delay`.
    pub fn new(generation: Generation, delay: Duration) -> Self {
        Self { generation, delay }
    }

    /// Game the ticket belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// How long to wait before resolving the ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Timer primitive consumed by the session.
pub trait Scheduler: Send + std::fmt::Debug {
    /// Arranges for `turn` to be resolved after `turn.delay()`.
    fn schedule(&mut self, turn: ComputerTurn);

    /// Drops any turn that has not fired yet.
    fn cancel(&mut self);
}

/// Scheduler that only records tickets; callers fire them by hand.
///
/// Clones share the same queue, so a test can keep one clone while the
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<VecDeque<ComputerTurn>>>,
}

impl ManualScheduler {
    /// Creates a scheduler with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest scheduled turn.
    pub fn pop_due(&self) -> Option<ComputerTurn> {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
    }

    /// Number of turns still waiting.
    pub fn pending(&self) -> usize {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Scheduler for ManualScheduler {
    #[instrument(skip(self))]
    fn schedule(&mut self, turn: ComputerTurn) {
        debug!(generation = %turn.generation(), "Recording computer turn");
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(turn);
    }

    #[instrument(skip(self))]
    fn cancel(&mut self) {
        self.queue
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_increases() {
        let first = Generation::default();
        assert!(first.next() > first);
        assert_eq!(first.next().next().value(), 2);
    }

    #[test]
    fn test_manual_scheduler_clones_share_queue() {
        let observer = ManualScheduler::new();
        let mut owned = observer.clone();
        let turn = ComputerTurn::new(Generation::default(), Duration::from_millis(180));
        owned.schedule(turn);
        assert_eq!(observer.pending(), 1);
        owned.cancel();
        assert_eq!(observer.pop_due(), None);
    }
}
