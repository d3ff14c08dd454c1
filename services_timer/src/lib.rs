//! # Timer Service
//!
//! Cancellable deferred callbacks on a virtual clock.
//!
//! ## Philosophy
//!
//! - **Explicit time**: nothing fires until the owner calls [`TimerQueue::advance`]
//! - **Deterministic**: timers fire in deadline order, ties in scheduling order
//! - **Cancellable**: every timer has an id; teardown cancels what is pending
//! - **Data tasks**: a timer carries a value of type `T`; the owner decides what
//!   firing means, so no closure ever outlives the state it touches
//!
//! ## Example
//!
//! ```
//! use services_timer::TimerQueue;
//! use std::time::Duration;
//!
//! let mut timers = TimerQueue::new();
//! let id = timers.schedule("scroll", Duration::from_millis(10), "bottom");
//!
//! assert!(timers.advance(Duration::from_millis(5)).is_empty());
//! let fired = timers.advance(Duration::from_millis(5));
//! assert_eq!(fired[0].id, id);
//! assert_eq!(fired[0].task, "bottom");
//! ```

pub mod time;

pub use time::{Instant, VirtualClock};

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Timer errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer {0} is not pending")]
    NotPending(TimerId),
}

/// Timer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(Uuid);

impl TimerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer:{}", self.0)
    }
}

/// Lifecycle of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Pending => write!(f, "Pending"),
            TimerState::Fired => write!(f, "Fired"),
            TimerState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

struct PendingTimer<T> {
    id: TimerId,
    name: String,
    deadline: Instant,
    seq: u64,
    task: T,
}

/// A timer that reached its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TimerId,
    pub name: String,
    pub deadline: Instant,
    pub task: T,
}

/// How many finished timers a queue remembers for `state`
pub const FINISHED_HISTORY: usize = 64;

/// Timer queue
pub struct TimerQueue<T> {
    clock: VirtualClock,
    /// Pending timers, unordered
    pending: Vec<PendingTimer<T>>,
    /// Most recent finished timers, oldest first
    finished: VecDeque<(TimerId, TimerState)>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            clock: VirtualClock::new(),
            pending: Vec::new(),
            finished: VecDeque::with_capacity(FINISHED_HISTORY),
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Schedules `task` to fire after `delay`
    pub fn schedule(&mut self, name: impl Into<String>, delay: Duration, task: T) -> TimerId {
        let id = TimerId::new();
        let name = name.into();
        let deadline = self.clock.now() + delay;

        debug!(timer = %id, name = %name, deadline = %deadline, "timer scheduled");

        self.pending.push(PendingTimer {
            id,
            name,
            deadline,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
        id
    }

    /// Cancels a pending timer
    pub fn cancel(&mut self, id: TimerId) -> Result<(), TimerError> {
        let pos = self
            .pending
            .iter()
            .position(|timer| timer.id == id)
            .ok_or(TimerError::NotPending(id))?;

        let timer = self.pending.remove(pos);
        debug!(timer = %id, name = %timer.name, "timer cancelled");
        self.record(id, TimerState::Cancelled);
        Ok(())
    }

    /// Cancels every pending timer and returns how many there were
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        let cancelled: Vec<_> = self.pending.drain(..).collect();
        for timer in cancelled {
            debug!(timer = %timer.id, name = %timer.name, "timer cancelled");
            self.record(timer.id, TimerState::Cancelled);
        }
        count
    }

    /// Moves the clock forward and returns every timer now due
    pub fn advance(&mut self, by: Duration) -> Vec<Fired<T>> {
        let now = self.clock.advance(by);
        self.collect_due(now)
    }

    /// Advances to the last pending deadline, firing everything
    pub fn run_until_idle(&mut self) -> Vec<Fired<T>> {
        match self.pending.iter().map(|timer| timer.deadline).max() {
            Some(last) => {
                let wait = last.saturating_duration_since(self.clock.now());
                self.advance(wait)
            }
            None => Vec::new(),
        }
    }

    fn collect_due(&mut self, now: Instant) -> Vec<Fired<T>> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].deadline <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|timer| (timer.deadline, timer.seq));

        due.into_iter()
            .map(|timer| {
                debug!(timer = %timer.id, name = %timer.name, now = %now, "timer fired");
                self.record(timer.id, TimerState::Fired);
                Fired {
                    id: timer.id,
                    name: timer.name,
                    deadline: timer.deadline,
                    task: timer.task,
                }
            })
            .collect()
    }

    fn record(&mut self, id: TimerId, state: TimerState) {
        if self.finished.len() == FINISHED_HISTORY {
            self.finished.pop_front();
        }
        self.finished.push_back((id, state));
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|timer| timer.deadline).min()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|timer| timer.id == id)
    }

    /// State of a timer this queue has seen.
    ///
    /// Only the last `FINISHED_HISTORY` finished timers are remembered;
    /// older ones report `None`.
    pub fn state(&self, id: TimerId) -> Option<TimerState> {
        if self.is_pending(id) {
            return Some(TimerState::Pending);
        }
        self.finished
            .iter()
            .rev()
            .find(|(finished_id, _)| *finished_id == id)
            .map(|(_, state)| *state)
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finished_history_is_bounded() {
        let mut queue = TimerQueue::new();
        let first = queue.schedule("scroll", Duration::from_millis(1), ());
        queue.advance(Duration::from_millis(1));
        assert_eq!(queue.state(first), Some(TimerState::Fired));

        let mut last = first;
        for _ in 0..FINISHED_HISTORY {
            last = queue.schedule("scroll", Duration::from_millis(1), ());
            queue.advance(Duration::from_millis(1));
        }

        assert_eq!(queue.finished.len(), FINISHED_HISTORY);
        assert_eq!(queue.state(first), None);
        assert_eq!(queue.state(last), Some(TimerState::Fired));
    }

    #[test]
    fn test_timer_id_unique() {
        assert_ne!(TimerId::new(), TimerId::new());
    }

    #[test]
    fn test_nothing_fires_before_deadline() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule("scroll", Duration::from_millis(10), 1);

        assert!(timers.advance(Duration::from_millis(9)).is_empty());
        assert!(timers.is_pending(id));
        assert_eq!(timers.state(id), Some(TimerState::Pending));
    }

    #[test]
    fn test_fires_at_deadline() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule("scroll", Duration::from_millis(10), 1);

        let fired = timers.advance(Duration::from_millis(10));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert_eq!(fired[0].task, 1);
        assert_eq!(timers.pending_count(), 0);
        assert_eq!(timers.state(id), Some(TimerState::Fired));
    }

    #[test]
    fn test_firing_order() {
        let mut timers = TimerQueue::new();
        timers.schedule("late", Duration::from_millis(30), "late");
        timers.schedule("first", Duration::from_millis(10), "first");
        timers.schedule("second", Duration::from_millis(10), "second");

        let fired: Vec<&str> = timers
            .advance(Duration::from_millis(50))
            .into_iter()
            .map(|f| f.task)
            .collect();
        assert_eq!(fired, vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let id = timers.schedule("scroll", Duration::from_millis(10), ());

        timers.cancel(id).unwrap();
        assert!(timers.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(timers.state(id), Some(TimerState::Cancelled));
        assert_eq!(timers.cancel(id), Err(TimerError::NotPending(id)));
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = TimerQueue::new();
        timers.schedule("a", Duration::from_millis(1), ());
        timers.schedule("b", Duration::from_millis(2), ());

        assert_eq!(timers.cancel_all(), 2);
        assert_eq!(timers.cancel_all(), 0);
        assert!(timers.next_deadline().is_none());
    }

    #[test]
    fn test_run_until_idle() {
        let mut timers = TimerQueue::new();
        timers.schedule("a", Duration::from_millis(10), 'a');
        timers.schedule("b", Duration::from_millis(25), 'b');

        assert_eq!(
            timers.next_deadline(),
            Some(Instant::from_nanos(10_000_000))
        );
        let fired = timers.run_until_idle();
        assert_eq!(fired.len(), 2);
        assert_eq!(timers.now(), Instant::from_nanos(25_000_000));
        assert!(timers.run_until_idle().is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut timers = TimerQueue::new();
        timers.advance(Duration::from_millis(100));
        timers.schedule("later", Duration::from_millis(10), ());
        assert_eq!(
            timers.next_deadline(),
            Some(Instant::from_nanos(110_000_000))
        );
    }

    #[test]
    fn test_timer_id_serialization() {
        let id = TimerId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: TimerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
