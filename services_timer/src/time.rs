//! Virtual time
//!
//! Timers run against a clock that only moves when the host advances it, so
//! scripted sessions and tests see the same firing order every run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use std::time::Duration;

/// A point on the virtual clock, in nanoseconds since the clock started
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    nanos: u64,
}

impl Instant {
    /// The moment the clock started
    pub const ZERO: Self = Self { nanos: 0 };

    pub fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    pub fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Time elapsed since `earlier`, zero if `earlier` is in the future
    pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(earlier.nanos))
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, duration: Duration) -> Self::Output {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        Instant::from_nanos(self.nanos.saturating_add(nanos))
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t+{}ms", self.nanos / 1_000_000)
    }
}

/// Manually advanced clock
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Instant,
}

impl Default for Instant {
    fn default() -> Self {
        Self::ZERO
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Moves the clock forward and returns the new time
    pub fn advance(&mut self, by: Duration) -> Instant {
        self.now = self.now + by;
        self.now
    }
}
