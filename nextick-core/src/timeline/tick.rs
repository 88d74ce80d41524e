//! Logical ticks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A discrete step of logical time.
///
/// Ticks only ever move forward, one at a time, through
/// [`Runtime::advance`](super::Runtime::advance).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(u64);

impl Tick {
    /// The first tick of a fresh runtime.
    pub const ZERO: Tick = Tick(0);

    /// The latest tick a runtime may be configured to start at.
    ///
    /// Leaves half the `u64` range for advancing, far more ticks than any
    /// loop will ever run.
    pub const MAX_INITIAL: Tick = Tick(u64::MAX / 2);

    /// Get the raw tick number.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// The tick immediately after this one.
    ///
    /// Saturates at `u64::MAX` rather than wrapping back to zero.
    pub fn succ(self) -> Tick {
        Tick(self.0.saturating_add(1))
    }
}

impl From<u64> for Tick {
    fn from(tick: u64) -> Self {
        Self(tick)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
