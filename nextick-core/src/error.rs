//! Error types.
//!
//! Every error here is a contract violation by the driving loop or by client
//! code. None of them are retried by the library; they propagate to whoever
//! called `force` or an event accessor.

use std::fmt;

use crate::timeline::Tick;

/// Result alias used throughout the crate.
pub type Result<T, E = FrpError> = std::result::Result<T, E>;

/// Which variant an event was in when an accessor was misused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventState {
    /// The event has already produced its value.
    Occurred,
    /// The event is still waiting on a scheduled continuation.
    Pending,
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventState::Occurred => f.write_str("occurred"),
            EventState::Pending => f.write_str("pending"),
        }
    }
}

/// Errors raised by scheduled values and events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrpError {
    /// A scheduled value was forced before its tick arrived.
    #[error("value scheduled for tick {scheduled} was forced early at tick {actual}")]
    Timing { scheduled: Tick, actual: Tick },

    /// A scheduled value was forced after its tick passed and it was disposed.
    #[error("value scheduled for tick {scheduled} was disposed; forced at tick {actual}")]
    Disposed { scheduled: Tick, actual: Tick },

    /// An event accessor was used on the wrong variant.
    #[error("`{accessor}` called on an event that is {state}")]
    InvalidState {
        accessor: &'static str,
        state: EventState,
    },

    /// A scheduled value was forced from inside its own producer.
    #[error("value scheduled for tick {scheduled} was forced while its producer was running")]
    Cycle { scheduled: Tick },
}

impl FrpError {
    /// The tick the offending scheduled value was bound to, if any.
    pub fn scheduled_tick(&self) -> Option<Tick> {
        match self {
            FrpError::Timing { scheduled, .. }
            | FrpError::Disposed { scheduled, .. }
            | FrpError::Cycle { scheduled } => Some(*scheduled),
            FrpError::InvalidState { .. } => None,
        }
    }
}
