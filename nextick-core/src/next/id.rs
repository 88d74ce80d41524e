//! Identity for scheduled values.

use std::fmt;

/// Unique identifier for a scheduled value within one runtime.
///
/// Ids are handed out by the runtime in creation order, so they are stable
/// across runs of the same program and useful in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThunkId(u64);

impl ThunkId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ThunkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ThunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The operation that created a scheduled value.
///
/// Recorded for tracing and diagnostics only; it does not change how the
/// value is forced or disposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThunkKind {
    /// Scheduled directly from a producer.
    Delay,
    /// Derived from another scheduled value by `map`.
    Map,
    /// Pair of two scheduled values.
    Zip,
    /// Scheduled function applied to a scheduled argument.
    Apply,
    /// Placeholder for the next instance of a `fix` definition.
    Fix,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thunk_id_display() {
        let id = ThunkId::from(12);
        assert_eq!(id.raw(), 12);
        assert_eq!(id.to_string(), "#12");
    }
}
