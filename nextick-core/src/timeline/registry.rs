//! Live-thunk registry.
//!
//! The registry maps every outstanding scheduled value to the tick it is
//! bound to. It only holds weak references: owners (events, streams, client
//! code) keep a scheduled value alive, the registry only gets a chance to
//! dispose of it once its tick has passed.

use std::rc::{Rc, Weak};

use crate::next::{ThunkId, ThunkKind};

use super::Tick;

/// A scheduled value that can have its state released by the clock.
pub(crate) trait Disposable {
    /// Drop the producer and any cached value. Later forces must fail.
    fn dispose(&self);
}

/// One registered scheduled value.
pub(crate) struct Entry {
    pub(crate) id: ThunkId,
    pub(crate) kind: ThunkKind,
    pub(crate) target: Tick,
    thunk: Weak<dyn Disposable>,
}

impl Entry {
    pub(crate) fn new(
        id: ThunkId,
        kind: ThunkKind,
        target: Tick,
        thunk: Weak<dyn Disposable>,
    ) -> Self {
        Self {
            id,
            kind,
            target,
            thunk,
        }
    }
}

/// Result of partitioning the registry against a new tick.
pub(crate) struct Sweep {
    /// Entries still bound to the current tick or later.
    pub(crate) retained: Vec<Entry>,
    /// Expired entries whose scheduled value is still owned somewhere.
    pub(crate) expired: Vec<(Entry, Rc<dyn Disposable>)>,
    /// Expired or retained entries whose scheduled value was already dropped.
    pub(crate) released: usize,
}

/// The set of live scheduled values for one runtime.
pub(crate) struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn register(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Move every entry out, leaving the allocation in place.
    pub(crate) fn take_entries(&mut self) -> Vec<Entry> {
        let capacity = self.entries.capacity();
        std::mem::replace(&mut self.entries, Vec::with_capacity(capacity))
    }

    /// Put retained entries back, ahead of anything registered meanwhile.
    pub(crate) fn restore(&mut self, mut retained: Vec<Entry>) {
        retained.append(&mut self.entries);
        self.entries = retained;
    }

    /// Partition `entries` against tick `now`.
    ///
    /// Nothing is disposed here; the caller disposes `expired` once it no
    /// longer holds the registry borrow.
    pub(crate) fn sweep(entries: Vec<Entry>, now: Tick) -> Sweep {
        let mut sweep = Sweep {
            retained: Vec::with_capacity(entries.len()),
            expired: Vec::new(),
            released: 0,
        };

        for entry in entries {
            if entry.thunk.strong_count() == 0 {
                sweep.released += 1;
            } else if entry.target >= now {
                sweep.retained.push(entry);
            } else if let Some(thunk) = entry.thunk.upgrade() {
                sweep.expired.push((entry, thunk));
            } else {
                sweep.released += 1;
            }
        }

        sweep
    }
}
