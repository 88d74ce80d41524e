//! Runtime
//!
//! The runtime is the clock plus its registry. It is the only place logical
//! time changes, and the only place scheduled values are created.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;

use super::config::{ConfigError, RuntimeConfig};
use super::registry::{Disposable, Entry, Registry};
use super::Tick;
use crate::error::Result;
use crate::next::{Next, ThunkId, ThunkKind};

/// Snapshot of a runtime's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuntimeStats {
    /// The current tick.
    pub tick: Tick,
    /// Registry entries not yet swept. May include values already dropped by
    /// their owners; those are released on the next advance.
    pub live: usize,
    /// Scheduled values created so far.
    pub scheduled: u64,
    /// Producers that ran to completion.
    pub produced: u64,
    /// Scheduled values disposed by the clock.
    pub disposed: u64,
    /// Registry entries dropped because nothing owned the value any more.
    pub released: u64,
}

#[derive(Default)]
struct Counters {
    scheduled: Cell<u64>,
    produced: Cell<u64>,
    disposed: Cell<u64>,
    released: Cell<u64>,
}

impl Counters {
    fn bump(counter: &Cell<u64>, by: u64) {
        counter.set(counter.get() + by);
    }
}

struct RuntimeInner {
    tick: Cell<Tick>,
    next_id: Cell<u64>,
    registry: RefCell<Registry>,
    counters: Counters,
}

/// A single logical timeline.
///
/// Cloning a `Runtime` clones the handle, not the timeline: every clone sees
/// the same tick and the same registry.
///
/// # Example
///
/// ```rust,ignore
/// let rt = Runtime::new();
/// let answer = rt.schedule(|| 42);
///
/// assert!(answer.force().is_err()); // too early
/// rt.advance();
/// assert_eq!(answer.force()?, 42);
/// ```
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    /// Create a runtime at tick zero.
    pub fn new() -> Self {
        Self::from_valid_config(RuntimeConfig::default())
    }

    /// Create a runtime from explicit settings.
    ///
    /// Fails if the config does not pass [`RuntimeConfig::validate`].
    pub fn with_config(config: RuntimeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: RuntimeConfig) -> Self {
        tracing::debug!(
            initial_tick = %config.initial_tick,
            registry_capacity = config.registry_capacity,
            "creating runtime"
        );

        Self {
            inner: Rc::new(RuntimeInner {
                tick: Cell::new(config.initial_tick),
                next_id: Cell::new(0),
                registry: RefCell::new(Registry::with_capacity(config.registry_capacity)),
                counters: Counters::default(),
            }),
        }
    }

    /// The current tick.
    pub fn current_tick(&self) -> Tick {
        self.inner.tick.get()
    }

    /// Advance the clock by one tick and dispose of expired scheduled values.
    ///
    /// Returns the new tick.
    pub fn advance(&self) -> Tick {
        let now = self.inner.tick.get().succ();
        self.inner.tick.set(now);

        let entries = self.inner.registry.borrow_mut().take_entries();
        let sweep = Registry::sweep(entries, now);
        let retained = sweep.retained.len();
        self.inner.registry.borrow_mut().restore(sweep.retained);

        // Disposal drops user values, which may schedule more thunks.
        let disposed = sweep.expired.len();
        for (entry, thunk) in sweep.expired {
            thunk.dispose();
            tracing::trace!(
                thunk = %entry.id,
                kind = ?entry.kind,
                target = %entry.target,
                "disposed expired thunk"
            );
        }

        Counters::bump(&self.inner.counters.disposed, disposed as u64);
        Counters::bump(&self.inner.counters.released, sweep.released as u64);

        tracing::debug!(
            tick = %now,
            retained,
            disposed,
            released = sweep.released,
            "advanced clock"
        );

        now
    }

    /// Schedule `producer` to run on the next tick.
    ///
    /// The returned value can only be forced once [`advance`](Self::advance)
    /// has been called exactly one more time.
    pub fn schedule<T, F>(&self, producer: F) -> Next<T>
    where
        T: 'static,
        F: FnOnce() -> T + 'static,
    {
        self.try_schedule(move || Ok(producer()))
    }

    /// Schedule a fallible producer to run on the next tick.
    ///
    /// An error returned by `producer` is cached and reported by every later
    /// force of the scheduled value.
    pub fn try_schedule<T, F>(&self, producer: F) -> Next<T>
    where
        T: 'static,
        F: FnOnce() -> Result<T> + 'static,
    {
        let target = self.current_tick().succ();
        Next::scheduled(self, ThunkKind::Delay, target, Box::new(producer))
    }

    /// Bookkeeping snapshot.
    pub fn stats(&self) -> RuntimeStats {
        let counters = &self.inner.counters;
        RuntimeStats {
            tick: self.current_tick(),
            live: self.live_count(),
            scheduled: counters.scheduled.get(),
            produced: counters.produced.get(),
            disposed: counters.disposed.get(),
            released: counters.released.get(),
        }
    }

    /// Number of registry entries not yet swept.
    pub fn live_count(&self) -> usize {
        self.inner.registry.borrow().len()
    }

    /// Whether two handles refer to the same timeline.
    pub fn same_timeline(&self, other: &Runtime) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn allocate_id(&self) -> ThunkId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        ThunkId::from(id)
    }

    pub(crate) fn register(
        &self,
        id: ThunkId,
        kind: ThunkKind,
        target: Tick,
        thunk: Weak<dyn Disposable>,
    ) {
        self.inner
            .registry
            .borrow_mut()
            .register(Entry::new(id, kind, target, thunk));
        Counters::bump(&self.inner.counters.scheduled, 1);
    }

    pub(crate) fn note_produced(&self) {
        Counters::bump(&self.inner.counters.produced, 1);
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("tick", &self.current_tick())
            .field("live", &self.live_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
