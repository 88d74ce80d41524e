//! The scheduled-value cell and its force/dispose state machine.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::{Rc, Weak};

use super::id::{ThunkId, ThunkKind};
use crate::error::{FrpError, Result};
use crate::timeline::{Disposable, Runtime, Tick};

/// A pending computation. Runs at most once.
pub(crate) type Producer<T> = Box<dyn FnOnce() -> Result<T>>;

enum ThunkState<T> {
    /// Waiting for its tick.
    Scheduled(Producer<T>),
    /// The producer is running right now.
    Forcing,
    /// Forced at its tick; the producer has been released.
    Produced(T),
    /// The producer returned an error, which every later force replays.
    Failed(FrpError),
    /// The tick passed and the clock released everything.
    Disposed,
}

impl<T> ThunkState<T> {
    fn name(&self) -> &'static str {
        match self {
            ThunkState::Scheduled(_) => "scheduled",
            ThunkState::Forcing => "forcing",
            ThunkState::Produced(_) => "produced",
            ThunkState::Failed(_) => "failed",
            ThunkState::Disposed => "disposed",
        }
    }
}

struct ThunkCell<T> {
    id: ThunkId,
    kind: ThunkKind,
    target: Tick,
    state: RefCell<ThunkState<T>>,
}

impl<T> Disposable for ThunkCell<T> {
    fn dispose(&self) {
        // Drop the old state only after the borrow is released: it may own
        // values whose destructors reach back into this runtime.
        let previous = self.state.replace(ThunkState::Disposed);
        drop(previous);
    }
}

/// Moves a cell out of `Forcing` if its producer unwinds.
struct ForcingGuard<'a, T> {
    state: &'a RefCell<ThunkState<T>>,
}

impl<T> Drop for ForcingGuard<'_, T> {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.try_borrow_mut() {
            if matches!(*state, ThunkState::Forcing) {
                *state = ThunkState::Disposed;
            }
        }
    }
}

/// A value bound to exactly one future tick.
///
/// `Next` is a cheap handle: clones share the same cell, so forcing one clone
/// makes the result available to all of them.
///
/// # Example
///
/// ```rust,ignore
/// let rt = Runtime::new();
/// let doubled = rt.schedule(|| 21).map(|x| x * 2);
///
/// rt.advance();
/// assert_eq!(doubled.force()?, 42);
/// ```
pub struct Next<T> {
    cell: Rc<ThunkCell<T>>,
    runtime: Runtime,
}

impl<T: 'static> Next<T> {
    /// Create and register a new scheduled value.
    pub(crate) fn scheduled(
        runtime: &Runtime,
        kind: ThunkKind,
        target: Tick,
        producer: Producer<T>,
    ) -> Self {
        let id = runtime.allocate_id();
        let cell = Rc::new(ThunkCell {
            id,
            kind,
            target,
            state: RefCell::new(ThunkState::Scheduled(producer)),
        });

        let weak = Rc::downgrade(&cell) as Weak<dyn Disposable>;
        runtime.register(id, kind, target, weak);

        tracing::trace!(thunk = %id, ?kind, target = %target, "scheduled thunk");

        Self {
            cell,
            runtime: runtime.clone(),
        }
    }
}

impl<T> Next<T> {
    /// This value's unique id.
    pub fn id(&self) -> ThunkId {
        self.cell.id
    }

    /// The operation that created this value.
    pub fn kind(&self) -> ThunkKind {
        self.cell.kind
    }

    /// The only tick at which this value may be forced.
    pub fn target(&self) -> Tick {
        self.cell.target
    }

    /// The runtime this value was scheduled on.
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Whether both handles refer to the same scheduled value.
    pub fn ptr_eq(&self, other: &Next<T>) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Whether the producer has run and its result is cached.
    pub fn is_produced(&self) -> bool {
        matches!(*self.cell.state.borrow(), ThunkState::Produced(_))
    }

    /// Whether the clock has disposed of this value.
    pub fn is_disposed(&self) -> bool {
        matches!(*self.cell.state.borrow(), ThunkState::Disposed)
    }

    fn reject(&self, err: FrpError) -> FrpError {
        tracing::debug!(thunk = %self.cell.id, kind = ?self.cell.kind, %err, "force rejected");
        err
    }
}

impl<T: Clone> Next<T> {
    /// Resolve this value.
    ///
    /// Only valid while the runtime's current tick equals [`target`](Self::target).
    /// The first force runs the producer; later forces on the same tick return
    /// the cached result.
    pub fn force(&self) -> Result<T> {
        let scheduled = self.cell.target;
        let actual = self.runtime.current_tick();

        match actual.cmp(&scheduled) {
            Ordering::Less => return Err(self.reject(FrpError::Timing { scheduled, actual })),
            Ordering::Greater => return Err(self.reject(FrpError::Disposed { scheduled, actual })),
            Ordering::Equal => {}
        }

        // Settled states are read through a shared borrow, so a panicking
        // `Clone` leaves the cache in place.
        match &*self.cell.state.borrow() {
            ThunkState::Scheduled(_) => {}
            ThunkState::Produced(value) => return Ok(value.clone()),
            ThunkState::Failed(err) => return Err(err.clone()),
            ThunkState::Forcing => return Err(self.reject(FrpError::Cycle { scheduled })),
            ThunkState::Disposed => {
                return Err(self.reject(FrpError::Disposed { scheduled, actual }));
            }
        }

        let ThunkState::Scheduled(producer) = self.cell.state.replace(ThunkState::Forcing) else {
            unreachable!("thunk left the scheduled state between check and take");
        };

        let _guard = ForcingGuard {
            state: &self.cell.state,
        };
        let outcome = producer();

        // The clock moved on while the producer ran.
        if matches!(*self.cell.state.borrow(), ThunkState::Disposed) {
            let actual = self.runtime.current_tick();
            return Err(self.reject(FrpError::Disposed { scheduled, actual }));
        }

        match outcome {
            Ok(value) => {
                self.cell.state.replace(ThunkState::Produced(value.clone()));
                self.runtime.note_produced();
                tracing::trace!(thunk = %self.cell.id, tick = %scheduled, "produced thunk");
                Ok(value)
            }
            Err(err) => {
                self.cell.state.replace(ThunkState::Failed(err.clone()));
                Err(self.reject(err))
            }
        }
    }
}

impl<T> Clone for Next<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T> fmt::Debug for Next<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self
            .cell
            .state
            .try_borrow()
            .map(|state| state.name())
            .unwrap_or("forcing");

        f.debug_struct("Next")
            .field("id", &self.cell.id)
            .field("kind", &self.cell.kind)
            .field("target", &self.cell.target)
            .field("state", &state)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
