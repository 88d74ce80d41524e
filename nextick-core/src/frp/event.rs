//! One-shot events.

use std::rc::Rc;

use crate::error::{EventState, FrpError, Result};
use crate::next::Next;
use crate::timeline::Runtime;

/// A value that occurs at most once, at some tick.
///
/// # Example
///
/// ```rust,ignore
/// let rt = Runtime::new();
/// let soon = Event::after(&rt, 2, "soon");
/// let late = Event::after(&rt, 5, "late");
///
/// // Whichever occurs first wins
/// let mut first = soon.join(late);
/// while !first.has_value() {
///     rt.advance();
///     first = first.step()?;
/// }
/// assert_eq!(first.into_now()?, "soon");
/// ```
#[derive(Debug, Clone)]
pub enum Event<T> {
    /// The event has happened.
    Occurred(T),
    /// The event's state one tick from now.
    Pending(Next<Event<T>>),
}

impl<T: Clone + 'static> Event<T> {
    /// An event that has already occurred.
    pub fn occurred(value: T) -> Self {
        Event::Occurred(value)
    }

    /// An event waiting on `next`.
    pub fn pending(next: Next<Event<T>>) -> Self {
        Event::Pending(next)
    }

    /// An event that occurs `ticks` ticks from the runtime's current tick.
    ///
    /// With `ticks == 0` the event has already occurred.
    pub fn after(runtime: &Runtime, ticks: u64, value: T) -> Self {
        if ticks == 0 {
            return Event::Occurred(value);
        }

        let later = runtime.clone();
        Event::Pending(runtime.schedule(move || Event::after(&later, ticks - 1, value)))
    }

    /// An event that never occurs.
    pub fn never(runtime: &Runtime) -> Self {
        Next::fix(runtime, Event::Pending)
    }

    /// True if this event happened.
    pub fn has_value(&self) -> bool {
        matches!(self, Event::Occurred(_))
    }

    /// Which variant this event is in.
    pub fn state(&self) -> EventState {
        match self {
            Event::Occurred(_) => EventState::Occurred,
            Event::Pending(_) => EventState::Pending,
        }
    }

    /// The value this event produced.
    pub fn now(&self) -> Result<&T> {
        match self {
            Event::Occurred(value) => Ok(value),
            Event::Pending(_) => Err(FrpError::InvalidState {
                accessor: "now",
                state: EventState::Pending,
            }),
        }
    }

    /// The continuation of a pending event.
    pub fn wait(&self) -> Result<&Next<Event<T>>> {
        match self {
            Event::Pending(next) => Ok(next),
            Event::Occurred(_) => Err(FrpError::InvalidState {
                accessor: "wait",
                state: EventState::Occurred,
            }),
        }
    }

    /// Consume the event and return its value.
    pub fn into_now(self) -> Result<T> {
        match self {
            Event::Occurred(value) => Ok(value),
            Event::Pending(_) => Err(FrpError::InvalidState {
                accessor: "into_now",
                state: EventState::Pending,
            }),
        }
    }

    /// The event's state on the current tick.
    ///
    /// An occurred event stays as it is. A pending event forces its
    /// continuation, which must be bound to the current tick.
    pub fn step(&self) -> Result<Event<T>> {
        match self {
            Event::Occurred(_) => Ok(self.clone()),
            Event::Pending(next) => next.force(),
        }
    }

    /// Transform the event's value, whenever it occurs.
    pub fn map<U, F>(self, selector: F) -> Event<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_with(Rc::new(selector))
    }

    fn map_with<U>(self, selector: Rc<dyn Fn(T) -> U>) -> Event<U>
    where
        U: Clone + 'static,
    {
        match self {
            Event::Occurred(value) => Event::Occurred(selector(value)),
            Event::Pending(next) => {
                Event::Pending(next.map(move |event| event.map_with(selector)))
            }
        }
    }

    /// Sequence a second event chosen by this event's value.
    ///
    /// If this event has occurred, the result is exactly `selector(value)`,
    /// with no added latency.
    pub fn bind<U, F>(self, selector: F) -> Event<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> Event<U> + 'static,
    {
        self.bind_with(Rc::new(selector))
    }

    fn bind_with<U>(self, selector: Rc<dyn Fn(T) -> Event<U>>) -> Event<U>
    where
        U: Clone + 'static,
    {
        match self {
            Event::Occurred(value) => selector(value),
            Event::Pending(next) => {
                Event::Pending(next.map(move |event| event.bind_with(selector)))
            }
        }
    }

    /// Sequence a second event and combine both values.
    ///
    /// Waits for this event, then for the event `selector` picks. When both
    /// are already available on the same tick the result occurs immediately.
    pub fn bind2<U, V, F, G>(self, selector: F, combine: G) -> Event<V>
    where
        U: Clone + 'static,
        V: Clone + 'static,
        F: Fn(T) -> Event<U> + 'static,
        G: Fn(T, U) -> V + 'static,
    {
        self.bind2_with(Rc::new(selector), Rc::new(combine))
    }

    fn bind2_with<U, V>(
        self,
        selector: Rc<dyn Fn(T) -> Event<U>>,
        combine: Rc<dyn Fn(T, U) -> V>,
    ) -> Event<V>
    where
        U: Clone + 'static,
        V: Clone + 'static,
    {
        match self {
            Event::Occurred(outer) => {
                let inner = selector(outer.clone());
                inner.map_with(Rc::new(move |value| combine(outer.clone(), value)))
            }
            Event::Pending(next) => {
                Event::Pending(next.map(move |event| event.bind2_with(selector, combine)))
            }
        }
    }

    /// Race two events; the first to occur wins.
    ///
    /// If both have already occurred, `self` wins. If neither has, the race
    /// is re-run on the next tick, indefinitely: an event joined with
    /// [`never`](Self::never) simply behaves like the other event, and two
    /// events that never occur produce one that never occurs. The loser's
    /// value is discarded.
    ///
    /// Both continuations are zipped, so they must be bound to the same tick.
    pub fn join(self, other: Event<T>) -> Event<T> {
        match (self, other) {
            (Event::Occurred(value), _) | (_, Event::Occurred(value)) => Event::Occurred(value),
            (Event::Pending(left), Event::Pending(right)) => {
                Event::Pending(left.zip(&right).map(|(left, right)| left.join(right)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::Tick;
    use std::cell::Cell;

    /// Step `event` once per tick until it occurs or `limit` ticks pass.
    fn settle<T: Clone + 'static>(
        rt: &Runtime,
        mut event: Event<T>,
        limit: u64,
    ) -> Option<(Tick, T)> {
        for _ in 0..=limit {
            if let Event::Occurred(value) = &event {
                return Some((rt.current_tick(), value.clone()));
            }
            rt.advance();
            event = event.step().unwrap();
        }
        None
    }

    #[test]
    fn after_occurs_on_the_right_tick() {
        let rt = Runtime::new();
        assert_eq!(settle(&rt, Event::after(&rt, 3, 'a'), 10), Some((Tick::from(3), 'a')));

        let now = Event::after(&rt, 0, 'b');
        assert!(now.has_value());
    }

    #[test]
    fn accessors_reject_the_wrong_variant() {
        let rt = Runtime::new();
        let occurred = Event::occurred(1);
        let pending = Event::after(&rt, 1, 1);

        assert_eq!(occurred.now(), Ok(&1));
        assert_eq!(
            occurred.wait().unwrap_err(),
            FrpError::InvalidState {
                accessor: "wait",
                state: EventState::Occurred,
            }
        );

        assert_eq!(pending.state(), EventState::Pending);
        assert_eq!(
            pending.now().unwrap_err(),
            FrpError::InvalidState {
                accessor: "now",
                state: EventState::Pending,
            }
        );
        assert!(pending.clone().into_now().is_err());
    }

    #[test]
    fn wait_returns_the_continuation() {
        let rt = Runtime::new();
        let next = rt.schedule(|| Event::occurred(5));
        let event = Event::pending(next.clone());

        assert!(event.wait().unwrap().ptr_eq(&next));
    }

    #[test]
    fn map_occurred_is_immediate() {
        let event = Event::occurred(4).map(|x| x * x);
        assert_eq!(event.into_now(), Ok(16));
    }

    #[test]
    fn map_pending_waits_for_occurrence() {
        let rt = Runtime::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let event = Event::after(&rt, 2, 10).map(move |x| {
            counter.set(counter.get() + 1);
            x + 1
        });
        assert!(!event.has_value());

        assert_eq!(settle(&rt, event, 5), Some((Tick::from(2), 11)));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn bind_left_identity() {
        let rt = Runtime::new();

        // Occurred inner: same value, no latency
        let bound = Event::occurred(3).bind(|x| Event::occurred(x * 2));
        assert_eq!(bound.into_now(), Ok(6));

        // Pending inner: exactly the event the selector returned
        let inner = Event::after(&rt, 4, 0);
        let chosen = inner.clone();
        let bound = Event::occurred(3).bind(move |_| chosen.clone());
        assert!(bound.wait().unwrap().ptr_eq(inner.wait().unwrap()));
    }

    #[test]
    fn bind_sequences_latencies() {
        let rt = Runtime::new();
        let clock = rt.clone();

        // Occurs at tick 2, then waits 3 more
        let event =
            Event::after(&rt, 2, 3u64).bind(move |delay| Event::after(&clock, delay, "done"));
        assert_eq!(settle(&rt, event, 10), Some((Tick::from(5), "done")));
    }

    #[test]
    fn bind_with_immediate_inner_occurs_with_outer() {
        let rt = Runtime::new();
        let event = Event::after(&rt, 2, 5).bind(|v| Event::occurred(v * 2));

        // No extra tick is spent on an inner event that has already happened
        assert_eq!(settle(&rt, event, 10), Some((Tick::from(2), 10)));
    }

    #[test]
    fn bind2_with_immediate_inner_occurs_with_outer() {
        let rt = Runtime::new();
        let event = Event::after(&rt, 2, 5).bind2(|v| Event::occurred(v + 1), |a, b| a * b);
        assert_eq!(settle(&rt, event, 10), Some((Tick::from(2), 30)));
    }

    #[test]
    fn bind2_is_immediate_when_both_occurred() {
        let event = Event::occurred(2).bind2(|x| Event::occurred(x + 1), |x, y| x * y);
        assert_eq!(event.into_now(), Ok(6));
    }

    #[test]
    fn bind2_keeps_outer_value_across_ticks() {
        let rt = Runtime::new();
        let clock = rt.clone();

        let event = Event::after(&rt, 1, 10).bind2(
            move |x| Event::after(&clock, 3, x * 2),
            |outer, inner| (outer, inner),
        );
        assert_eq!(settle(&rt, event, 10), Some((Tick::from(4), (10, 20))));
    }

    #[test]
    fn join_returns_the_earlier_event() {
        let rt = Runtime::new();
        let first = Event::after(&rt, 2, "first");
        let second = Event::after(&rt, 5, "second");

        assert_eq!(settle(&rt, first.join(second), 10), Some((Tick::from(2), "first")));

        let rt = Runtime::new();
        let first = Event::after(&rt, 2, "first");
        let second = Event::after(&rt, 5, "second");
        assert_eq!(settle(&rt, second.join(first), 10), Some((Tick::from(2), "first")));
    }

    #[test]
    fn join_prefers_self_when_both_occurred() {
        let event = Event::occurred('l').join(Event::occurred('r'));
        assert_eq!(event.into_now(), Ok('l'));
    }

    #[test]
    fn join_with_never_waits_for_the_other_side() {
        let rt = Runtime::new();
        let event = Event::never(&rt).join(Event::after(&rt, 3, 9));
        assert_eq!(settle(&rt, event, 10), Some((Tick::from(3), 9)));
    }

    #[test]
    fn never_stays_pending() {
        let rt = Runtime::new();
        let event: Event<u8> = Event::never(&rt).join(Event::never(&rt));
        assert_eq!(settle(&rt, event, 20), None);
    }

    #[test]
    fn step_on_occurred_event_is_identity() {
        let rt = Runtime::new();
        rt.advance();
        assert_eq!(Event::occurred(1).step().unwrap().into_now(), Ok(1));
    }

    #[test]
    fn step_too_early_is_a_timing_error() {
        let rt = Runtime::new();
        let event = Event::after(&rt, 1, ());
        assert!(matches!(event.step(), Err(FrpError::Timing { .. })));
    }
}
