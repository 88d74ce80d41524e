//! Infinite discrete streams.

use std::rc::Rc;

use crate::error::Result;
use crate::next::Next;
use crate::timeline::Runtime;

/// A value for the current tick, plus the stream from the next tick on.
///
/// # Example
///
/// ```rust,ignore
/// let rt = Runtime::new();
/// let step_rt = rt.clone();
/// let evens = Stream::unfold(move |n: u32| (n, step_rt.schedule(move || n + 1)), 0)
///     .map(|n| n * 2);
///
/// assert_eq!(*evens.value(), 0);
/// rt.advance();
/// assert_eq!(*evens.step()?.value(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Stream<T> {
    value: T,
    next: Next<Stream<T>>,
}

impl<T: Clone + 'static> Stream<T> {
    /// Assemble a stream from its current value and continuation.
    pub fn new(value: T, next: Next<Stream<T>>) -> Self {
        Self { value, next }
    }

    /// Generate a stream from a seed.
    ///
    /// `step` turns a seed into the current value and a scheduled seed for
    /// the next tick. This is how every stream is ultimately produced.
    pub fn unfold<S, F>(step: F, seed: S) -> Self
    where
        S: Clone + 'static,
        F: Fn(S) -> (T, Next<S>) + 'static,
    {
        unfold_with(Rc::new(step), seed)
    }

    /// A stream that holds `value` on every tick.
    pub fn constant(runtime: &Runtime, value: T) -> Self {
        Next::fix(runtime, move |next| Stream::new(value.clone(), next))
    }

    /// The stream's current value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The stream's next instance.
    pub fn next(&self) -> &Next<Stream<T>> {
        &self.next
    }

    /// Split into the current value and the continuation.
    pub fn into_parts(self) -> (T, Next<Stream<T>>) {
        (self.value, self.next)
    }

    /// Force the continuation. Only valid on the continuation's tick.
    pub fn step(&self) -> Result<Stream<T>> {
        self.next.force()
    }

    /// Map every value of the stream.
    pub fn map<U, F>(self, selector: F) -> Stream<U>
    where
        U: Clone + 'static,
        F: Fn(T) -> U + 'static,
    {
        self.map_with(Rc::new(selector))
    }

    fn map_with<U>(self, selector: Rc<dyn Fn(T) -> U>) -> Stream<U>
    where
        U: Clone + 'static,
    {
        Stream {
            value: selector(self.value),
            next: self.next.map(move |stream| stream.map_with(selector)),
        }
    }

    /// Pair two streams tick by tick.
    ///
    /// Both continuations must be bound to the same tick.
    pub fn zip<U>(self, other: Stream<U>) -> Stream<(T, U)>
    where
        U: Clone + 'static,
    {
        Stream {
            value: (self.value, other.value),
            next: self
                .next
                .zip(&other.next)
                .map(|(left, right)| left.zip(right)),
        }
    }
}

impl<A, B> Stream<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Split a stream of pairs into two streams.
    pub fn unzip(self) -> (Stream<A>, Stream<B>) {
        let (left, right) = self.value;
        let (left_next, right_next) = self.next.map(|stream| stream.unzip()).unzip();

        (Stream::new(left, left_next), Stream::new(right, right_next))
    }
}

fn unfold_with<S, T>(step: Rc<dyn Fn(S) -> (T, Next<S>)>, seed: S) -> Stream<T>
where
    S: Clone + 'static,
    T: Clone + 'static,
{
    let (value, next_seed) = step(seed);
    Stream {
        value,
        next: next_seed.map(move |seed| unfold_with(step, seed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrpError;
    use crate::timeline::Tick;

    fn ints(rt: &Runtime, start: i64) -> Stream<i64> {
        let rt = rt.clone();
        Stream::unfold(move |n: i64| (n, rt.schedule(move || n + 1)), start)
    }

    /// Read `count` values, advancing the clock after each read.
    fn collect<T: Clone + 'static>(rt: &Runtime, mut stream: Stream<T>, count: usize) -> Vec<T> {
        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            values.push(stream.value().clone());
            if i + 1 < count {
                rt.advance();
                stream = stream.step().unwrap();
            }
        }
        values
    }

    #[test]
    fn unfold_counts_up() {
        let rt = Runtime::new();
        assert_eq!(collect(&rt, ints(&rt, 0), 5), vec![0, 1, 2, 3, 4]);
        assert_eq!(rt.current_tick(), Tick::from(4));
    }

    #[test]
    fn map_applies_to_every_value() {
        let rt = Runtime::new();
        let squares = ints(&rt, 1).map(|n| n * n);
        assert_eq!(collect(&rt, squares, 4), vec![1, 4, 9, 16]);
    }

    #[test]
    fn zip_pairs_values_tick_by_tick() {
        let rt = Runtime::new();
        let pairs = ints(&rt, 0).zip(ints(&rt, 10).map(|n| n.to_string()));
        assert_eq!(
            collect(&rt, pairs, 3),
            vec![
                (0, "10".to_string()),
                (1, "11".to_string()),
                (2, "12".to_string()),
            ]
        );
    }

    #[test]
    fn unzip_splits_pairs() {
        let rt = Runtime::new();
        let pairs = ints(&rt, 0).map(|n| (n, -n));
        let (mut left, mut right) = pairs.unzip();

        for expected in 0..4 {
            assert_eq!(*left.value(), expected);
            assert_eq!(*right.value(), -expected);
            rt.advance();
            left = left.step().unwrap();
            right = right.step().unwrap();
        }
    }

    #[test]
    fn constant_holds_forever() {
        let rt = Runtime::new();
        assert_eq!(collect(&rt, Stream::constant(&rt, 'k'), 6), vec!['k'; 6]);
    }

    #[test]
    fn step_is_only_valid_on_the_next_tick() {
        let rt = Runtime::new();
        let stream = ints(&rt, 0);

        assert!(matches!(stream.step(), Err(FrpError::Timing { .. })));

        rt.advance();
        rt.advance();
        assert!(matches!(stream.step(), Err(FrpError::Disposed { .. })));
    }

    #[test]
    fn unpulled_continuations_are_reclaimed() {
        let rt = Runtime::new();
        let mut stream = ints(&rt, 0);

        for _ in 0..10 {
            rt.advance();
            stream = stream.step().unwrap();
        }

        // Only the current continuation chain is still registered
        assert!(rt.live_count() <= 4);
        assert_eq!(*stream.value(), 10);
    }

    #[test]
    fn into_parts_returns_value_and_continuation() {
        let rt = Runtime::new();
        let stream = ints(&rt, 7);
        let next = stream.next().clone();

        let (value, continuation) = stream.into_parts();
        assert_eq!(value, 7);
        assert!(continuation.ptr_eq(&next));
    }
}
