//! Combinators over scheduled values.
//!
//! None of these force anything when called. They schedule a new value whose
//! producer forces the operands, so the usual timing contract applies to the
//! operands at the moment the result is forced.

use std::rc::Rc;

use super::cell::Next;
use super::id::ThunkKind;
use crate::timeline::Runtime;

impl<T: Clone + 'static> Next<T> {
    /// Transform the eventual value.
    ///
    /// The result is bound to the same tick as `self`.
    pub fn map<U, F>(&self, selector: F) -> Next<U>
    where
        U: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        let source = self.clone();
        Next::scheduled(
            self.runtime(),
            ThunkKind::Map,
            self.target(),
            Box::new(move || source.force().map(selector)),
        )
    }

    /// Pair this value with another one.
    ///
    /// The pair is bound to `self`'s tick. Forcing it forces both sides, and
    /// each side checks its own tick, so zipping values bound to different
    /// ticks always fails.
    pub fn zip<U>(&self, other: &Next<U>) -> Next<(T, U)>
    where
        U: Clone + 'static,
    {
        let left = self.clone();
        let right = other.clone();
        Next::scheduled(
            self.runtime(),
            ThunkKind::Zip,
            self.target(),
            Box::new(move || Ok((left.force()?, right.force()?))),
        )
    }
}

impl<A, B> Next<(A, B)>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    /// Split a scheduled pair. Both halves share the pair's single force.
    pub fn unzip(&self) -> (Next<A>, Next<B>) {
        (self.map(|(a, _)| a), self.map(|(_, b)| b))
    }
}

impl<F: Clone + 'static> Next<F> {
    /// Apply a scheduled function to a scheduled argument.
    pub fn apply<A, B>(&self, arg: &Next<A>) -> Next<B>
    where
        F: FnOnce(A) -> B,
        A: Clone + 'static,
        B: 'static,
    {
        let func = self.clone();
        let arg = arg.clone();
        Next::scheduled(
            self.runtime(),
            ThunkKind::Apply,
            self.target(),
            Box::new(move || {
                let func = func.force()?;
                Ok(func(arg.force()?))
            }),
        )
    }
}

impl<T: 'static> Next<T> {
    /// Build a value that refers to its own next instance.
    ///
    /// `build` receives a placeholder for "what `fix` would return one tick
    /// from now" and its result is returned immediately. Forcing the
    /// placeholder on the next tick runs `build` again with a fresh
    /// placeholder, so the definition unrolls one tick at a time instead of
    /// forming a reference cycle.
    ///
    /// ```rust,ignore
    /// // A stream that is 1 forever
    /// let ones = Next::fix(&rt, |next| Stream::new(1, next));
    /// ```
    pub fn fix<F>(runtime: &Runtime, build: F) -> T
    where
        F: Fn(Next<T>) -> T + 'static,
    {
        fix_with(runtime, Rc::new(build))
    }
}

fn fix_with<T: 'static>(runtime: &Runtime, build: Rc<dyn Fn(Next<T>) -> T>) -> T {
    let again = Rc::clone(&build);
    let later_runtime = runtime.clone();
    let later = Next::scheduled(
        runtime,
        ThunkKind::Fix,
        runtime.current_tick().succ(),
        Box::new(move || Ok(fix_with(&later_runtime, again))),
    );
    build(later)
}
