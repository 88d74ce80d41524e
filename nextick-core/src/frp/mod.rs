//! Events and Streams
//!
//! Both shapes are plain values layered over scheduled values:
//!
//! - An [`Event`] has either occurred (and carries its value) or is pending
//!   behind a scheduled value that yields the event's state one tick later.
//!   Once occurred, it never goes back to pending.
//!
//! - A [`Stream`] always has a current value, plus a scheduled value yielding
//!   the stream one tick later. Streams never end; a finite sequence is a
//!   stream of `Option<T>` or similar, by client convention.
//!
//! Every combinator here is lifted from the scheduled-value combinators in
//! [`crate::next`]. Selectors are shared behind `Rc` because a pending event
//! or a stream applies them again on every later tick.

mod event;
mod stream;

pub use event::Event;
pub use stream::Stream;
