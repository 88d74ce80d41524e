//! Scheduled Values
//!
//! A [`Next<T>`] is a value that will exist one tick from now. It wraps a
//! producer that runs at most once, on exactly one tick, and caches its
//! result for the rest of that tick.
//!
//! # Lifecycle
//!
//! ```text
//! Scheduled(producer) --force at target--> Produced(value)
//!        |                                       |
//!        +------------ tick passes --------------+--> Disposed
//! ```
//!
//! All transitions are one-way and `Disposed` is absorbing. Forcing before
//! the target tick is a [`FrpError::Timing`](crate::FrpError::Timing) error;
//! forcing after it is a [`FrpError::Disposed`](crate::FrpError::Disposed)
//! error.
//!
//! # Combinators
//!
//! `map`, `zip`, `unzip`, `apply` and `fix` build new scheduled values out of
//! existing ones without forcing anything. Events and streams are built
//! entirely from these.

mod cell;
mod combinators;
mod id;

pub use cell::Next;
pub use id::{ThunkId, ThunkKind};
