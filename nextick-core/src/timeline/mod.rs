//! Timeline
//!
//! This module owns logical time. A [`Runtime`] holds a tick counter and a
//! registry of every scheduled value that has not yet expired.
//!
//! # How Time Advances
//!
//! 1. Scheduled values created during tick `T` are bound to tick `T + 1` and
//!    registered (weakly) with the runtime that created them.
//!
//! 2. [`Runtime::advance`] bumps the tick and sweeps the registry. Anything
//!    bound to a tick that is now in the past is disposed: its producer and
//!    cached value are dropped, whether or not it was ever forced.
//!
//! 3. Entries whose scheduled value was already dropped by every owner are
//!    released from the registry without further work.
//!
//! The sweep is what keeps a long-running loop from leaking. The losing side
//! of a race, or a stream continuation nobody pulled, would otherwise sit in
//! memory forever.
//!
//! # Single Timeline
//!
//! A runtime is a cheap `Rc` handle. Every scheduled value keeps a clone so
//! it can check the current tick when forced. Handles are deliberately not
//! `Send`: one timeline is driven from one execution context.

mod config;
mod registry;
mod runtime;
mod tick;

pub use config::{ConfigError, RuntimeConfig};
pub use runtime::{Runtime, RuntimeStats};
pub use tick::Tick;

pub(crate) use registry::Disposable;
