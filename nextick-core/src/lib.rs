//! Nextick Core
//!
//! This crate provides the core of the Nextick discrete-time functional
//! reactive programming library. It implements:
//!
//! - A logical clock that advances one tick at a time
//! - Scheduled values (timed thunks) that may only be observed on the tick
//!   they were scheduled for
//! - One-shot events and infinite streams built on top of scheduled values
//!
//! Everything runs on a single timeline owned by a [`Runtime`]. There is no
//! wall-clock time and no threading: the driving loop decides when to call
//! [`Runtime::advance`], and forcing a scheduled value at the wrong tick is
//! reported as an error instead of silently reading an undetermined or stale
//! value.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `timeline`: The runtime, its clock, the live-thunk registry and config
//! - `next`: Scheduled values and the combinators over them
//! - `frp`: Events and streams, lifted from the scheduled-value combinators
//! - `error`: The error type shared by every fallible operation
//!
//! # Example
//!
//! ```rust,ignore
//! use nextick_core::{Runtime, Stream};
//!
//! let rt = Runtime::new();
//!
//! // Count upwards, one number per tick
//! let step_rt = rt.clone();
//! let mut ints = Stream::unfold(move |n: u32| (n, step_rt.schedule(move || n + 1)), 0);
//!
//! for expected in 0..5 {
//!     assert_eq!(*ints.value(), expected);
//!     rt.advance();
//!     ints = ints.step()?;
//! }
//! ```

pub mod error;
pub mod frp;
pub mod next;
pub mod timeline;

pub use error::{EventState, FrpError, Result};
pub use frp::{Event, Stream};
pub use next::{Next, ThunkId, ThunkKind};
pub use timeline::{ConfigError, Runtime, RuntimeConfig, RuntimeStats, Tick};
