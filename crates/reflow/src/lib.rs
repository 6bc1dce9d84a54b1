//! Scheduling primitives for the reflow pipeline.
//!
//! Everything here is single-threaded and deadline-based: timers are plain
//! values polled with explicit `Instant`s on frame ticks, and superseded
//! layout passes are discarded through monotonically increasing tokens
//! rather than locks. There are no callbacks and no captured mutable state.

mod settle;
mod timer;
mod token;

pub use settle::{SettleProbe, SettleVerdict};
pub use timer::{DebounceTimer, Throttle};
pub use token::{ReflowToken, TokenIssuer};
