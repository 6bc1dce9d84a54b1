//! Deadline-based debounce and throttle, polled on frame ticks.

use std::time::{Duration, Instant};

/// Collapses a burst of notifications into one firing after a quiet period.
///
/// Arming while already armed pushes the deadline out, so a window-drag
/// resize burst produces a single recompute once the drag pauses. The timer
/// is polled: the owner calls [`DebounceTimer::fire_if_due`] on every frame
/// tick and acts when it returns `true`.
#[derive(Debug, Default)]
pub struct DebounceTimer {
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule (or reschedule) the firing `delay` after `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire at most once per arming: returns `true` when the deadline has
    /// passed and clears it.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Enforces a minimum spacing between accepted events.
///
/// Used for wheel input so one scroll gesture advances at most one page.
#[derive(Debug)]
pub struct Throttle {
    min_spacing: Duration,
    last_accepted: Option<Instant>,
}

impl Throttle {
    pub fn new(min_spacing: Duration) -> Self {
        Self { min_spacing, last_accepted: None }
    }

    /// Whether an event at `now` may pass; accepting updates the window.
    pub fn accept(&mut self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) if now.duration_since(last) < self.min_spacing => false,
            _ => {
                self.last_accepted = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
