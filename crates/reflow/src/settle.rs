//! Waiting for rendered geometry to stop changing before measuring.

use std::time::{Duration, Instant};

/// Height changes smaller than this count as unchanged.
const HEIGHT_EPSILON_PX: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleVerdict {
    /// Geometry is still moving; sample again next frame.
    Settling,
    /// The size held steady for the required number of samples.
    Stable,
    /// The wait bound was exceeded; proceed with current geometry.
    TimedOut,
}

/// Watches the engine's reported canvas height across frame samples.
///
/// Layout can settle asynchronously after a render, so measurement waits
/// until the reported size is unchanged for `required_frames` consecutive
/// samples. The wait is bounded: past `timeout` the probe reports
/// [`SettleVerdict::TimedOut`] and the caller measures whatever geometry
/// exists rather than hanging indefinitely.
#[derive(Debug)]
pub struct SettleProbe {
    started: Instant,
    timeout: Duration,
    required_frames: u32,
    steady_samples: u32,
    last_height: Option<f32>,
}

impl SettleProbe {
    pub fn new(now: Instant, required_frames: u32, timeout: Duration) -> Self {
        Self {
            started: now,
            timeout,
            required_frames: required_frames.max(1),
            steady_samples: 0,
            last_height: None,
        }
    }

    /// Feed one frame sample. `height` is `None` while the engine has
    /// committed no output at all.
    pub fn observe(&mut self, now: Instant, height: Option<f32>) -> SettleVerdict {
        if now.duration_since(self.started) >= self.timeout {
            return SettleVerdict::TimedOut;
        }

        match (self.last_height, height) {
            (Some(last), Some(current)) if (current - last).abs() < HEIGHT_EPSILON_PX => {
                self.steady_samples += 1;
            }
            _ => {
                self.steady_samples = 0;
            }
        }
        self.last_height = height;

        if self.steady_samples >= self.required_frames {
            SettleVerdict::Stable
        } else {
            SettleVerdict::Settling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(now: Instant) -> SettleProbe {
        SettleProbe::new(now, 3, Duration::from_millis(500))
    }

    fn tick(index: u64, start: Instant) -> Instant {
        start + Duration::from_millis(16 * index)
    }

    #[test]
    fn stable_after_required_consecutive_samples() {
        let start = Instant::now();
        let mut probe = probe(start);

        assert_eq!(probe.observe(tick(0, start), Some(400.0)), SettleVerdict::Settling);
        assert_eq!(probe.observe(tick(1, start), Some(400.0)), SettleVerdict::Settling);
        assert_eq!(probe.observe(tick(2, start), Some(400.0)), SettleVerdict::Settling);
        assert_eq!(probe.observe(tick(3, start), Some(400.0)), SettleVerdict::Stable);
    }

    #[test]
    fn a_size_change_resets_the_count() {
        let start = Instant::now();
        let mut probe = probe(start);

        probe.observe(tick(0, start), Some(200.0));
        probe.observe(tick(1, start), Some(200.0));
        probe.observe(tick(2, start), Some(350.0));
        assert_eq!(probe.observe(tick(3, start), Some(350.0)), SettleVerdict::Settling);
    }

    #[test]
    fn missing_output_never_counts_as_steady() {
        let start = Instant::now();
        let mut probe = probe(start);

        for index in 0..10 {
            assert_eq!(probe.observe(tick(index, start), None), SettleVerdict::Settling);
        }
    }

    #[test]
    fn the_wait_is_bounded_by_the_timeout() {
        let start = Instant::now();
        let mut probe = probe(start);

        probe.observe(tick(0, start), Some(100.0));
        let verdict = probe.observe(start + Duration::from_millis(500), Some(150.0));

        assert_eq!(verdict, SettleVerdict::TimedOut);
    }

    #[test]
    fn sub_pixel_jitter_counts_as_unchanged() {
        let start = Instant::now();
        let mut probe = probe(start);

        probe.observe(tick(0, start), Some(400.0));
        probe.observe(tick(1, start), Some(400.3));
        probe.observe(tick(2, start), Some(400.1));
        assert_eq!(probe.observe(tick(3, start), Some(400.2)), SettleVerdict::Stable);
    }
}
