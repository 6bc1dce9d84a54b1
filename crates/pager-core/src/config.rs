use std::time::Duration;

/// Default vertical gap within which neighboring boxes join one band.
pub const DEFAULT_BAND_GAP_PX: f32 = 18.0;

/// Default bottom padding kept clear when fitting systems into a page.
pub const DEFAULT_SAFETY_PADDING_PX: f32 = 20.0;

/// Default overlap of the page mask above the first hidden band.
pub const DEFAULT_MASK_OVERLAP_PX: f32 = 4.0;

/// Tuning knobs for the pagination pipeline.
///
/// Every empirically chosen constant lives here rather than in the code
/// that uses it. The band gap in particular is content-sensitive: scores
/// with unusually tight or loose system spacing need a different value.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerConfig {
    /// Boxes whose tops are within this many pixels of the previous band's
    /// bottom are merged into it.
    pub band_gap_px: f32,

    /// Candidate boxes narrower than this are discarded as decorations.
    pub min_system_width_px: f32,

    /// Candidate boxes shorter than this are discarded as decorations.
    pub min_system_height_px: f32,

    /// Pixels kept clear at the bottom of the viewport when fitting.
    pub safety_padding_px: f32,

    /// How far the overlay mask reaches above the first hidden band.
    pub mask_overlap_px: f32,

    /// Quiet period required after the last resize notification before a
    /// recompute is triggered.
    pub resize_debounce: Duration,

    /// Minimum spacing between wheel events acted upon, so one scroll
    /// gesture turns at most one page.
    pub wheel_throttle: Duration,

    /// Consecutive frame samples the canvas size must hold steady for
    /// before measurement proceeds.
    pub settle_frames: u32,

    /// Upper bound on the settle wait; when exceeded, measurement proceeds
    /// with whatever geometry is available.
    pub settle_timeout: Duration,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            band_gap_px: DEFAULT_BAND_GAP_PX,
            min_system_width_px: 60.0,
            min_system_height_px: 12.0,
            safety_padding_px: DEFAULT_SAFETY_PADDING_PX,
            mask_overlap_px: DEFAULT_MASK_OVERLAP_PX,
            resize_debounce: Duration::from_millis(60),
            wheel_throttle: Duration::from_millis(140),
            settle_frames: 3,
            settle_timeout: Duration::from_millis(500),
        }
    }
}

impl PagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_band_gap_px(mut self, gap: f32) -> Self {
        self.band_gap_px = gap;
        self
    }

    pub fn with_safety_padding_px(mut self, padding: f32) -> Self {
        self.safety_padding_px = padding;
        self
    }

    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    pub fn with_wheel_throttle(mut self, spacing: Duration) -> Self {
        self.wheel_throttle = spacing;
        self
    }

    pub fn with_settle_frames(mut self, frames: u32) -> Self {
        self.settle_frames = frames;
        self
    }

    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = timeout;
        self
    }
}
