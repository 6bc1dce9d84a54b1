use pager_core::{clamp_start, last_valid_start, page_end, Band};

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Lifecycle phase of the viewport.
///
/// `Ready` is the only phase from which navigation input is accepted;
/// everything else drops it rather than acting on stale geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Uninitialized,
    Loading,
    Measuring,
    Ready,
    Resizing,
}

/// Owned pagination state. Bands and lines-per-page are replaced wholesale
/// on every layout pass; only the start index survives, by re-clamping.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportModel {
    pub bands: Vec<Band>,
    pub lines_per_page: usize,
    pub start_index: usize,
    pub ready: bool,
}

impl Default for ViewportModel {
    fn default() -> Self {
        Self { bands: Vec::new(), lines_per_page: 1, start_index: 0, ready: false }
    }
}

impl ViewportModel {
    pub fn total_systems(&self) -> usize {
        self.bands.len()
    }

    pub fn last_valid_start(&self) -> usize {
        last_valid_start(self.bands.len(), self.lines_per_page)
    }

    /// Inclusive index of the last system on the current page.
    pub fn page_end(&self) -> usize {
        page_end(self.start_index, self.lines_per_page, self.bands.len())
    }

    /// Swap in freshly measured geometry, discarding the old values and
    /// re-clamping the start index into the new valid range. This is the
    /// mechanism by which the user stays on roughly the same page across a
    /// complete re-measurement.
    pub fn replace_geometry(&mut self, bands: Vec<Band>, lines_per_page: usize) {
        self.bands = bands;
        self.lines_per_page = lines_per_page.max(1);
        self.start_index = clamp_start(self.start_index, self.bands.len(), self.lines_per_page);
        self.ready = true;
    }
}

/// Page-relative navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Move by whole pages: +1 is the next page, -2 two pages back.
    PageDelta(i32),
    First,
    Last,
}

/// Apply a navigation action, clamping into the valid start range.
///
/// Returns whether the start index changed; a clamped no-change result must
/// not trigger a redraw. Navigation is refused before the first successful
/// measurement.
pub fn apply_nav(model: &mut ViewportModel, action: NavAction) -> bool {
    if !model.ready {
        return false;
    }

    let last = model.last_valid_start();
    let target = match action {
        NavAction::PageDelta(delta) => {
            let step = delta as i64 * model.lines_per_page as i64;
            let raw = model.start_index as i64 + step;
            raw.clamp(0, last as i64) as usize
        }
        NavAction::First => 0,
        NavAction::Last => last,
    };

    if target == model.start_index {
        return false;
    }

    model.start_index = target;
    true
}
