use crate::{
    apply_nav, compute_frame, nav_for_key, nav_for_wheel, NavAction, PagingKey, PresentationFrame,
    ViewPhase, ViewportModel, ViewportSize,
};
use leafturn_reflow::{DebounceTimer, ReflowToken, SettleProbe, SettleVerdict, Throttle, TokenIssuer};
use pager_core::{
    cluster_bands, derive_status, lines_that_fit, page_measure_span, sample_system_boxes,
    system_measure_spans, MeasureSpan, PageStatus, PagerConfig, ViewTransform,
};
use score_engine::{ScoreEngine, ScoreSource};
use std::time::Instant;

#[derive(Debug)]
struct PendingPass {
    token: ReflowToken,
    probe: SettleProbe,
}

/// Reflow coordinator and viewport controller for one mounted score.
///
/// All work happens as reactions to discrete events on one execution
/// context: `mount`, `set_source`, `viewport_resized`, wheel and key input,
/// and `on_frame` ticks carrying the current `Instant`. Between a pass
/// being triggered and its result being applied, a newer trigger supersedes
/// it through the pass token; that check is the only ordering guarantee
/// and the reason no locking exists here.
///
/// Resize observation belongs exclusively to this coordinator: the engine
/// renders only when told to, so there is exactly one layout trigger.
pub struct PageTurner<E> {
    engine: E,
    config: PagerConfig,
    viewport: ViewportSize,
    phase: ViewPhase,
    model: ViewportModel,
    frame: PresentationFrame,
    spans: Vec<MeasureSpan>,
    tokens: TokenIssuer,
    pending: Option<PendingPass>,
    resize_debounce: DebounceTimer,
    wheel_throttle: Throttle,
    disposed: bool,
}

impl<E: ScoreEngine> PageTurner<E> {
    pub fn new(engine: E, config: PagerConfig, viewport: ViewportSize) -> Self {
        let wheel_throttle = Throttle::new(config.wheel_throttle);

        Self {
            engine,
            config,
            viewport,
            phase: ViewPhase::Uninitialized,
            model: ViewportModel::default(),
            frame: PresentationFrame::IDENTITY,
            spans: Vec::new(),
            tokens: TokenIssuer::new(),
            pending: None,
            resize_debounce: DebounceTimer::new(),
            wheel_throttle,
            disposed: false,
        }
    }

    /// Load and render the score, then start the first measurement pass.
    ///
    /// A load or render failure is logged and leaves the viewport in
    /// `Loading` (the host keeps showing its loading indicator); nothing is
    /// retried automatically.
    pub fn mount(&mut self, source: ScoreSource, now: Instant) {
        if self.disposed {
            return;
        }

        self.phase = ViewPhase::Loading;

        if let Err(error) = self.engine.load(source) {
            log::error!("score load failed: {error}");
            return;
        }

        if let Err(error) = self.engine.render() {
            log::error!("initial render failed: {error}");
            return;
        }

        self.begin_pass(now);
    }

    /// Tear down all pagination state and mount a different score.
    pub fn set_source(&mut self, source: ScoreSource, now: Instant) {
        if self.disposed {
            return;
        }

        self.tokens.invalidate_all();
        self.pending = None;
        self.resize_debounce.cancel();
        self.wheel_throttle.reset();
        self.engine.unload();
        self.model = ViewportModel::default();
        self.frame = PresentationFrame::IDENTITY;
        self.spans.clear();
        self.phase = ViewPhase::Uninitialized;

        self.mount(source, now);
    }

    /// Record a resize notification. Recomputation is debounced: a window
    /// drag delivers a burst of these and only the last one, after a quiet
    /// period, triggers the reflow.
    pub fn viewport_resized(&mut self, viewport: ViewportSize, now: Instant) {
        if self.disposed {
            return;
        }

        self.viewport = viewport;

        match self.phase {
            ViewPhase::Uninitialized | ViewPhase::Loading => {}
            ViewPhase::Ready | ViewPhase::Resizing | ViewPhase::Measuring => {
                if self.phase == ViewPhase::Ready {
                    self.phase = ViewPhase::Resizing;
                }
                self.resize_debounce.arm(now, self.config.resize_debounce);
            }
        }
    }

    /// Frame tick: advance the engine's asynchronous layout, fire a due
    /// debounce, and sample the settle probe of the in-flight pass.
    pub fn on_frame(&mut self, now: Instant) {
        if self.disposed {
            return;
        }

        self.engine.advance_frame();

        if self.resize_debounce.fire_if_due(now) {
            self.begin_reflow(now);
        }

        let height = self.engine.canvas_size().map(|size| size.height);
        let completed = self.pending.as_mut().and_then(|pass| {
            match pass.probe.observe(now, height) {
                SettleVerdict::Settling => None,
                SettleVerdict::Stable | SettleVerdict::TimedOut => Some(pass.token),
            }
        });

        if let Some(token) = completed {
            self.apply_pass(token, now);
        }
    }

    pub fn on_wheel(&mut self, delta_y: f32, now: Instant) {
        if self.disposed || self.phase != ViewPhase::Ready {
            return;
        }

        let Some(action) = nav_for_wheel(delta_y) else {
            return;
        };

        if self.wheel_throttle.accept(now) {
            self.navigate(action);
        }
    }

    pub fn on_key(&mut self, key: PagingKey) {
        self.navigate(nav_for_key(key));
    }

    pub fn go_to_page(&mut self, delta: i32) {
        self.navigate(NavAction::PageDelta(delta));
    }

    pub fn next_page(&mut self) {
        self.navigate(NavAction::PageDelta(1));
    }

    pub fn prev_page(&mut self) {
        self.navigate(NavAction::PageDelta(-1));
    }

    pub fn go_to_start(&mut self) {
        self.navigate(NavAction::First);
    }

    pub fn go_to_end(&mut self) {
        self.navigate(NavAction::Last);
    }

    /// Re-run sampler, clusterer, and planner against the current geometry
    /// and re-apply the presentation with the preserved, re-clamped start
    /// index. With an unchanged viewport and score this is idempotent.
    pub fn recompute_and_realign(&mut self) {
        if self.disposed || !self.model.ready {
            return;
        }

        if self.measure_and_realign() {
            self.phase = ViewPhase::Ready;
        }
    }

    pub fn status(&self) -> PageStatus {
        derive_status(self.model.start_index, self.model.lines_per_page, self.model.total_systems())
    }

    /// Measure numbers covered by the current page, once measured.
    pub fn page_measures(&self) -> Option<MeasureSpan> {
        if !self.model.ready {
            return None;
        }

        page_measure_span(&self.spans, self.model.start_index, self.model.page_end())
    }

    pub fn presentation(&self) -> PresentationFrame {
        self.frame
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn model(&self) -> &ViewportModel {
        &self.model
    }

    /// Invalidate in-flight work, cancel timers, and release the engine.
    /// No recompute runs after disposal.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.tokens.invalidate_all();
        self.pending = None;
        self.resize_debounce.cancel();
        self.engine.unload();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn navigate(&mut self, action: NavAction) {
        if self.disposed || self.phase != ViewPhase::Ready {
            return;
        }

        if apply_nav(&mut self.model, action) {
            // Only the presentation frame moves; measured geometry and the
            // page plan are untouched by navigation.
            self.frame = compute_frame(&self.model, self.viewport, self.config.mask_overlap_px);
        }
    }

    fn begin_reflow(&mut self, now: Instant) {
        if let Err(error) = self.engine.render() {
            log::error!("reflow render failed: {error}");
            self.phase = if self.model.ready { ViewPhase::Ready } else { ViewPhase::Loading };
            return;
        }

        self.begin_pass(now);
    }

    fn begin_pass(&mut self, now: Instant) {
        let token = self.tokens.issue();
        let probe = SettleProbe::new(now, self.config.settle_frames, self.config.settle_timeout);

        self.pending = Some(PendingPass { token, probe });
        self.phase = ViewPhase::Measuring;
        log::debug!("reflow pass {token:?} started");
    }

    fn apply_pass(&mut self, token: ReflowToken, now: Instant) {
        if !self.tokens.is_current(token) {
            log::trace!("discarding superseded reflow pass {token:?}");
            return;
        }

        if self.measure_and_realign() {
            self.pending = None;
            self.phase = ViewPhase::Ready;
            log::debug!(
                "reflow pass {token:?} applied: {} systems, {} per page",
                self.model.total_systems(),
                self.model.lines_per_page
            );
        } else {
            // Not yet measurable. Keep the pass alive with a fresh probe;
            // the viewport does not advance past Measuring until a later
            // sample finds geometry.
            if let Some(pass) = self.pending.as_mut() {
                pass.probe =
                    SettleProbe::new(now, self.config.settle_frames, self.config.settle_timeout);
            }
            self.phase = ViewPhase::Measuring;
        }
    }

    /// Sample, cluster, plan, and re-apply the presentation. Returns
    /// whether measurable geometry was found.
    fn measure_and_realign(&mut self) -> bool {
        // Measurement must read the natural layout: neutralize the active
        // translate+mask for the duration of the sample, then restore it or
        // replace it with the freshly computed frame. Sampling the windowed
        // presentation would feed what is shown back into what should be
        // computed next.
        let active = std::mem::replace(&mut self.frame, PresentationFrame::IDENTITY);

        let boxes = match self.engine.rendered() {
            Some(score) => sample_system_boxes(score, ViewTransform::IDENTITY, &self.config),
            None => Vec::new(),
        };

        if boxes.is_empty() {
            self.frame = active;
            return false;
        }

        let bands = cluster_bands(&boxes, self.config.band_gap_px);
        let lines =
            lines_that_fit(&bands, 0, self.viewport.height, self.config.safety_padding_px);

        self.model.replace_geometry(bands, lines);
        self.spans = match self.engine.rendered() {
            Some(score) => system_measure_spans(score),
            None => Vec::new(),
        };
        self.frame = compute_frame(&self.model, self.viewport, self.config.mask_overlap_px);

        true
    }
}
