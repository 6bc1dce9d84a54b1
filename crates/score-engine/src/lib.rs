use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Axis-aligned bounding box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// The same box shifted vertically by `dy`.
    pub fn translated_y(&self, dy: f32) -> Self {
        Self { y: self.y + dy, ..*self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

/// Inclusive range of measure numbers, as assigned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureRange {
    pub from: u32,
    pub to: u32,
}

impl MeasureRange {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, number: u32) -> bool {
        number >= self.from && number <= self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMeasure {
    pub bbox: BoundingBox,
    /// Measure number; monotonically non-decreasing across the score.
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStaffLine {
    pub bbox: BoundingBox,
    pub measures: Vec<RenderedMeasure>,
}

/// One horizontal line of music, spanning one or more staves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSystem {
    pub bbox: BoundingBox,
    pub staff_lines: Vec<RenderedStaffLine>,
}

impl RenderedSystem {
    /// Measure numbers drawn in this system, in order.
    pub fn measure_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.staff_lines.first().into_iter().flat_map(|line| {
            line.measures.iter().map(|measure| measure.number)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub bbox: BoundingBox,
    pub systems: Vec<RenderedSystem>,
}

/// Positioned graphical tree produced by a render pass:
/// page -> system -> staff line -> measure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedScore {
    pub pages: Vec<RenderedPage>,
}

impl RenderedScore {
    /// All systems across all pages, in document order.
    pub fn systems(&self) -> impl Iterator<Item = &RenderedSystem> {
        self.pages.iter().flat_map(|page| page.systems.iter())
    }

    pub fn system_count(&self) -> usize {
        self.pages.iter().map(|page| page.systems.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub enum ScoreSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ScoreSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for ScoreSource {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<Vec<u8>> for ScoreSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("score parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no score loaded")]
    NotLoaded,
    #[error("score has no systems")]
    EmptyScore,
    #[error("measure range {from}..={to} invalid (score ends at measure {last})")]
    InvalidMeasureRange { from: u32, to: u32, last: u32 },
}

/// Seam to the external notation renderer.
///
/// Implementations lay out and draw only when told to: `render` is the sole
/// layout trigger, and an engine must never re-render on its own in response
/// to environment changes (the reflow coordinator owns resize observation).
/// Layout may settle asynchronously; `advance_frame` is called once per
/// displayed frame and `canvas_size` reports whatever extent the engine has
/// committed so far, so callers can wait for the size to stop changing.
pub trait ScoreEngine {
    fn load(&mut self, source: ScoreSource) -> Result<(), EngineError>;

    /// Lay out and draw the loaded score (or the restricted range of it).
    fn render(&mut self) -> Result<(), EngineError>;

    /// Restrict subsequent renders to a measure-number interval.
    /// `None` clears the restriction. Takes effect on the next `render`.
    fn set_render_range(&mut self, range: Option<MeasureRange>) -> Result<(), EngineError>;

    /// The positioned graphical tree, if a render pass has run.
    fn rendered(&self) -> Option<&RenderedScore>;

    /// Extent of the drawn output committed so far.
    fn canvas_size(&self) -> Option<CanvasSize>;

    /// Advance simulated/asynchronous layout by one displayed frame.
    fn advance_frame(&mut self);

    fn unload(&mut self);
}

fn default_page_width() -> f32 {
    900.0
}

fn default_top_margin() -> f32 {
    24.0
}

fn default_system_gap() -> f32 {
    36.0
}

fn default_side_margin() -> f32 {
    40.0
}

fn default_staves() -> u32 {
    1
}

/// Declarative layout description consumed by [`FixtureEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureScore {
    #[serde(default = "default_page_width")]
    pub page_width: f32,
    #[serde(default = "default_top_margin")]
    pub top_margin: f32,
    #[serde(default = "default_system_gap")]
    pub system_gap: f32,
    #[serde(default = "default_side_margin")]
    pub side_margin: f32,
    /// Number of frames the reported canvas keeps growing after `render`.
    #[serde(default)]
    pub settle_frames: u32,
    pub systems: Vec<FixtureSystem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSystem {
    pub height: f32,
    #[serde(default = "default_staves")]
    pub staves: u32,
    pub measures: u32,
    /// Vertical gap above this system, overriding `system_gap`.
    #[serde(default)]
    pub gap_before: Option<f32>,
}

/// Deterministic engine backend driven by a JSON layout description.
///
/// Stands in for a real notation renderer: it positions each declared system
/// vertically, numbers measures consecutively, honors render-range
/// restriction, and simulates asynchronous layout settling by growing the
/// reported canvas over `settle_frames` frames after each render.
#[derive(Debug, Default)]
pub struct FixtureEngine {
    fixture: Option<FixtureScore>,
    rendered: Option<RenderedScore>,
    render_range: Option<MeasureRange>,
    final_size: Option<CanvasSize>,
    frames_remaining: u32,
    settle_frames: u32,
}

impl FixtureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn fixture(&self) -> Result<&FixtureScore, EngineError> {
        self.fixture.as_ref().ok_or(EngineError::NotLoaded)
    }

    fn last_measure_number(fixture: &FixtureScore) -> u32 {
        fixture.systems.iter().map(|system| system.measures).sum()
    }

    fn layout(fixture: &FixtureScore, range: Option<MeasureRange>) -> RenderedScore {
        let content_width = (fixture.page_width - 2.0 * fixture.side_margin).max(1.0);
        let mut cursor_y = fixture.top_margin;
        let mut next_number = 1u32;
        let mut systems = Vec::new();

        for decl in &fixture.systems {
            let first = next_number;
            let last = first + decl.measures.saturating_sub(1);
            next_number = last + 1;

            let in_range = match range {
                Some(range) => first <= range.to && last >= range.from,
                None => true,
            };
            if !in_range {
                continue;
            }

            if !systems.is_empty() {
                cursor_y += decl.gap_before.unwrap_or(fixture.system_gap);
            }

            let bbox = BoundingBox::new(fixture.side_margin, cursor_y, content_width, decl.height);
            systems.push(Self::build_system(bbox, decl, first));
            cursor_y = bbox.bottom();
        }

        let page_height = cursor_y + fixture.top_margin;
        let page = RenderedPage {
            bbox: BoundingBox::new(0.0, 0.0, fixture.page_width, page_height),
            systems,
        };

        RenderedScore { pages: vec![page] }
    }

    fn build_system(bbox: BoundingBox, decl: &FixtureSystem, first_number: u32) -> RenderedSystem {
        let staves = decl.staves.max(1);
        let staff_height = bbox.height / staves as f32;
        let measures = decl.measures.max(1);
        let measure_width = bbox.width / measures as f32;

        let staff_lines = (0..staves)
            .map(|staff_index| {
                let staff_bbox = BoundingBox::new(
                    bbox.x,
                    bbox.y + staff_index as f32 * staff_height,
                    bbox.width,
                    staff_height,
                );

                let measures = (0..measures)
                    .map(|measure_index| RenderedMeasure {
                        bbox: BoundingBox::new(
                            staff_bbox.x + measure_index as f32 * measure_width,
                            staff_bbox.y,
                            measure_width,
                            staff_bbox.height,
                        ),
                        number: first_number + measure_index,
                    })
                    .collect();

                RenderedStaffLine { bbox: staff_bbox, measures }
            })
            .collect();

        RenderedSystem { bbox, staff_lines }
    }
}

impl ScoreEngine for FixtureEngine {
    fn load(&mut self, source: ScoreSource) -> Result<(), EngineError> {
        let bytes = match source {
            ScoreSource::Path(path) => fs::read(path)?,
            ScoreSource::Bytes(bytes) => bytes,
        };

        let fixture: FixtureScore = serde_json::from_slice(&bytes)?;
        if fixture.systems.is_empty() {
            return Err(EngineError::EmptyScore);
        }

        log::debug!("fixture score loaded: {} systems", fixture.systems.len());

        self.settle_frames = fixture.settle_frames;
        self.fixture = Some(fixture);
        self.rendered = None;
        self.render_range = None;
        self.final_size = None;
        self.frames_remaining = 0;

        Ok(())
    }

    fn render(&mut self) -> Result<(), EngineError> {
        let fixture = self.fixture()?;
        let score = Self::layout(fixture, self.render_range);

        let page = score.pages.first();
        self.final_size = page.map(|page| CanvasSize {
            width: page.bbox.width,
            height: page.bbox.height,
        });
        self.frames_remaining = self.settle_frames;
        self.rendered = Some(score);

        Ok(())
    }

    fn set_render_range(&mut self, range: Option<MeasureRange>) -> Result<(), EngineError> {
        if let Some(range) = range {
            let last = Self::last_measure_number(self.fixture()?);
            if range.from == 0 || range.from > range.to || range.to > last {
                return Err(EngineError::InvalidMeasureRange {
                    from: range.from,
                    to: range.to,
                    last,
                });
            }
        }

        self.render_range = range;
        Ok(())
    }

    fn rendered(&self) -> Option<&RenderedScore> {
        self.rendered.as_ref()
    }

    fn canvas_size(&self) -> Option<CanvasSize> {
        let final_size = self.final_size?;
        if self.frames_remaining == 0 {
            return Some(final_size);
        }

        // Layout is still settling: report a canvas that has only grown part
        // of the way to its final height, as a browser-hosted renderer does
        // while glyphs and staves stream in.
        let total = self.settle_frames.max(1) as f32;
        let done = (self.settle_frames - self.frames_remaining) as f32;
        Some(CanvasSize {
            width: final_size.width,
            height: final_size.height * (done / total),
        })
    }

    fn advance_frame(&mut self) {
        if self.frames_remaining > 0 {
            self.frames_remaining -= 1;
        }
    }

    fn unload(&mut self) {
        self.fixture = None;
        self.rendered = None;
        self.render_range = None;
        self.final_size = None;
        self.frames_remaining = 0;
    }
}

pub fn default_engine() -> FixtureEngine {
    FixtureEngine::new()
}
