use crate::PagerConfig;
use score_engine::{BoundingBox, RenderedScore};

/// Vertical translation currently applied to the rendered output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub offset_y: f32,
}

impl ViewTransform {
    pub const IDENTITY: Self = Self { offset_y: 0.0 };

    pub fn new(offset_y: f32) -> Self {
        Self { offset_y }
    }
}

/// Extract one bounding box per system candidate, in viewport coordinates
/// as presented under `transform`.
///
/// Measurement must read the document's natural layout, not the currently
/// windowed presentation: a caller that has a translation applied must
/// neutralize it (sample under [`ViewTransform::IDENTITY`], then restore)
/// so what is currently shown cannot feed back into what should be computed
/// next.
///
/// Candidates smaller than the configured minimum width or height are
/// discarded as decorative marks or empty groups. An empty result means the
/// output is not yet measurable, never that the score has zero systems.
pub fn sample_system_boxes(
    score: &RenderedScore,
    transform: ViewTransform,
    config: &PagerConfig,
) -> Vec<BoundingBox> {
    score
        .systems()
        .map(|system| system.bbox.translated_y(transform.offset_y))
        .filter(|bbox| {
            bbox.width >= config.min_system_width_px && bbox.height >= config.min_system_height_px
        })
        .collect()
}
