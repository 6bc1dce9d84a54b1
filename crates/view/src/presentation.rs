use crate::{ViewportModel, ViewportSize};
use pager_core::Band;

/// Opaque overlay covering the part of the viewport below the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskRect {
    pub top: f32,
    pub height: f32,
}

/// One page's worth of presentation: translate the whole rendered output so
/// the page's first band sits at the viewport top, then mask everything
/// from just above the next band down to the viewport bottom.
///
/// Offsets and mask edges are rounded to whole pixels; sub-pixel values
/// produce visible seams between the output and the mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationFrame {
    pub offset_y: f32,
    pub mask: Option<MaskRect>,
}

impl PresentationFrame {
    pub const IDENTITY: Self = Self { offset_y: 0.0, mask: None };
}

/// Compute the frame for the model's current page. Must be re-run whenever
/// the start index changes or the viewport is resized.
pub fn compute_frame(
    model: &ViewportModel,
    viewport: ViewportSize,
    mask_overlap_px: f32,
) -> PresentationFrame {
    let Some(first) = model.bands.get(model.start_index) else {
        return PresentationFrame::IDENTITY;
    };

    let offset_y = (-first.top).round();
    let mask = model
        .bands
        .get(model.page_end() + 1)
        .map(|next| mask_rect(next, offset_y, viewport, mask_overlap_px));

    PresentationFrame { offset_y, mask }
}

fn mask_rect(
    next_band: &Band,
    offset_y: f32,
    viewport: ViewportSize,
    mask_overlap_px: f32,
) -> MaskRect {
    let top = (next_band.top + offset_y - mask_overlap_px).round().max(0.0);

    MaskRect { top, height: (viewport.height - top).max(0.0) }
}
