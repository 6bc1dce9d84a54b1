//! Measurement-driven pagination for rendered scores.
//!
//! Pure logic only: bounding boxes go in, ordered bands, page plans, and
//! status readouts come out. Nothing here touches timers, input, or the
//! rendering engine's lifecycle; that lives in the view crate.

mod band;
mod config;
mod measures;
mod planner;
mod sampler;
mod status;

pub use band::{cluster_bands, Band};
pub use config::PagerConfig;
pub use measures::{page_measure_span, system_measure_spans, MeasureSpan};
pub use planner::{clamp_start, last_valid_start, lines_that_fit, page_end};
pub use sampler::{sample_system_boxes, ViewTransform};
pub use status::{derive_status, PageStatus};
