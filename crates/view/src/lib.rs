//! Page-turn viewport for rendered scores.
//!
//! Owns the viewport state machine: an engine renders the full score once,
//! the geometry is measured into bands, a page plan is computed, and the
//! current page is presented by translating the output and masking the
//! remainder. Resizes and navigation re-trigger the same pipeline while the
//! reflow coordinator keeps stale passes from applying.

mod coordinator;
mod input;
mod model;
mod presentation;

pub use coordinator::PageTurner;
pub use input::{nav_for_key, nav_for_wheel, PagingKey};
pub use model::{apply_nav, NavAction, ViewPhase, ViewportModel, ViewportSize};
pub use presentation::{compute_frame, MaskRect, PresentationFrame};
