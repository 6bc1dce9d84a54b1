//! Global paging gestures: wheel and keyboard.

use crate::NavAction;

/// Keys the viewport listens for while mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingKey {
    ArrowRight,
    ArrowLeft,
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Space,
    Home,
    End,
}

pub fn nav_for_key(key: PagingKey) -> NavAction {
    match key {
        PagingKey::ArrowRight | PagingKey::ArrowDown | PagingKey::PageDown | PagingKey::Space => {
            NavAction::PageDelta(1)
        }
        PagingKey::ArrowLeft | PagingKey::ArrowUp | PagingKey::PageUp => NavAction::PageDelta(-1),
        PagingKey::Home => NavAction::First,
        PagingKey::End => NavAction::Last,
    }
}

/// Wheel deltas page forward when positive, backward when negative.
pub fn nav_for_wheel(delta_y: f32) -> Option<NavAction> {
    if delta_y > 0.0 {
        Some(NavAction::PageDelta(1))
    } else if delta_y < 0.0 {
        Some(NavAction::PageDelta(-1))
    } else {
        None
    }
}
