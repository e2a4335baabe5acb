//! Visual-state logic for the clinic pages.
//!
//! Each operation takes what a DOM event reports (scroll offset, viewport
//! width, pointer position, form values) and returns the state to apply.
//! Absent elements are modelled as `Option` and produce no change.

pub mod contact;
pub mod effects;
pub mod layout;
pub mod lightbox;

/// Widths at or below this use the narrow (mobile) layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

pub fn is_mobile(viewport_width: f64) -> bool {
    viewport_width <= MOBILE_BREAKPOINT
}

/// Axis-aligned element box, as from `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}
