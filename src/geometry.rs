//! Vertical geometry shared by the nearest query and scroll centring.
//!
//! Rectangles are viewport-relative: `top` is measured from the top edge of the
//! visible area, so a block scrolled past has a negative `top`.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// On-screen vertical extent of a block.
pub struct Rect {
    /// Distance from the viewport's top edge to the block's top edge.
    pub top: f64,
    /// Block height.
    pub height: f64,
}

impl Rect {
    #[must_use]
    /// Creates a rectangle from its top edge and height.
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    /// Vertical midpoint.
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[must_use]
/// Absolute distance between a block's midpoint and the viewport's midpoint.
pub fn distance_from_center(rect: Rect, viewport_height: f64) -> f64 {
    (rect.center() - viewport_height / 2.0).abs()
}

#[must_use]
/// Scroll offset that places the block's midpoint on the viewport's midpoint.
pub fn scroll_target(rect: Rect, viewport_height: f64, current_offset: f64) -> f64 {
    current_offset + rect.top - (viewport_height - rect.height) / 2.0
}

#[cfg(test)]
#[path = "tests/geometry.rs"]
mod tests;
