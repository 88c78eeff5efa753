//! Small decisions the host surface makes around the core: layout direction of the
//! outline graph, when a free scroll has settled far enough to re-pick the focus
//! block, and whether a repeated activation counts as a confirmation.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Widths at or below this are considered narrow.
pub const DEFAULT_NARROW_WIDTH: u32 = 768;
/// Scroll distance after which the nearest block is looked up again.
pub const DEFAULT_SETTLE_DISTANCE: f64 = 50.0;
/// Window in which a second activation confirms the first.
pub const DEFAULT_CONFIRM_WINDOW: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// Flow direction of the hierarchical outline layout.
pub enum LayoutDirection {
    /// Root on top, children below.
    #[serde(rename = "UD")]
    TopDown,
    /// Root on the left, children to the right.
    #[serde(rename = "LR")]
    LeftRight,
}

impl LayoutDirection {
    #[must_use]
    /// Top-down on wide viewports, left-to-right on narrow ones.
    pub fn for_width(width: u32, narrow_width: u32) -> Self {
        if width > narrow_width {
            Self::TopDown
        } else {
            Self::LeftRight
        }
    }
}

#[derive(Clone, Copy, Debug)]
/// Tracks scrolling since the last nearest-block query.
pub struct ScrollSettle {
    threshold: f64,
    anchor: Option<f64>,
}

impl Default for ScrollSettle {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE_DISTANCE)
    }
}

impl ScrollSettle {
    #[must_use]
    /// Creates a tracker that fires after `threshold` units of scrolling.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            anchor: None,
        }
    }

    /// Records the offset at which the nearest block was last queried.
    pub fn anchor(&mut self, offset: f64) {
        self.anchor = Some(offset);
    }

    /// Returns true (and re-anchors) once `offset` is far enough from the last query.
    pub fn should_requery(&mut self, offset: f64) -> bool {
        let moved = self
            .anchor
            .is_none_or(|anchor| (offset - anchor).abs() >= self.threshold);
        if moved {
            self.anchor = Some(offset);
        }
        moved
    }

    /// Forgets the last query position.
    pub fn reset(&mut self) {
        self.anchor = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Result of registering an activation.
pub enum Activation {
    /// First activation: preview the target.
    Preview,
    /// Second activation of the same target within the window: act on it.
    Confirm,
}

#[derive(Clone, Debug)]
/// Double-activation detector for touch-style confirm gestures.
pub struct ConfirmGesture<K> {
    window: Duration,
    last: Option<(K, Instant)>,
}

impl<K> Default for ConfirmGesture<K> {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_WINDOW)
    }
}

impl<K> ConfirmGesture<K> {
    #[must_use]
    /// Creates a detector with the given confirmation window.
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }
}

impl<K: PartialEq> ConfirmGesture<K> {
    /// Registers an activation of `target` at `now`.
    pub fn register(&mut self, target: K, now: Instant) -> Activation {
        let confirmed = self.last.as_ref().is_some_and(|(previous, at)| {
            *previous == target && now.saturating_duration_since(*at) < self.window
        });
        if confirmed {
            self.last = None;
            Activation::Confirm
        } else {
            self.last = Some((target, now));
            Activation::Preview
        }
    }
}

#[cfg(test)]
#[path = "tests/surface.rs"]
mod tests;
