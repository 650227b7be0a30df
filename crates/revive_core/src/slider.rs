//! Before/after comparison slider model.
//!
//! The divider position is a percentage of the control width that the
//! "before" layer covers. Dragging is gated behind an explicit pointer-down /
//! pointer-up pair, so a pointer merely passing over the control leaves the
//! divider where it is.

use crate::view_model::ComparisonPair;

/// Divider position whenever a new pair of images is presented.
pub const DEFAULT_POSITION: f32 = 50.0;

/// Horizontal extent of the control in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalSpan {
    pub left: f32,
    pub width: f32,
}

impl HorizontalSpan {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }
}

/// Maps a pointer x coordinate to a clamped percentage of the span.
///
/// Returns `None` when the span has no usable width (initial layout) or any
/// input is not finite.
pub fn position_for_pointer(x: f32, span: HorizontalSpan) -> Option<f32> {
    if !x.is_finite() || !span.left.is_finite() || !span.width.is_finite() || span.width <= 0.0 {
        return None;
    }
    let percent = 100.0 * (x - span.left) / span.width;
    Some(percent.clamp(0.0, 100.0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSlider {
    position: f32,
    dragging: bool,
    pair: Option<ComparisonPair>,
}

impl Default for ComparisonSlider {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            dragging: false,
            pair: None,
        }
    }
}

impl ComparisonSlider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the slider to an image pair, resetting the divider when the pair changes.
    pub fn present(&mut self, pair: ComparisonPair) {
        if self.pair != Some(pair) {
            self.pair = Some(pair);
            self.position = DEFAULT_POSITION;
            self.dragging = false;
        }
    }

    pub fn pair(&self) -> Option<ComparisonPair> {
        self.pair
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Starts a drag and jumps the divider under the pointer.
    pub fn pointer_down(&mut self, x: f32, span: HorizontalSpan) {
        self.dragging = true;
        self.track(x, span);
    }

    /// Follows the pointer only while a drag is active.
    pub fn pointer_move(&mut self, x: f32, span: HorizontalSpan) {
        if self.dragging {
            self.track(x, span);
        }
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Width in screen units of the clipped "before" layer.
    pub fn clip_width(&self, total_width: f32) -> f32 {
        if !total_width.is_finite() || total_width <= 0.0 {
            return 0.0;
        }
        total_width * self.position / 100.0
    }

    fn track(&mut self, x: f32, span: HorizontalSpan) {
        if let Some(position) = position_for_pointer(x, span) {
            self.position = position;
        }
    }
}
