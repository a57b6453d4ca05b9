use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Size};

/// Visible window onto the document, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport (finite, non-negative dimensions).
    pub fn new(width: f64, height: f64) -> MotionResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(MotionError::validation(
                "Viewport dimensions must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Viewport dimensions as a kurbo size.
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Document-space rectangle covered by the viewport at `scroll_y`.
    pub fn rect_at(self, scroll_y: f64) -> Rect {
        Rect::from_origin_size(Point::new(0.0, scroll_y), self.size())
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// Vertical span `[top, top + height)` of a section in document space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionBox {
    /// Offset of the section's top edge from the document top.
    pub top: f64,
    /// Section height, `>= 0`.
    pub height: f64,
}

impl SectionBox {
    /// Create a validated box.
    pub fn new(top: f64, height: f64) -> MotionResult<Self> {
        let b = Self { top, height };
        b.validate()?;
        Ok(b)
    }

    /// Check that both fields are finite and the height is non-negative.
    pub fn validate(self) -> MotionResult<()> {
        if !(self.top.is_finite() && self.height.is_finite()) {
            return Err(MotionError::validation("SectionBox must be finite"));
        }
        if self.height < 0.0 {
            return Err(MotionError::validation("SectionBox height must be >= 0"));
        }
        Ok(())
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Return `true` when `y` is inside `[top, bottom)`.
    pub fn contains(self, y: f64) -> bool {
        self.top <= y && y < self.bottom()
    }
}

/// One scroll/resize notification from the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollState {
    /// Vertical scroll offset of the document.
    pub scroll_y: f64,
    /// Viewport at the time of the event.
    pub viewport: Viewport,
    /// Host clock in seconds; drives reveal entrance transitions.
    #[serde(default)]
    pub time: f64,
}

impl ScrollState {
    /// Snapshot at time zero.
    pub fn new(scroll_y: f64, viewport: Viewport) -> Self {
        Self {
            scroll_y,
            viewport,
            time: 0.0,
        }
    }

    /// Same snapshot, stamped with host time `time` (seconds).
    pub fn at_time(mut self, time: f64) -> Self {
        self.time = time;
        self
    }

    /// Midline point used for active-section selection: scroll offset plus half the viewport.
    pub fn midline_y(self) -> f64 {
        self.scroll_y + self.viewport.height / 2.0
    }

    /// Document-space rectangle currently visible.
    pub fn visible_rect(self) -> Rect {
        self.viewport.rect_at(self.scroll_y)
    }
}

/// Fraction of `element` (document space) that lies inside `visible`.
///
/// Degenerate elements (zero area) count as fully visible when their origin is inside the
/// visible rectangle, and invisible otherwise.
pub fn visible_fraction(element: Rect, visible: Rect) -> f64 {
    let area = element.area();
    if area <= 0.0 {
        let origin = element.origin();
        let inside = visible.x0 <= origin.x
            && origin.x <= visible.x1
            && visible.y0 <= origin.y
            && origin.y <= visible.y1;
        return if inside { 1.0 } else { 0.0 };
    }
    let overlap = element.intersect(visible);
    (overlap.area() / area).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
