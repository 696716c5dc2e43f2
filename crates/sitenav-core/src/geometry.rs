use serde::{Deserialize, Serialize};

/// On-screen rectangle in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

/// Layout facts the host reports with keystrokes, resizes and scrolls: where
/// the search input currently sits and how far the page is scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub anchor: Rect,
    pub scroll: ScrollOffset,
}

/// Absolute page position of the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

impl Placement {
    /// Directly under the anchor, `offset` pixels below its bottom edge,
    /// converted from viewport to page coordinates.
    pub fn below(geometry: &Geometry, offset: f64) -> Self {
        Self {
            left: geometry.anchor.left + geometry.scroll.x,
            top: geometry.anchor.bottom() + geometry.scroll.y + offset,
            width: geometry.anchor.width,
        }
    }
}
