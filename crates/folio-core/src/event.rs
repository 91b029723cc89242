#![forbid(unsafe_code)]

//! Host input types.
//!
//! Hosts translate their native callbacks into these values before handing
//! them to the motion kernels.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport pixels, matching `Rect`.
//! - Frame timing arrives as a `Duration` through `Animation::tick`; the
//!   kernels never read a clock themselves.

use crate::geometry::Point;

/// Instantaneous pointer coordinates, as delivered with an enter/move event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    /// Horizontal viewport coordinate.
    pub client_x: f64,
    /// Vertical viewport coordinate.
    pub client_y: f64,
}

impl PointerEvent {
    /// Create a pointer event at the given viewport coordinates.
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }

    /// The event position as a point.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.client_x, self.client_y)
    }
}

impl From<Point> for PointerEvent {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}
