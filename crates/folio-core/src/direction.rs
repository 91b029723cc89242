#![forbid(unsafe_code)]

//! Direction-aware hover classification.
//!
//! [`detect_direction`] decides which edge of an element a pointer crossed
//! when it entered. The pointer offset from the element's center is rescaled
//! so the four triangular regions meet at the element's corners whatever the
//! aspect ratio, then the angle of that offset is bucketed into quarter turns.
//!
//! # Invariants
//!
//! 1. Pure and total: every input yields one of the four cardinal values.
//! 2. Degenerate rectangles (zero/negative size, non-finite fields) and
//!    non-finite pointers classify as [`Direction::Left`].
//! 3. Edge midpoints classify as their edge for every non-degenerate rectangle.
//! 4. Points exactly on a diagonal boundary are implementation-defined.
//!
//! [`HoverState`] is the sticky enter/leave state machine hover containers
//! keep around the classifier.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use crate::event::PointerEvent;
use crate::geometry::Rect;

/// Pointer entry direction relative to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
    /// No hover is active.
    #[default]
    Initial,
}

impl Direction {
    /// The four cardinal directions in sector order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Map a sector index (0 = top, clockwise) to a direction.
    ///
    /// Anything outside `0..4` maps to [`Direction::Left`].
    #[must_use]
    pub const fn from_sector(sector: i64) -> Self {
        match sector {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            3 => Self::Left,
            _ => Self::Left,
        }
    }

    /// Lowercase name, as used by style class variants.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Initial => "initial",
        }
    }

    /// Whether this is one of the four edges (anything but `Initial`).
    #[must_use]
    pub const fn is_cardinal(self) -> bool {
        !matches!(self, Self::Initial)
    }

    /// The edge on the other side of the element. `Initial` stays `Initial`.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Initial => Self::Initial,
        }
    }

    /// Mirror across the vertical axis: left and right swap.
    #[must_use]
    pub const fn mirrored_horizontally(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            other => other,
        }
    }

    /// Unit vector pointing away from the entry edge, in screen coordinates.
    ///
    /// Content nudged along this vector appears pushed by the pointer.
    /// `Initial` yields the zero vector.
    #[must_use]
    pub const fn entry_vector(self) -> (f64, f64) {
        match self {
            Self::Top => (0.0, 1.0),
            Self::Right => (-1.0, 0.0),
            Self::Bottom => (0.0, -1.0),
            Self::Left => (1.0, 0.0),
            Self::Initial => (0.0, 0.0),
        }
    }

    /// CSS `linear-gradient` angle running from the entry edge inward.
    ///
    /// `Top` gives `180` (`to bottom`), `Left` gives `90` (`to right`).
    #[must_use]
    pub const fn gradient_angle(self) -> Option<f64> {
        match self {
            Self::Top => Some(180.0),
            Self::Right => Some(270.0),
            Self::Bottom => Some(0.0),
            Self::Left => Some(90.0),
            Self::Initial => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the edge a pointer crossed when entering `rect`.
#[must_use]
pub fn detect_direction(pointer: PointerEvent, rect: Rect) -> Direction {
    if rect.is_degenerate() || !pointer.position().is_finite() {
        return Direction::Left;
    }

    let center = rect.center();
    let mut dx = pointer.client_x - center.x;
    let mut dy = pointer.client_y - center.y;

    // Compress the longer axis so the sector boundaries hit the corners.
    if rect.width > rect.height {
        dx *= rect.height / rect.width;
    } else if rect.height > rect.width {
        dy *= rect.width / rect.height;
    }

    let angle = dy.atan2(dx);
    if !angle.is_finite() {
        return Direction::Left;
    }

    // atan2 spans (-π, π]; +5 quarter turns keeps the value positive and
    // lines sector 0 up with straight up.
    let turns = (angle / FRAC_PI_2 + 5.0).round();
    if !turns.is_finite() {
        return Direction::Left;
    }
    Direction::from_sector((turns as i64).rem_euclid(4))
}

/// Sticky hover state: classified once on enter, cleared on leave.
///
/// ```
/// use folio_core::{Direction, HoverState, PointerEvent, Rect};
///
/// let mut hover = HoverState::new();
/// let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
/// assert_eq!(hover.pointer_enter(PointerEvent::new(50.0, 0.0), rect), Direction::Top);
/// hover.pointer_move();
/// assert_eq!(hover.direction(), Direction::Top);
/// hover.pointer_leave();
/// assert_eq!(hover.direction(), Direction::Initial);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverState {
    direction: Direction,
    entries: u64,
}

impl HoverState {
    /// A state with no active hover.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            direction: Direction::Initial,
            entries: 0,
        }
    }

    /// Current direction (`Initial` while not hovered).
    #[inline]
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether a hover is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.direction.is_cardinal()
    }

    /// Number of classifications performed so far.
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.entries
    }

    /// Classify a pointer entry. Every call performs exactly one
    /// classification, even if a previous leave was missed.
    pub fn pointer_enter(&mut self, pointer: PointerEvent, rect: Rect) -> Direction {
        let direction = detect_direction(pointer, rect);
        tracing::debug!(
            direction = direction.as_str(),
            x = pointer.client_x,
            y = pointer.client_y,
            "hover entry classified"
        );
        self.direction = direction;
        self.entries = self.entries.saturating_add(1);
        direction
    }

    /// Pointer moved inside the element. Direction is sticky, so this is a no-op
    /// kept for symmetry with host event wiring.
    #[inline]
    pub fn pointer_move(&mut self) {}

    /// Pointer left the element.
    pub fn pointer_leave(&mut self) {
        self.direction = Direction::Initial;
    }
}
