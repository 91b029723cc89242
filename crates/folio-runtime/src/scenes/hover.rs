#![forbid(unsafe_code)]

//! Direction-aware hover styling for project cards.
//!
//! On entry the card classifies the crossed edge and switches to that edge's
//! variant; on leave it returns to the neutral variant. The host animates
//! between variants with its own transition, so only the target styles are
//! published here.
//!
//! | direction | media shift | content shift | overlay angle |
//! |-----------|-------------|---------------|---------------|
//! | top       | `(0, 12)`   | `(0, -8)`     | 180deg        |
//! | right     | `(-12, 0)`  | `(8, 0)`      | 270deg        |
//! | bottom    | `(0, -12)`  | `(0, 4)`      | 0deg          |
//! | left      | `(12, 0)`   | `(-4, 0)`     | 90deg         |
//! | initial   | none        | none          | 0deg          |

use folio_core::{Direction, HoverState, PointerEvent, Rect};
use folio_style::{ColorStop, LinearGradient, Rgba, StyleValue};

use crate::reactive::Observable;
use crate::scenes::{Channel, Scene};

/// Media shift along the entry vector, px.
const MEDIA_SHIFT: f64 = 12.0;
const MEDIA_SCALE: f64 = 1.05;
const IDLE_CONTENT_OPACITY: f64 = 0.9;

const ACCENT_BLUE: Rgba = Rgba::rgba(59, 130, 246, 0.2);
const GLOW_CYAN: Rgba = Rgba::rgba(34, 211, 238, 0.1);

/// Target styles of a card for one direction.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverStyle {
    pub direction: Direction,
    /// Media translation in px.
    pub media_offset: (f64, f64),
    pub media_scale: f64,
    /// Caption translation in px.
    pub content_offset: (f64, f64),
    pub content_opacity: f64,
    pub overlay: LinearGradient,
    /// Edge glow; absent while idle.
    pub glow: Option<LinearGradient>,
}

impl Default for HoverStyle {
    fn default() -> Self {
        Self::for_direction(Direction::Initial)
    }
}

fn content_offset(direction: Direction) -> (f64, f64) {
    match direction {
        Direction::Top => (0.0, -8.0),
        Direction::Bottom => (0.0, 4.0),
        Direction::Left => (-4.0, 0.0),
        Direction::Right => (8.0, 0.0),
        Direction::Initial => (0.0, 0.0),
    }
}

impl HoverStyle {
    /// Variant for `direction`.
    #[must_use]
    pub fn for_direction(direction: Direction) -> Self {
        let Some(angle) = direction.gradient_angle() else {
            return Self {
                direction,
                media_offset: (0.0, 0.0),
                media_scale: 1.0,
                content_offset: (0.0, 0.0),
                content_opacity: IDLE_CONTENT_OPACITY,
                overlay: LinearGradient::between(
                    0.0,
                    Rgba::BLACK.with_alpha(0.95),
                    Rgba::BLACK.with_alpha(0.6),
                )
                .with_stop(ColorStop::new(Rgba::BLACK.with_alpha(0.1))),
                glow: None,
            };
        };
        let (vx, vy) = direction.entry_vector();
        Self {
            direction,
            media_offset: (vx * MEDIA_SHIFT, vy * MEDIA_SHIFT),
            media_scale: MEDIA_SCALE,
            content_offset: content_offset(direction),
            content_opacity: 1.0,
            overlay: LinearGradient::between(angle, ACCENT_BLUE, Rgba::TRANSPARENT)
                .with_stop(ColorStop::new(Rgba::BLACK.with_alpha(0.9))),
            glow: Some(
                LinearGradient::between(angle, GLOW_CYAN, Rgba::TRANSPARENT)
                    .with_stop(ColorStop::new(Rgba::TRANSPARENT)),
            ),
        }
    }

    /// CSS transform for the media layer.
    #[must_use]
    pub fn media_transform(&self) -> String {
        let (x, y) = self.media_offset;
        format!(
            "translate({}px, {}px) scale({})",
            StyleValue::Number(x),
            StyleValue::Number(y),
            StyleValue::Number(self.media_scale)
        )
    }

    /// CSS transform for the caption.
    #[must_use]
    pub fn content_transform(&self) -> String {
        let (x, y) = self.content_offset;
        format!(
            "translate({}px, {}px)",
            StyleValue::Number(x),
            StyleValue::Number(y)
        )
    }
}

/// Hover state of one card with its published style.
#[derive(Debug, Clone)]
pub struct HoverDriver {
    state: HoverState,
    style: Observable<HoverStyle>,
}

impl Default for HoverDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverDriver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: HoverState::new(),
            style: Observable::new(HoverStyle::default()),
        }
    }

    /// Published target style.
    #[must_use]
    pub fn style(&self) -> Observable<HoverStyle> {
        self.style.clone()
    }

    #[must_use]
    pub fn state(&self) -> &HoverState {
        &self.state
    }

    /// Pointer entered the card measured as `rect`.
    pub fn pointer_enter(&mut self, pointer: PointerEvent, rect: Rect) -> Direction {
        let direction = self.state.pointer_enter(pointer, rect);
        self.style.set(HoverStyle::for_direction(direction));
        direction
    }

    /// Pointer moved within the card; the variant does not change.
    pub fn pointer_move(&mut self) {
        self.state.pointer_move();
    }

    /// Pointer left the card.
    pub fn pointer_leave(&mut self) {
        self.state.pointer_leave();
        self.style.set(HoverStyle::default());
    }
}

impl Scene for HoverDriver {
    fn name(&self) -> &'static str {
        "hover"
    }

    fn channels(&self) -> Vec<Channel> {
        self.style.with(|style| {
            vec![
                Channel::new("media.transform", style.media_transform()),
                Channel::new("overlay.background", style.overlay.to_string()),
                Channel::new("content.transform", style.content_transform()),
                Channel::new(
                    "content.opacity",
                    StyleValue::Number(style.content_opacity).to_string(),
                ),
                Channel::new(
                    "glow.background",
                    style
                        .glow
                        .as_ref()
                        .map_or_else(|| "none".to_owned(), ToString::to_string),
                ),
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect::new(0.0, 0.0, 400.0, 200.0);

    #[test]
    fn idle_variant() {
        let idle = HoverStyle::default();
        assert_eq!(idle.media_transform(), "translate(0px, 0px) scale(1)");
        assert_eq!(idle.content_opacity, 0.9);
        assert_eq!(
            idle.overlay.to_string(),
            "linear-gradient(0deg, rgba(0, 0, 0, 0.95), rgba(0, 0, 0, 0.6), rgba(0, 0, 0, 0.1))"
        );
        assert!(idle.glow.is_none());
    }

    #[test]
    fn cardinal_variants_follow_entry_edge() {
        let top = HoverStyle::for_direction(Direction::Top);
        assert_eq!(top.media_transform(), "translate(0px, 12px) scale(1.05)");
        assert_eq!(top.content_transform(), "translate(0px, -8px)");
        assert_eq!(top.overlay.angle(), 180.0);

        let right = HoverStyle::for_direction(Direction::Right);
        assert_eq!(right.media_transform(), "translate(-12px, 0px) scale(1.05)");
        assert_eq!(right.content_transform(), "translate(8px, 0px)");
        assert_eq!(
            right.glow.map(|g| g.to_string()).as_deref(),
            Some(
                "linear-gradient(270deg, rgba(34, 211, 238, 0.1), rgba(0, 0, 0, 0), rgba(0, 0, 0, 0))"
            )
        );

        let left = HoverStyle::for_direction(Direction::Left);
        assert_eq!(left.content_transform(), "translate(-4px, 0px)");
        assert_eq!(left.overlay.angle(), 90.0);
    }

    #[test]
    fn driver_publishes_on_enter_and_leave() {
        let mut card = HoverDriver::new();
        let style = card.style();

        assert_eq!(card.pointer_enter(PointerEvent::new(200.0, 1.0), CARD), Direction::Top);
        assert_eq!(style.get().direction, Direction::Top);

        card.pointer_move();
        assert_eq!(style.get().direction, Direction::Top);

        card.pointer_leave();
        assert_eq!(style.get(), HoverStyle::default());
        assert!(!card.state().is_active());
    }

    #[test]
    fn reentry_reclassifies() {
        let mut card = HoverDriver::new();
        card.pointer_enter(PointerEvent::new(1.0, 100.0), CARD);
        // Leave missed; a fresh entry still classifies.
        card.pointer_enter(PointerEvent::new(399.0, 100.0), CARD);
        assert_eq!(card.style().get().direction, Direction::Right);
        assert_eq!(card.state().entries(), 2);
    }

    #[test]
    fn channels() {
        let mut card = HoverDriver::new();
        assert_eq!(card.channels()[4].css, "none");
        card.pointer_enter(PointerEvent::new(200.0, 199.0), CARD);
        let channels = card.channels();
        assert_eq!(channels[0].css, "translate(0px, -12px) scale(1.05)");
        assert_eq!(channels[2].css, "translate(0px, 4px)");
        assert_eq!(channels[3].css, "1");
    }
}
