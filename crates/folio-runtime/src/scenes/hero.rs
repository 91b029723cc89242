#![forbid(unsafe_code)]

//! Hero headline: pointer-following spotlight mask and typed roles.
//!
//! The mask center is the pointer position relative to the headline box, in
//! percent and clamped to `[0, 100]`. Small pointer jitter is ignored: the
//! published center only moves once either axis differs from it by more than
//! [`HeroConfig::threshold`] percentage points.

use std::time::Duration;

use folio_core::animation::{Animation, Typewriter, TypewriterTiming};
use folio_core::{PointerEvent, Rect};
use folio_style::StyleValue;

use crate::reactive::Observable;
use crate::scenes::{Channel, Scene};

/// Radius of the spotlight gradient, percent of the box.
const MASK_RADIUS: f64 = 35.0;

/// Spotlight mask center in percent of the headline box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskCenter {
    pub cx: f64,
    pub cy: f64,
}

impl Default for MaskCenter {
    fn default() -> Self {
        Self { cx: 50.0, cy: 50.0 }
    }
}

impl MaskCenter {
    /// Center of `pointer` within `rect`, or `None` for a degenerate rect.
    #[must_use]
    pub fn from_pointer(pointer: PointerEvent, rect: Rect) -> Option<Self> {
        if rect.is_degenerate() || !pointer.position().is_finite() {
            return None;
        }
        let percent = |offset: f64, extent: f64| (offset / extent * 100.0).clamp(0.0, 100.0);
        Some(Self {
            cx: percent(pointer.client_x - rect.left, rect.width),
            cy: percent(pointer.client_y - rect.top, rect.height),
        })
    }

    /// Whether `other` is more than `threshold` points away on either axis.
    #[must_use]
    pub fn differs_from(&self, other: &Self, threshold: f64) -> bool {
        (self.cx - other.cx).abs() > threshold || (self.cy - other.cy).abs() > threshold
    }

    /// Radial gradient revealing the headline around the center.
    #[must_use]
    pub fn to_css(&self) -> String {
        format!(
            "radial-gradient(circle {r}% at {cx}% {cy}%, rgb(255, 255, 255) 0%, \
             rgba(255, 255, 255, 0.9) 60%, rgba(255, 255, 255, 0.7) 100%)",
            r = StyleValue::Number(MASK_RADIUS),
            cx = StyleValue::Number(self.cx),
            cy = StyleValue::Number(self.cy),
        )
    }
}

/// Spotlight mask that follows the pointer.
#[derive(Debug, Clone)]
pub struct HeroMask {
    threshold: f64,
    center: Observable<MaskCenter>,
}

impl HeroMask {
    /// Mask centered in the box, moving once a change exceeds `threshold`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            center: Observable::new(MaskCenter::default()),
        }
    }

    /// Published center.
    #[must_use]
    pub fn center(&self) -> Observable<MaskCenter> {
        self.center.clone()
    }

    /// Pointer moved over the headline. Returns `true` if the center moved.
    pub fn pointer_move(&mut self, pointer: PointerEvent, rect: Rect) -> bool {
        let Some(next) = MaskCenter::from_pointer(pointer, rect) else {
            return false;
        };
        let moved = self
            .center
            .with(|current| next.differs_from(current, self.threshold));
        if moved {
            self.center.set(next);
        }
        moved
    }

    /// Recenter, as when the pointer leaves the page.
    pub fn reset(&mut self) {
        self.center.set(MaskCenter::default());
    }
}

impl Default for HeroMask {
    fn default() -> Self {
        Self::new(HeroConfig::default().threshold)
    }
}

/// Hero headline parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroConfig {
    /// Minimum mask movement, in percentage points.
    pub threshold: f64,
    /// Roles cycled by the typewriter.
    pub roles: Vec<String>,
    pub timing: TypewriterTiming,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            roles: vec!["Software Engineer".into(), "Problem Solver".into()],
            timing: TypewriterTiming::default(),
        }
    }
}

/// Spotlight mask plus the typed role line.
#[derive(Debug, Clone)]
pub struct HeroScene {
    mask: HeroMask,
    roles: Typewriter,
}

impl HeroScene {
    #[must_use]
    pub fn new(config: &HeroConfig) -> Self {
        Self {
            mask: HeroMask::new(config.threshold),
            roles: Typewriter::new(config.roles.iter().cloned()).with_timing(config.timing),
        }
    }

    #[must_use]
    pub fn mask(&self) -> &HeroMask {
        &self.mask
    }

    pub fn mask_mut(&mut self) -> &mut HeroMask {
        &mut self.mask
    }

    #[must_use]
    pub fn roles(&self) -> &Typewriter {
        &self.roles
    }

    /// Advance the typewriter by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.roles.tick(dt);
    }
}

impl Scene for HeroScene {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn channels(&self) -> Vec<Channel> {
        vec![
            Channel::new("mask.gradient", self.mask.center.with(MaskCenter::to_css)),
            Channel::new("role.text", self.roles.text()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: Rect = Rect::new(100.0, 50.0, 400.0, 200.0);

    #[test]
    fn center_is_percent_of_box() {
        let c = MaskCenter::from_pointer(PointerEvent::new(200.0, 100.0), BOX).unwrap();
        assert_eq!(c, MaskCenter { cx: 25.0, cy: 25.0 });
    }

    #[test]
    fn center_clamps_outside_box() {
        let c = MaskCenter::from_pointer(PointerEvent::new(0.0, 1000.0), BOX).unwrap();
        assert_eq!(c, MaskCenter { cx: 0.0, cy: 100.0 });
    }

    #[test]
    fn degenerate_box_is_ignored() {
        let mut mask = HeroMask::default();
        let flat = Rect::new(0.0, 0.0, 100.0, 0.0);
        assert!(!mask.pointer_move(PointerEvent::new(10.0, 10.0), flat));
        assert_eq!(mask.center().get(), MaskCenter::default());
    }

    #[test]
    fn jitter_below_threshold_is_ignored() {
        let mut mask = HeroMask::default();
        // 50.5% / 50.5%: within one point of the default center.
        assert!(!mask.pointer_move(PointerEvent::new(302.0, 151.0), BOX));
        assert_eq!(mask.center().get(), MaskCenter::default());

        assert!(mask.pointer_move(PointerEvent::new(400.0, 150.0), BOX));
        assert_eq!(mask.center().get(), MaskCenter { cx: 75.0, cy: 50.0 });

        // Compared against the published center, not the last pointer.
        assert!(!mask.pointer_move(PointerEvent::new(402.0, 150.0), BOX));
        assert!(!mask.pointer_move(PointerEvent::new(403.0, 150.0), BOX));
        assert!(mask.pointer_move(PointerEvent::new(406.0, 150.0), BOX));
    }

    #[test]
    fn mask_css() {
        assert_eq!(
            MaskCenter::default().to_css(),
            "radial-gradient(circle 35% at 50% 50%, rgb(255, 255, 255) 0%, \
             rgba(255, 255, 255, 0.9) 60%, rgba(255, 255, 255, 0.7) 100%)"
        );
    }

    #[test]
    fn scene_types_roles() {
        let mut hero = HeroScene::new(&HeroConfig {
            roles: vec!["Dev".into()],
            ..HeroConfig::default()
        });
        assert_eq!(hero.channels()[1].css, "");
        hero.tick(Duration::from_millis(200));
        assert_eq!(hero.roles().text(), "De");
        hero.tick(Duration::from_millis(100));
        assert_eq!(hero.channels()[1].css, "Dev");
    }

    #[test]
    fn reset_recenters() {
        let mut hero = HeroScene::new(&HeroConfig::default());
        hero.mask_mut().pointer_move(PointerEvent::new(100.0, 50.0), BOX);
        assert_eq!(hero.mask().center().get(), MaskCenter { cx: 0.0, cy: 0.0 });
        hero.mask_mut().reset();
        assert_eq!(hero.mask().center().get(), MaskCenter::default());
    }
}
