#![forbid(unsafe_code)]

//! Page background: seeded particles and orbs drifting with page scroll.
//!
//! Unlike the section scenes this one follows the raw page scroll offset,
//! not a normalized progress. Each element moves down at its own speed and
//! breathes with a sine of the scroll offset:
//!
//! ```text
//! translate3d(0, scroll_y · speed px, 0) scale(1 + sin((scroll_y + delay) · freq) · amp)
//! ```
//!
//! Layouts come from [`SeededRng`], so the same seed always yields the same
//! page.

use folio_core::{FrameCoalescer, SeededRng};

use crate::reactive::Observable;
use crate::scenes::{Channel, Scene};

/// Family tags mixed into the seed so particles and orbs differ.
const PARTICLE_FAMILY: u64 = 0x7061_7274;
const ORB_FAMILY: u64 = 0x6f72_6273;

/// Inclusive-exclusive sampling range.
pub type Span = (f64, f64);

/// Sampling ranges for one element family.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRanges {
    pub count: usize,
    pub speed: Span,
    pub delay: Span,
    pub size: Span,
    pub opacity: Span,
    pub hue: Span,
    /// Sine frequency applied to `scroll_y + delay`.
    pub wobble_freq: f64,
    /// Scale amplitude of the sine.
    pub wobble_amp: f64,
}

/// Background layout and parallax parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundConfig {
    pub seed: u64,
    pub particles: FieldRanges,
    pub orbs: FieldRanges,
    /// Grid layer speed.
    pub grid_speed: f64,
    /// Mesh overlay speed.
    pub mesh_speed: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            particles: FieldRanges {
                count: 6,
                speed: (0.002, 0.006),
                delay: (0.0, 3.0),
                size: (1.0, 2.2),
                opacity: (0.03, 0.08),
                hue: (190.0, 230.0),
                wobble_freq: 0.001,
                wobble_amp: 0.1,
            },
            orbs: FieldRanges {
                count: 2,
                speed: (0.0005, 0.0025),
                delay: (0.0, 4.0),
                size: (60.0, 120.0),
                opacity: (0.02, 0.05),
                hue: (200.0, 260.0),
                wobble_freq: 0.0005,
                wobble_amp: 0.03,
            },
            grid_speed: 0.004,
            mesh_speed: 0.001,
        }
    }
}

/// One placed element.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct Element {
    /// Horizontal position, percent of the page width.
    pub left: f64,
    /// Vertical position, percent of the page height.
    pub top: f64,
    pub speed: f64,
    pub delay: f64,
    /// Diameter in px.
    pub size: f64,
    pub opacity: f64,
    pub hue: f64,
}

impl Element {
    fn sample(rng: &mut SeededRng, ranges: &FieldRanges) -> Self {
        Self {
            left: rng.range(0.0, 100.0),
            top: rng.range(0.0, 100.0),
            speed: rng.range(ranges.speed.0, ranges.speed.1),
            delay: rng.range(ranges.delay.0, ranges.delay.1),
            size: rng.range(ranges.size.0, ranges.size.1),
            opacity: rng.range(ranges.opacity.0, ranges.opacity.1),
            hue: rng.range(ranges.hue.0, ranges.hue.1),
        }
    }

    /// Vertical offset and scale at `scroll_y`.
    #[must_use]
    pub fn motion(&self, scroll_y: f64, wobble_freq: f64, wobble_amp: f64) -> (f64, f64) {
        let y = scroll_y * self.speed;
        let scale = 1.0 + ((scroll_y + self.delay) * wobble_freq).sin() * wobble_amp;
        (y, scale)
    }
}

/// Seeded positions for every background element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(serde::Serialize))]
pub struct BackgroundLayout {
    pub seed: u64,
    pub particles: Vec<Element>,
    pub orbs: Vec<Element>,
}

impl BackgroundLayout {
    /// Place every element. Identical configs give identical layouts.
    #[must_use]
    pub fn generate(config: &BackgroundConfig) -> Self {
        let family = |tag: u64, ranges: &FieldRanges| -> Vec<Element> {
            (0..ranges.count as u64)
                .map(|i| {
                    let mut rng = SeededRng::for_index(config.seed ^ tag, i);
                    Element::sample(&mut rng, ranges)
                })
                .collect()
        };
        Self {
            seed: config.seed,
            particles: family(PARTICLE_FAMILY, &config.particles),
            orbs: family(ORB_FAMILY, &config.orbs),
        }
    }
}

/// Transforms for one scroll offset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BackgroundFrame {
    pub scroll_y: f64,
    pub particles: Vec<String>,
    pub orbs: Vec<String>,
    pub grid: String,
    pub mesh: String,
}

fn translate_y(y: f64) -> String {
    format!("translate3d(0, {}px, 0)", folio_style::StyleValue::Number(y))
}

fn translate_scale(y: f64, scale: f64) -> String {
    format!(
        "{} scale({})",
        translate_y(y),
        folio_style::StyleValue::Number(scale)
    )
}

/// Background parallax driven by page scroll.
#[derive(Debug)]
pub struct BackgroundScene {
    config: BackgroundConfig,
    layout: BackgroundLayout,
    frames: FrameCoalescer<f64>,
    frame: Observable<BackgroundFrame>,
}

impl BackgroundScene {
    #[must_use]
    pub fn new(config: BackgroundConfig) -> Self {
        let layout = BackgroundLayout::generate(&config);
        let scene = Self {
            config,
            layout,
            frames: FrameCoalescer::new(),
            frame: Observable::new(BackgroundFrame::default()),
        };
        scene.frame.set(scene.compute(0.0));
        scene
    }

    #[must_use]
    pub fn layout(&self) -> &BackgroundLayout {
        &self.layout
    }

    /// Published frame.
    #[must_use]
    pub fn frame(&self) -> Observable<BackgroundFrame> {
        self.frame.clone()
    }

    /// Page scrolled to `scroll_y`. Returns `true` when the host must
    /// schedule a frame; later offsets in the same frame replace this one.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        let scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
        self.frames.request(scroll_y)
    }

    /// Frame callback: apply the latest scroll offset, if any.
    pub fn on_frame(&mut self) {
        if let Some(scroll_y) = self.frames.on_frame() {
            self.frame.set(self.compute(scroll_y));
        }
    }

    /// Transforms at `scroll_y`.
    #[must_use]
    pub fn compute(&self, scroll_y: f64) -> BackgroundFrame {
        let place = |elements: &[Element], ranges: &FieldRanges| -> Vec<String> {
            elements
                .iter()
                .map(|e| {
                    let (y, scale) = e.motion(scroll_y, ranges.wobble_freq, ranges.wobble_amp);
                    translate_scale(y, scale)
                })
                .collect()
        };
        BackgroundFrame {
            scroll_y,
            particles: place(&self.layout.particles, &self.config.particles),
            orbs: place(&self.layout.orbs, &self.config.orbs),
            grid: translate_y(scroll_y * self.config.grid_speed),
            mesh: translate_y(scroll_y * self.config.mesh_speed),
        }
    }
}

impl Scene for BackgroundScene {
    fn name(&self) -> &'static str {
        "background"
    }

    fn channels(&self) -> Vec<Channel> {
        let frame = self.frame.get();
        let mut out = Vec::with_capacity(frame.particles.len() + frame.orbs.len() + 2);
        out.extend(
            frame
                .particles
                .into_iter()
                .enumerate()
                .map(|(i, css)| Channel::new(format!("particle{i}.transform"), css)),
        );
        out.extend(
            frame
                .orbs
                .into_iter()
                .enumerate()
                .map(|(i, css)| Channel::new(format!("orb{i}.transform"), css)),
        );
        out.push(Channel::new("grid.transform", frame.grid));
        out.push(Channel::new("mesh.transform", frame.mesh));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_deterministic_per_seed() {
        let config = BackgroundConfig::default();
        let a = BackgroundLayout::generate(&config);
        let b = BackgroundLayout::generate(&config);
        assert_eq!(a, b);
        assert_eq!(a.particles.len(), 6);
        assert_eq!(a.orbs.len(), 2);

        let other = BackgroundLayout::generate(&BackgroundConfig {
            seed: 2,
            ..config
        });
        assert_ne!(a.particles, other.particles);
    }

    #[test]
    fn sampled_fields_respect_ranges() {
        let config = BackgroundConfig::default();
        let layout = BackgroundLayout::generate(&config);
        for p in &layout.particles {
            assert!((0.0..100.0).contains(&p.left));
            assert!((0.0..100.0).contains(&p.top));
            assert!((0.002..0.006).contains(&p.speed));
            assert!((1.0..2.2).contains(&p.size));
            assert!((190.0..230.0).contains(&p.hue));
        }
        for o in &layout.orbs {
            assert!((60.0..120.0).contains(&o.size));
            assert!((0.0005..0.0025).contains(&o.speed));
        }
    }

    #[test]
    fn element_motion_matches_formula() {
        let e = Element {
            left: 0.0,
            top: 0.0,
            speed: 0.004,
            delay: 2.0,
            size: 1.0,
            opacity: 0.05,
            hue: 200.0,
        };
        let (y, scale) = e.motion(1000.0, 0.001, 0.1);
        assert_eq!(y, 4.0);
        assert!((scale - (1.0 + (1.002f64).sin() * 0.1)).abs() < 1e-12);
    }

    #[test]
    fn at_rest_every_layer_is_untranslated() {
        let scene = BackgroundScene::new(BackgroundConfig::default());
        let frame = scene.frame().get();
        assert_eq!(frame.grid, "translate3d(0, 0px, 0)");
        assert_eq!(frame.mesh, "translate3d(0, 0px, 0)");
        assert!(frame.particles.iter().all(|t| t.starts_with("translate3d(0, 0px, 0) scale(")));
    }

    #[test]
    fn scroll_offsets_coalesce_per_frame() {
        let mut scene = BackgroundScene::new(BackgroundConfig::default());
        assert!(scene.on_scroll(100.0));
        assert!(!scene.on_scroll(250.0));
        assert!(!scene.on_scroll(500.0));
        scene.on_frame();
        let frame = scene.frame().get();
        assert_eq!(frame.scroll_y, 500.0);
        assert_eq!(frame.grid, "translate3d(0, 2px, 0)");
        assert_eq!(frame.mesh, "translate3d(0, 0.5px, 0)");
    }

    #[test]
    fn channels_list_every_layer() {
        let scene = BackgroundScene::new(BackgroundConfig::default());
        let channels = scene.channels();
        assert_eq!(channels.len(), 6 + 2 + 2);
        assert_eq!(channels[0].name, "particle0.transform");
        assert_eq!(channels[6].name, "orb0.transform");
        assert_eq!(channels[9].name, "mesh.transform");
    }
}
