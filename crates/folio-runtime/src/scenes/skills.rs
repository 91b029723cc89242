#![forbid(unsafe_code)]

//! Skills marquee: horizontal lanes drifting with scroll progress.
//!
//! Lane `i` with amplitude `A` sits at `sign · (p·A − A/2)` px, where `sign`
//! alternates `+, −, +, …` so neighbouring lanes move in opposite
//! directions. At `p = 0.5` every lane is centered.
//!
//! Badges also lean toward the pointer: the magnetic offset is the pointer's
//! distance from the window centre times a small multiplier. Pointer moves
//! are coalesced so the offset is recomputed at most once per frame, from the
//! latest pointer position.

use folio_core::{FrameCoalescer, PointerEvent};
use folio_style::StyleValue;

use crate::reactive::{Derived, Observable};
use crate::scenes::{Channel, Scene};
use crate::transform::MotionTransform;

/// Default magnetic pull per px of pointer distance from the window centre.
pub const DEFAULT_MAGNETIC_MULTIPLIER: f64 = 0.003;

/// Transform published while the window size is unknown.
const MAGNETIC_REST: &str = "translate3d(0, 0, 0)";

/// Lane amplitudes in px and the badges' magnetic pull.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeConfig {
    pub amplitudes: Vec<f64>,
    pub magnetic_multiplier: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            amplitudes: vec![450.0, 380.0, 420.0, 400.0, 460.0, 350.0],
            magnetic_multiplier: DEFAULT_MAGNETIC_MULTIPLIER,
        }
    }
}

/// Horizontal offset of lane `index` at `progress`.
#[must_use]
pub fn lane_offset(index: usize, amplitude: f64, progress: f64) -> f64 {
    let sign = if index % 2 == 0 { 1.0 } else { -1.0 };
    sign * (folio_core::clamp01(progress) * amplitude - amplitude / 2.0)
}

/// Badge transform for `pointer` in a `width` x `height` window.
///
/// A window with no width (not yet measured) gives the rest transform.
#[must_use]
pub fn magnetic_transform(
    pointer: PointerEvent,
    width: f64,
    height: f64,
    multiplier: f64,
) -> String {
    if width == 0.0 || !width.is_finite() || !height.is_finite() {
        return MAGNETIC_REST.to_owned();
    }
    let x = (pointer.client_x - width / 2.0) * multiplier;
    let y = (pointer.client_y - height / 2.0) * multiplier;
    format!(
        "translate3d({}px, {}px, 0)",
        StyleValue::Number(x),
        StyleValue::Number(y)
    )
}

/// The marquee's lane transforms, bound to one progress observable, plus the
/// pointer-driven badge transform.
#[derive(Debug)]
pub struct SkillsMarquee {
    amplitudes: Vec<f64>,
    /// Offsets in px.
    lanes: Vec<Derived<StyleValue>>,
    multiplier: f64,
    window: (f64, f64),
    pointer: PointerEvent,
    moves: FrameCoalescer<PointerEvent>,
    magnetic: Observable<String>,
}

impl SkillsMarquee {
    /// Bind one transform per configured lane to `progress`.
    #[must_use]
    pub fn new(progress: &Observable<f64>, config: &MarqueeConfig) -> Self {
        let lanes = config
            .amplitudes
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                MotionTransform::new(lane_offset(i, a, 0.0), lane_offset(i, a, 1.0))
                    .bind(progress)
            })
            .collect();
        Self {
            amplitudes: config.amplitudes.clone(),
            lanes,
            multiplier: config.magnetic_multiplier,
            window: (0.0, 0.0),
            pointer: PointerEvent::default(),
            moves: FrameCoalescer::new(),
            magnetic: Observable::new(MAGNETIC_REST.to_owned()),
        }
    }

    /// Window resized (or first measured). Republishes immediately.
    pub fn set_window(&mut self, width: f64, height: f64) {
        self.window = (width, height);
        self.publish_magnetic();
    }

    /// Pointer moved. Returns `true` when the host must schedule a frame.
    pub fn pointer_move(&mut self, pointer: PointerEvent) -> bool {
        self.moves.request(pointer)
    }

    /// Frame callback. Applies the latest pending pointer, if any.
    pub fn on_frame(&mut self) -> bool {
        let Some(pointer) = self.moves.on_frame() else {
            return false;
        };
        self.pointer = pointer;
        self.publish_magnetic();
        true
    }

    /// Current badge transform.
    #[must_use]
    pub fn magnetic(&self) -> Observable<String> {
        self.magnetic.clone()
    }

    fn publish_magnetic(&self) {
        let (width, height) = self.window;
        self.magnetic
            .set(magnetic_transform(self.pointer, width, height, self.multiplier));
    }

    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    #[must_use]
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Current offset of lane `index` in px.
    #[must_use]
    pub fn lane_offset(&self, index: usize) -> Option<f64> {
        self.lanes.get(index).and_then(|lane| lane.get().as_number())
    }

    /// Current transform of lane `index`.
    #[must_use]
    pub fn lane_transform(&self, index: usize) -> Option<String> {
        self.lanes
            .get(index)
            .map(|lane| format!("translate3d({}px, 0, 0)", lane.get()))
    }
}

impl Scene for SkillsMarquee {
    fn name(&self) -> &'static str {
        "skills"
    }

    fn channels(&self) -> Vec<Channel> {
        let mut out: Vec<Channel> = self
            .lanes
            .iter()
            .enumerate()
            .map(|(i, lane)| {
                Channel::new(
                    format!("lane{i}.transform"),
                    format!("translate3d({}px, 0, 0)", lane.get()),
                )
            })
            .collect();
        out.push(Channel::new("badges.transform", self.magnetic.get()));
        out
    }
}
