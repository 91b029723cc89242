#![forbid(unsafe_code)]

//! Scroll-through progress and smoothing.
//!
//! Progress describes how far an element has travelled through the viewport,
//! independent of its height or starting offset:
//!
//! ```text
//! progress = clamp01((viewport_height - top) / (viewport_height + height))
//! ```
//!
//! which is 0 while the element's top sits at the bottom edge of the viewport
//! and 1 once its bottom has passed the top edge.
//!
//! # Invariants
//!
//! 1. Progress is always finite and within `[0, 1]`; NaN becomes 0.
//! 2. For fixed height and viewport, progress is non-increasing in `top`.
//! 3. [`ScrollOffsets::default()`] reproduces [`scroll_progress`] exactly.
//! 4. A [`Smoother`] fed a constant input converges geometrically with ratio
//!    `1 - factor`.

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
#[must_use]
pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Live measurements of one observed element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollMeasure {
    /// Element top relative to the viewport top.
    pub top: f64,
    /// Element height.
    pub height: f64,
    /// Viewport height.
    pub viewport_height: f64,
}

impl ScrollMeasure {
    /// Create a measurement.
    #[must_use]
    pub const fn new(top: f64, height: f64, viewport_height: f64) -> Self {
        Self {
            top,
            height,
            viewport_height,
        }
    }

    /// The same element scrolled so its top sits at `top`.
    #[must_use]
    pub const fn with_top(self, top: f64) -> Self {
        Self { top, ..self }
    }

    fn is_usable(&self) -> bool {
        self.top.is_finite()
            && self.height.is_finite()
            && self.viewport_height.is_finite()
            && self.viewport_height > 0.0
    }
}

/// Normalized scroll-through progress of an element.
#[must_use]
pub fn scroll_progress(measure: ScrollMeasure) -> f64 {
    if !measure.is_usable() {
        return 0.0;
    }
    let height = measure.height.max(0.0);
    let span = measure.viewport_height + height;
    if span <= 0.0 {
        return 0.0;
    }
    clamp01((measure.viewport_height - measure.top) / span)
}

/// A point where an element edge meets a viewport line.
///
/// Both fractions are relative: `element = 0.0` is the element's start (top),
/// `1.0` its end; `viewport = 0.0` is the viewport top, `1.0` its bottom.
/// `"start 50%"` is `ScrollAnchor::new(0.0, 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub element: f64,
    pub viewport: f64,
}

impl ScrollAnchor {
    #[must_use]
    pub const fn new(element: f64, viewport: f64) -> Self {
        Self { element, viewport }
    }

    /// The element `top` at which this anchor is reached.
    fn top_at(&self, height: f64, viewport_height: f64) -> f64 {
        self.viewport * viewport_height - self.element * height
    }
}

/// Anchors for progress 0 and progress 1.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollOffsets {
    pub start: ScrollAnchor,
    pub end: ScrollAnchor,
}

impl Default for ScrollOffsets {
    /// `"start end"` to `"end start"`: the full pass through the viewport.
    fn default() -> Self {
        Self {
            start: ScrollAnchor::new(0.0, 1.0),
            end: ScrollAnchor::new(1.0, 0.0),
        }
    }
}

impl ScrollOffsets {
    /// Create offsets from two anchors.
    #[must_use]
    pub const fn new(start: ScrollAnchor, end: ScrollAnchor) -> Self {
        Self { start, end }
    }

    /// `"start 50%"` to `"end 80%"`, used by the experience timeline.
    #[must_use]
    pub const fn timeline() -> Self {
        Self::new(ScrollAnchor::new(0.0, 0.5), ScrollAnchor::new(1.0, 0.8))
    }

    /// Progress of `measure` between the two anchors.
    ///
    /// Anchors that do not advance as the page scrolls down (end reached at
    /// or below the start, as for a timeline shorter than the gap between its
    /// anchors) act as a step: 1 once `top` has reached the later of the two
    /// anchor lines, else 0.
    #[must_use]
    pub fn progress(&self, measure: ScrollMeasure) -> f64 {
        if !measure.is_usable() {
            return 0.0;
        }
        let height = measure.height.max(0.0);
        let start_top = self.start.top_at(height, measure.viewport_height);
        let end_top = self.end.top_at(height, measure.viewport_height);
        let span = start_top - end_top;
        if span.is_nan() {
            return 0.0;
        }
        if span <= 0.0 {
            return if measure.top <= start_top.max(end_top) {
                1.0
            } else {
                0.0
            };
        }
        clamp01((start_top - measure.top) / span)
    }
}

/// Default blend factor per frame.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.15;

/// Smallest accepted blend factor; smaller values never visibly move.
const MIN_SMOOTHING_FACTOR: f64 = 1e-4;

/// Running exponential smoother for per-frame progress.
///
/// Each [`update`](Smoother::update) moves the smoothed value a fixed
/// fraction of the way toward the latest raw value. Owned by one observing
/// component; [`reset`](Smoother::reset) when that component unmounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Smoother {
    value: f64,
    factor: f64,
}

impl Default for Smoother {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_FACTOR)
    }
}

impl Smoother {
    /// Create a smoother starting at 0. `factor` is clamped into `(0, 1]`.
    #[must_use]
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_nan() {
            DEFAULT_SMOOTHING_FACTOR
        } else {
            factor.clamp(MIN_SMOOTHING_FACTOR, 1.0)
        };
        Self { value: 0.0, factor }
    }

    /// Start from `value` instead of 0.
    #[must_use]
    pub fn starting_at(mut self, value: f64) -> Self {
        self.value = if value.is_finite() { value } else { 0.0 };
        self
    }

    /// Current smoothed value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Blend factor.
    #[inline]
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Blend one frame toward `raw` and return the new value.
    ///
    /// Non-finite input is treated as 0.
    pub fn update(&mut self, raw: f64) -> f64 {
        let raw = if raw.is_finite() { raw } else { 0.0 };
        self.value += (raw - self.value) * self.factor;
        if !self.value.is_finite() {
            self.value = 0.0;
        }
        tracing::trace!(raw, smoothed = self.value, "smoothing step");
        self.value
    }

    /// Whether the smoothed value is within `epsilon` of `target`.
    #[must_use]
    pub fn is_settled(&self, target: f64, epsilon: f64) -> bool {
        (self.value - target).abs() < epsilon
    }

    /// Jump straight to `value`.
    pub fn reset(&mut self, value: f64) {
        self.value = if value.is_finite() { value } else { 0.0 };
    }
}

/// Updates needed for a smoother with blend `factor` to close a unit gap to
/// within `epsilon`: `ceil(ln(epsilon) / ln(1 - factor))`.
///
/// Returns 1 for `factor >= 1` (a single update lands exactly) and 0 when
/// `epsilon >= 1`.
#[must_use]
pub fn steps_to_converge(epsilon: f64, factor: f64) -> u32 {
    if epsilon.is_nan() || epsilon >= 1.0 {
        return 0;
    }
    if factor >= 1.0 {
        return 1;
    }
    let factor = factor.max(MIN_SMOOTHING_FACTOR);
    let epsilon = epsilon.max(f64::MIN_POSITIVE);
    let steps = (epsilon.ln() / (1.0 - factor).ln()).ceil();
    if steps.is_finite() && steps > 0.0 {
        steps.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V: f64 = 800.0;
    const H: f64 = 1200.0;

    #[test]
    fn progress_is_zero_when_top_at_viewport_bottom() {
        assert_eq!(scroll_progress(ScrollMeasure::new(V, H, V)), 0.0);
    }

    #[test]
    fn progress_is_one_when_element_scrolled_past() {
        assert_eq!(scroll_progress(ScrollMeasure::new(-H, H, V)), 1.0);
        assert_eq!(scroll_progress(ScrollMeasure::new(-H - 500.0, H, V)), 1.0);
    }

    #[test]
    fn progress_midway() {
        // (800 - (-200)) / 2000
        let p = scroll_progress(ScrollMeasure::new(-200.0, H, V));
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn progress_below_viewport_clamps_to_zero() {
        assert_eq!(scroll_progress(ScrollMeasure::new(5_000.0, H, V)), 0.0);
    }

    #[test]
    fn progress_degenerate_inputs_are_zero() {
        assert_eq!(scroll_progress(ScrollMeasure::new(0.0, H, 0.0)), 0.0);
        assert_eq!(scroll_progress(ScrollMeasure::new(0.0, H, -10.0)), 0.0);
        assert_eq!(scroll_progress(ScrollMeasure::new(f64::NAN, H, V)), 0.0);
        assert_eq!(scroll_progress(ScrollMeasure::new(0.0, f64::INFINITY, V)), 0.0);
    }

    #[test]
    fn negative_height_treated_as_zero() {
        let a = scroll_progress(ScrollMeasure::new(400.0, -50.0, V));
        let b = scroll_progress(ScrollMeasure::new(400.0, 0.0, V));
        assert_eq!(a, b);
    }

    #[test]
    fn default_offsets_match_scroll_progress() {
        let offsets = ScrollOffsets::default();
        for top in [-2_000.0, -H, -300.0, 0.0, 123.0, V, 3_000.0] {
            let m = ScrollMeasure::new(top, H, V);
            assert!((offsets.progress(m) - scroll_progress(m)).abs() < 1e-12, "top={top}");
        }
    }

    #[test]
    fn timeline_offsets_anchor_points() {
        let offsets = ScrollOffsets::timeline();
        // start 50%: element top at half the viewport.
        assert_eq!(offsets.progress(ScrollMeasure::new(400.0, H, V)), 0.0);
        // end 80%: element bottom at 80% of the viewport => top = 640 - 1200.
        let p = offsets.progress(ScrollMeasure::new(640.0 - H, H, V));
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn offsets_that_never_advance_step() {
        // start_top = 0, end_top = 800: the step sits at the later line.
        let offsets = ScrollOffsets::new(ScrollAnchor::new(0.0, 0.0), ScrollAnchor::new(0.0, 1.0));
        assert_eq!(offsets.progress(ScrollMeasure::new(900.0, H, V)), 0.0);
        assert_eq!(offsets.progress(ScrollMeasure::new(800.0, H, V)), 1.0);
        assert_eq!(offsets.progress(ScrollMeasure::new(100.0, H, V)), 1.0);
    }

    #[test]
    fn short_timeline_completes_once_scrolled_past() {
        // H < 0.3 V: start_top = 400, end_top = 640 - 200 = 440.
        let offsets = ScrollOffsets::timeline();
        assert_eq!(offsets.progress(ScrollMeasure::new(1_000.0, 200.0, V)), 0.0);
        assert_eq!(offsets.progress(ScrollMeasure::new(441.0, 200.0, V)), 0.0);
        assert_eq!(offsets.progress(ScrollMeasure::new(440.0, 200.0, V)), 1.0);
        assert_eq!(offsets.progress(ScrollMeasure::new(-10_000.0, 200.0, V)), 1.0);
    }

    #[test]
    fn smoother_blends_by_factor() {
        let mut s = Smoother::new(0.15);
        let v = s.update(1.0);
        assert!((v - 0.15).abs() < 1e-12);
        let v = s.update(1.0);
        assert!((v - 0.2775).abs() < 1e-12);
    }

    #[test]
    fn smoother_converges_within_bound() {
        for eps in [1e-2, 1e-3, 1e-6] {
            let mut s = Smoother::new(0.15);
            for _ in 0..steps_to_converge(eps, 0.15) {
                s.update(1.0);
            }
            assert!(s.is_settled(1.0, eps), "eps={eps} value={}", s.value());
        }
    }

    #[test]
    fn steps_to_converge_known_values() {
        assert_eq!(steps_to_converge(1e-3, 0.15), 43);
        assert_eq!(steps_to_converge(1e-6, 0.15), 86);
        assert_eq!(steps_to_converge(0.5, 1.0), 1);
        assert_eq!(steps_to_converge(1.0, 0.15), 0);
    }

    #[test]
    fn smoother_factor_is_clamped() {
        assert_eq!(Smoother::new(2.0).factor(), 1.0);
        assert_eq!(Smoother::new(-1.0).factor(), MIN_SMOOTHING_FACTOR);
        assert_eq!(Smoother::new(f64::NAN).factor(), DEFAULT_SMOOTHING_FACTOR);
    }

    #[test]
    fn smoother_nan_input_treated_as_zero() {
        let mut s = Smoother::new(0.5).starting_at(1.0);
        assert_eq!(s.update(f64::NAN), 0.5);
    }

    #[test]
    fn smoother_reset() {
        let mut s = Smoother::default().starting_at(0.4);
        s.reset(0.9);
        assert_eq!(s.value(), 0.9);
        s.reset(f64::INFINITY);
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn clamp01_handles_nan() {
        assert_eq!(clamp01(f64::NAN), 0.0);
        assert_eq!(clamp01(-3.0), 0.0);
        assert_eq!(clamp01(7.0), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
    }
}
