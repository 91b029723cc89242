#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Everything here advances only when the host calls [`Animation::tick`] with
//! the elapsed frame time, so animations are deterministic under test.
//!
//! - [`Spring`]: damped spring chasing a target (loader line lengths).
//! - [`Typewriter`]: types, holds, and deletes a rotating list of roles.
//! - [`lerp`] / [`map_range`]: the scalar building blocks used by the style
//!   interpolators.

pub mod spring;
pub mod typewriter;

use std::time::Duration;

pub use spring::Spring;
pub use typewriter::{Typewriter, TypewriterPhase, TypewriterTiming};

use crate::scroll::clamp01;

/// A value that evolves with elapsed time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has nothing left to do.
    fn is_complete(&self) -> bool;

    /// Normalized output in `[0, 1]`.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);
}

/// Linear interpolation between `a` and `b`; `t` is clamped to `[0, 1]` and
/// the endpoints are returned exactly.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let t = clamp01(t);
    if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        a + (b - a) * t
    }
}

/// Map `value` from `input` range onto `output` range, clamped.
///
/// Equivalent to a clamped `useTransform(value, [i0, i1], [o0, o1])`. A zero
/// width input range acts as a step at `i0`.
#[must_use]
pub fn map_range(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    lerp(output.0, output.1, normalize(value, input))
}

/// Position of `value` within `input`, clamped to `[0, 1]`.
#[must_use]
pub fn normalize(value: f64, input: (f64, f64)) -> f64 {
    let (i0, i1) = input;
    let span = i1 - i0;
    if span == 0.0 || !span.is_finite() {
        return if value >= i0 { 1.0 } else { 0.0 };
    }
    clamp01((value - i0) / span)
}
