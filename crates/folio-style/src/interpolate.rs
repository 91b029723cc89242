#![forbid(unsafe_code)]

//! The interpolation contract.
//!
//! # Invariants
//!
//! 1. `t` is clamped to `[0, 1]`; NaN counts as 0.
//! 2. `interpolate(a, b, 0) == a` and `interpolate(a, b, 1) == b` exactly.
//! 3. Values that cannot be blended (mismatched structure) switch from `a`
//!    to `b` at `t = 0.5`; see [`step`].

use folio_core::clamp01;
use folio_core::animation::lerp;

/// A value that can be blended between two endpoints.
pub trait Interpolate: Clone {
    /// The value a fraction `t` of the way from `from` to `to`.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        lerp(*from, *to, t)
    }
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        lerp(f64::from(*from), f64::from(*to), t) as f32
    }
}

/// Discrete interpolation: `from` below the midpoint, `to` from it on.
#[must_use]
pub fn step<T: Clone>(from: &T, to: &T, t: f64) -> T {
    if clamp01(t) < 0.5 {
        from.clone()
    } else {
        to.clone()
    }
}
