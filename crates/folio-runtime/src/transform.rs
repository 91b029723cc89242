#![forbid(unsafe_code)]

//! Progress-to-style range transforms.
//!
//! A [`MotionTransform`] is the clamped map
//! `progress ∈ [a, b] → style ∈ [from, to]`: below `a` it yields `from`,
//! above `b` it yields `to`, and in between it interpolates.

use folio_core::animation::normalize;
use folio_style::{Interpolate, ParseError, StyleValue};

use crate::reactive::{Derived, Observable};

/// Maps a progress range onto a pair of style values.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionTransform {
    input: (f64, f64),
    from: StyleValue,
    to: StyleValue,
}

impl MotionTransform {
    /// Transform over the full `[0, 1]` progress range.
    #[must_use]
    pub fn new(from: impl Into<StyleValue>, to: impl Into<StyleValue>) -> Self {
        Self {
            input: (0.0, 1.0),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse both endpoints from CSS text.
    pub fn parse(from: &str, to: &str) -> Result<Self, ParseError> {
        Ok(Self::new(StyleValue::parse(from)?, StyleValue::parse(to)?))
    }

    /// Restrict the input range (builder).
    #[must_use]
    pub fn over(mut self, start: f64, end: f64) -> Self {
        self.input = (start, end);
        self
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> (f64, f64) {
        self.input
    }

    /// Values at the start and end of the input range.
    #[must_use]
    pub fn endpoints(&self) -> (&StyleValue, &StyleValue) {
        (&self.from, &self.to)
    }

    /// Style value at `progress`.
    #[must_use]
    pub fn apply(&self, progress: f64) -> StyleValue {
        let t = normalize(progress, self.input);
        StyleValue::interpolate(&self.from, &self.to, t)
    }

    /// Follow `progress`, producing a derived style channel.
    pub fn bind(&self, progress: &Observable<f64>) -> Derived<StyleValue> {
        let transform = self.clone();
        progress.map(move |p| transform.apply(*p))
    }
}
