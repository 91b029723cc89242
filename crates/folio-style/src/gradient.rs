#![forbid(unsafe_code)]

//! `linear-gradient(...)` values.
//!
//! # Invariants
//!
//! 1. A gradient has at least two stops.
//! 2. Two gradients with the same stop count blend angle, stop colors, and
//!    stop positions independently. Stops without an explicit position take
//!    the position CSS would give them before blending.
//! 3. Gradients with different stop counts [`step`](crate::step) at 0.5.

use std::fmt;
use std::str::FromStr;

use folio_core::animation::lerp;
use folio_core::clamp01;

use crate::color::Rgba;
use crate::css::{format_number, function_body, split_top_level};
use crate::error::ParseError;
use crate::interpolate::{Interpolate, step};

/// Default angle when none is given (`to bottom`).
const DEFAULT_ANGLE: f64 = 180.0;

/// One color stop, with an optional position in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgba,
    pub position: Option<f64>,
}

impl ColorStop {
    #[must_use]
    pub const fn new(color: Rgba) -> Self {
        Self {
            color,
            position: None,
        }
    }

    #[must_use]
    pub const fn at(color: Rgba, position: f64) -> Self {
        Self {
            color,
            position: Some(position),
        }
    }
}

/// A CSS linear gradient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct LinearGradient {
    angle: f64,
    stops: Vec<ColorStop>,
}

impl LinearGradient {
    /// Create a gradient. Returns `None` with fewer than two stops.
    #[must_use]
    pub fn new(angle: f64, stops: Vec<ColorStop>) -> Option<Self> {
        (stops.len() >= 2 && angle.is_finite()).then_some(Self { angle, stops })
    }

    /// Two-stop gradient at `angle` degrees.
    #[must_use]
    pub fn between(angle: f64, from: Rgba, to: Rgba) -> Self {
        Self {
            angle: if angle.is_finite() { angle } else { DEFAULT_ANGLE },
            stops: vec![ColorStop::new(from), ColorStop::new(to)],
        }
    }

    /// Append a stop (builder).
    #[must_use]
    pub fn with_stop(mut self, stop: ColorStop) -> Self {
        self.stops.push(stop);
        self
    }

    /// A gradient with `shape`'s angle and stops, every stop painted `color`.
    ///
    /// A fully transparent `color` keeps each stop's RGB, so blending toward
    /// `shape` fades opacity in without passing through black.
    #[must_use]
    pub fn filled_like(color: Rgba, shape: &Self) -> Self {
        let stops = shape
            .stops
            .iter()
            .map(|stop| ColorStop {
                color: if color.a <= 0.0 {
                    stop.color.with_alpha(0.0)
                } else {
                    color
                },
                position: stop.position,
            })
            .collect();
        Self {
            angle: shape.angle,
            stops,
        }
    }

    /// Angle in degrees.
    #[inline]
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    #[must_use]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Parse `linear-gradient(<angle>?, <stop>, <stop>, ...)`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let body = function_body(input, "linear-gradient")
            .ok_or_else(|| ParseError::gradient(input, "expected linear-gradient(...)"))?;
        let mut args: Vec<&str> = split_top_level(body, b',')
            .into_iter()
            .map(str::trim)
            .collect();

        let mut angle = DEFAULT_ANGLE;
        if let Some(first) = args.first() {
            if let Some(parsed) = parse_angle(first) {
                angle = parsed;
                args.remove(0);
            }
        }

        let stops = args
            .iter()
            .map(|arg| parse_stop(arg).ok_or_else(|| ParseError::gradient(input, "invalid color stop")))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(angle, stops).ok_or_else(|| ParseError::gradient(input, "needs at least two stops"))
    }

    /// Stop positions with the implicit ones filled in: first 0, last 100,
    /// unpositioned runs spaced evenly between their neighbors.
    #[must_use]
    pub fn resolved_positions(&self) -> Vec<f64> {
        let n = self.stops.len();
        let mut known: Vec<Option<f64>> = self.stops.iter().map(|s| s.position).collect();
        if let Some(first) = known.first_mut() {
            first.get_or_insert(0.0);
        }
        if let Some(last) = known.last_mut() {
            last.get_or_insert(100.0);
        }

        let mut out = vec![0.0; n];
        let mut prev = 0;
        for i in 0..n {
            let Some(pos) = known[i] else { continue };
            out[i] = pos;
            let gap = i - prev;
            if gap > 1 {
                let from = out[prev];
                for (k, slot) in out.iter_mut().enumerate().take(i).skip(prev + 1) {
                    let frac = (k - prev) as f64 / gap as f64;
                    *slot = from + (pos - from) * frac;
                }
            }
            prev = i;
        }
        out
    }
}

fn parse_angle(text: &str) -> Option<f64> {
    let lower = text.to_ascii_lowercase();
    if let Some(side) = lower.strip_prefix("to ") {
        return match side.trim() {
            "top" => Some(0.0),
            "right" => Some(90.0),
            "bottom" => Some(180.0),
            "left" => Some(270.0),
            "top right" | "right top" => Some(45.0),
            "bottom right" | "right bottom" => Some(135.0),
            "bottom left" | "left bottom" => Some(225.0),
            "top left" | "left top" => Some(315.0),
            _ => None,
        };
    }
    let (digits, scale) = if let Some(d) = lower.strip_suffix("deg") {
        (d, 1.0)
    } else if let Some(d) = lower.strip_suffix("turn") {
        (d, 360.0)
    } else if let Some(d) = lower.strip_suffix("rad") {
        (d, 180.0 / std::f64::consts::PI)
    } else {
        return None;
    };
    let value: f64 = digits.trim().parse().ok()?;
    let degrees = value * scale;
    degrees.is_finite().then_some(degrees)
}

fn parse_stop(text: &str) -> Option<ColorStop> {
    let (color_text, rest) = match text.find(')') {
        Some(close) => text.split_at(close + 1),
        None => match text.find(char::is_whitespace) {
            Some(space) => text.split_at(space),
            None => (text, ""),
        },
    };
    let color = Rgba::parse(color_text).ok()?;
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(ColorStop::new(color));
    }
    let position: f64 = rest.strip_suffix('%')?.trim().parse().ok()?;
    position.is_finite().then_some(ColorStop::at(color, position))
}

impl Interpolate for LinearGradient {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let t = clamp01(t);
        if t <= 0.0 {
            return from.clone();
        }
        if t >= 1.0 {
            return to.clone();
        }
        if from.stops.len() != to.stops.len() {
            tracing::trace!(
                from = from.stops.len(),
                to = to.stops.len(),
                "gradient stop counts differ; stepping"
            );
            return step(from, to, t);
        }
        let from_pos = from.resolved_positions();
        let to_pos = to.resolved_positions();
        let stops = from
            .stops
            .iter()
            .zip(&to.stops)
            .enumerate()
            .map(|(i, (a, b))| ColorStop {
                color: a.color.lerp(b.color, t),
                position: match (a.position, b.position) {
                    (None, None) => None,
                    _ => Some(lerp(from_pos[i], to_pos[i], t)),
                },
            })
            .collect();
        Self {
            angle: lerp(from.angle, to.angle, t),
            stops,
        }
    }
}

impl fmt::Display for LinearGradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "linear-gradient({}deg", format_number(self.angle))?;
        for stop in &self.stops {
            write!(f, ", {}", stop.color)?;
            if let Some(pos) = stop.position {
                write!(f, " {}%", format_number(pos))?;
            }
        }
        f.write_str(")")
    }
}

impl FromStr for LinearGradient {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LinearGradient {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LinearGradient> for String {
    fn from(gradient: LinearGradient) -> Self {
        gradient.to_string()
    }
}
