#![forbid(unsafe_code)]

//! CSS colors.
//!
//! Accepted forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
//! `rgba(r, g, b, a)` (commas, spaces, or `/` as separators, channels as
//! numbers or percentages) and `transparent`. Colors print as `rgb(...)` when
//! opaque and `rgba(...)` otherwise.

use std::fmt;
use std::str::FromStr;

use folio_core::animation::lerp;

use crate::css::{format_number, function_body};
use crate::error::ParseError;
use crate::interpolate::Interpolate;

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f64,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color with alpha. Callers passing a literal are trusted to keep it in
    /// range; use [`Rgba::with_alpha`] to clamp.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha clamped to `[0, 1]` (NaN becomes 0).
    #[must_use]
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: folio_core::clamp01(a),
            ..self
        }
    }

    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    /// Parse CSS color text.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let parsed = if let Some(hex) = s.strip_prefix('#') {
            parse_hex(hex)
        } else {
            function_body(s, "rgba")
                .or_else(|| function_body(s, "rgb"))
                .and_then(parse_channels)
        };
        parsed.ok_or_else(|| ParseError::color(input))
    }

    /// Per-channel blend. RGB channels round to the nearest integer.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| lerp(f64::from(a), f64::from(b), t).round() as u8;
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: lerp(self.a, other.a, t),
        }
    }
}

impl Interpolate for Rgba {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from.lerp(*to, t)
    }
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Rgba::rgba(r, g, b, f64::from(a) / 255.0))
}

fn parse_channels(body: &str) -> Option<Rgba> {
    let parts: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    match parts.as_slice() {
        [r, g, b] => Some(Rgba::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => Some(Rgba::rgba(channel(r)?, channel(g)?, channel(b)?, alpha(a)?)),
        _ => None,
    }
}

fn number(text: &str) -> Option<(f64, bool)> {
    let (digits, percent) = match text.strip_suffix('%') {
        Some(d) => (d, true),
        None => (text, false),
    };
    let value: f64 = digits.parse().ok()?;
    value.is_finite().then_some((value, percent))
}

fn channel(text: &str) -> Option<u8> {
    let (value, percent) = number(text)?;
    let value = if percent { value * 2.55 } else { value };
    Some(value.round().clamp(0.0, 255.0) as u8)
}

fn alpha(text: &str) -> Option<f64> {
    let (value, percent) = number(text)?;
    let value = if percent { value / 100.0 } else { value };
    Some(value.clamp(0.0, 1.0))
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                format_number(self.a)
            )
        }
    }
}

impl FromStr for Rgba {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_function_forms() {
        assert_eq!(
            Rgba::parse("rgba(255,255,255,0.1)"),
            Ok(Rgba::rgba(255, 255, 255, 0.1))
        );
        assert_eq!(Rgba::parse("rgb(59, 130, 246)"), Ok(Rgba::rgb(59, 130, 246)));
        assert_eq!(
            Rgba::parse("rgb(59 130 246 / 50%)"),
            Ok(Rgba::rgba(59, 130, 246, 0.5))
        );
        assert_eq!(Rgba::parse("RGB(100%, 0%, 0%)"), Ok(Rgba::rgb(255, 0, 0)));
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::parse("#3b82f6"), Ok(Rgba::rgb(59, 130, 246)));
        assert_eq!(Rgba::parse("#fff"), Ok(Rgba::WHITE));
        assert_eq!(Rgba::parse("#00000000"), Ok(Rgba::TRANSPARENT));
        assert_eq!(Rgba::parse("#f008").map(|c| c.r), Ok(255));
    }

    #[test]
    fn out_of_range_channels_clamp() {
        assert_eq!(Rgba::parse("rgba(300, -4, 12.6, 2)"), Ok(Rgba::rgba(255, 0, 13, 1.0)));
    }

    #[test]
    fn rejects_malformed_colors() {
        for bad in ["", "#12", "#ggg", "rgb(1, 2)", "rgb(1, 2, 3", "hsl(0, 0%, 0%)", "rgb(a, b, c)"] {
            let err = Rgba::parse(bad).unwrap_err();
            assert_eq!(err, ParseError::color(bad), "{bad}");
        }
    }

    #[test]
    fn formats_as_css() {
        assert_eq!(Rgba::rgb(59, 130, 246).to_string(), "rgb(59, 130, 246)");
        assert_eq!(
            Rgba::rgba(34, 211, 238, 0.3).to_string(),
            "rgba(34, 211, 238, 0.3)"
        );
        assert_eq!(Rgba::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn lerp_blends_channels_independently() {
        let from = Rgba::rgba(255, 255, 255, 0.1);
        let to = Rgba::rgba(59, 130, 246, 0.3);
        let mid = from.lerp(to, 0.5);
        assert_eq!((mid.r, mid.g, mid.b), (157, 193, 251));
        assert!((mid.a - 0.2).abs() < 1e-12);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgba::WHITE.with_alpha(1.5).a, 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(f64::NAN).a, 0.0);
    }
}
