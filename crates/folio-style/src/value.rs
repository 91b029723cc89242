#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::color::Rgba;
use crate::css::format_number;
use crate::error::ParseError;
use crate::gradient::LinearGradient;
use crate::interpolate::{Interpolate, step};
use crate::template::Template;

const GRADIENT_PREFIX: &str = "linear-gradient(";

/// Any interpolatable style value.
///
/// Parsing picks the most specific form: a bare number, then a color, then a
/// `linear-gradient(...)`, and finally a generic [`Template`].
///
/// Values of the same kind blend. A color against a gradient blends as a
/// gradient of the same shape; any other mix steps at 0.5.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum StyleValue {
    Number(f64),
    Color(Rgba),
    Gradient(LinearGradient),
    Template(Template),
}

impl StyleValue {
    /// Parse CSS text.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() {
                return Ok(Self::Number(n));
            }
        }
        if let Ok(color) = Rgba::parse(s) {
            return Ok(Self::Color(color));
        }
        if s
            .get(..GRADIENT_PREFIX.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(GRADIENT_PREFIX))
        {
            return LinearGradient::parse(s).map(Self::Gradient);
        }
        Template::parse(s).map(Self::Template)
    }

    /// The number, if this is a bare number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Short name of the variant, for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Color(_) => "color",
            Self::Gradient(_) => "gradient",
            Self::Template(_) => "template",
        }
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Rgba> for StyleValue {
    fn from(color: Rgba) -> Self {
        Self::Color(color)
    }
}

impl From<LinearGradient> for StyleValue {
    fn from(gradient: LinearGradient) -> Self {
        Self::Gradient(gradient)
    }
}

impl From<Template> for StyleValue {
    fn from(template: Template) -> Self {
        Self::Template(template)
    }
}

impl Interpolate for StyleValue {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        match (from, to) {
            (Self::Number(a), Self::Number(b)) => Self::Number(f64::interpolate(a, b, t)),
            (Self::Color(a), Self::Color(b)) => Self::Color(Rgba::interpolate(a, b, t)),
            (Self::Gradient(a), Self::Gradient(b)) => {
                Self::Gradient(LinearGradient::interpolate(a, b, t))
            }
            (Self::Template(a), Self::Template(b)) => {
                Self::Template(Template::interpolate(a, b, t))
            }
            // A color against a gradient blends as a gradient of that shape.
            (Self::Color(_), Self::Gradient(_)) | (Self::Gradient(_), Self::Color(_))
                if !(t > 0.0 && t < 1.0) =>
            {
                step(from, to, t)
            }
            (Self::Color(c), Self::Gradient(g)) => Self::Gradient(LinearGradient::interpolate(
                &LinearGradient::filled_like(*c, g),
                g,
                t,
            )),
            (Self::Gradient(g), Self::Color(c)) => Self::Gradient(LinearGradient::interpolate(
                g,
                &LinearGradient::filled_like(*c, g),
                t,
            )),
            _ => {
                tracing::trace!(
                    from = from.kind(),
                    to = to.kind(),
                    "mismatched style values; stepping"
                );
                step(from, to, t)
            }
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Color(c) => fmt::Display::fmt(c, f),
            Self::Gradient(g) => fmt::Display::fmt(g, f),
            Self::Template(t) => fmt::Display::fmt(t, f),
        }
    }
}

impl FromStr for StyleValue {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StyleValue {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StyleValue> for String {
    fn from(value: StyleValue) -> Self {
        value.to_string()
    }
}
