#![forbid(unsafe_code)]

//! Strings with embedded numbers and colors.
//!
//! A template is any CSS text, such as `translate3d(-225px, 0, 0)` or
//! `0 0 20px rgba(59,130,246,0.6), 0 0 40px rgba(34,211,238,0.3)`, split
//! into literal text, numbers, and colors. Two templates with the same shape
//! (same literal text in the same places) blend number by number and color by
//! color; anything else switches at the midpoint.
//!
//! Digits that continue an identifier (`translate3d`, `h1`) stay literal.

use std::fmt;
use std::str::FromStr;

use folio_core::animation::lerp;
use folio_core::clamp01;

use crate::color::Rgba;
use crate::css::{format_number, is_ident_byte, matching_paren};
use crate::error::ParseError;
use crate::interpolate::{Interpolate, step};

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Number(f64),
    Color(Rgba),
}

impl Token {
    fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(_), Self::Number(_)) | (Self::Color(_), Self::Color(_)) => true,
            _ => false,
        }
    }
}

/// Parsed template.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Split `input` into text, numbers, and colors. Fails only on blank
    /// input.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        let bytes = s.as_bytes();
        let mut tokens = Vec::new();
        let mut text_start = 0;
        let mut i = 0;
        while i < bytes.len() {
            let at_boundary = i == 0 || !is_ident_byte(bytes[i - 1]);
            let scanned = match s.get(i..) {
                Some(rest) if at_boundary => scan_color(rest)
                    .map(|(c, len)| (Token::Color(c), len))
                    .or_else(|| scan_number(rest).map(|(n, len)| (Token::Number(n), len))),
                _ => None,
            };
            match scanned {
                Some((token, len)) => {
                    if text_start < i {
                        tokens.push(Token::Text(s[text_start..i].to_owned()));
                    }
                    tokens.push(token);
                    i += len;
                    text_start = i;
                }
                None => i += 1,
            }
        }
        if text_start < bytes.len() {
            tokens.push(Token::Text(s[text_start..].to_owned()));
        }
        Ok(Self { tokens })
    }

    /// Embedded numbers, in order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Number(n) => Some(*n),
            _ => None,
        })
    }

    /// Embedded colors, in order.
    pub fn colors(&self) -> impl Iterator<Item = Rgba> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Color(c) => Some(*c),
            _ => None,
        })
    }

    /// Whether `self` and `other` can be blended value by value.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(a, b)| a.same_shape(b))
    }
}

/// A color at the start of `rest`: `rgb(...)`, `rgba(...)`, `#hex`, or
/// `transparent`. Returns the color and its byte length.
fn scan_color(rest: &str) -> Option<(Rgba, usize)> {
    let bytes = rest.as_bytes();
    let ident_end = bytes
        .iter()
        .position(|b| !is_ident_byte(*b))
        .unwrap_or(bytes.len());
    let ident = &rest[..ident_end];

    if ident.eq_ignore_ascii_case("rgb") || ident.eq_ignore_ascii_case("rgba") {
        if bytes.get(ident_end) != Some(&b'(') {
            return None;
        }
        let close = matching_paren(rest, ident_end)?;
        let len = close + 1;
        return Rgba::parse(&rest[..len]).ok().map(|c| (c, len));
    }
    if ident.eq_ignore_ascii_case("transparent") {
        return Some((Rgba::TRANSPARENT, ident_end));
    }
    if bytes.first() == Some(&b'#') {
        let len = 1 + bytes[1..]
            .iter()
            .take_while(|b| b.is_ascii_hexdigit())
            .count();
        if bytes.get(len).is_some_and(|b| is_ident_byte(*b)) {
            return None;
        }
        return Rgba::parse(&rest[..len]).ok().map(|c| (c, len));
    }
    None
}

/// A number at the start of `rest`: optional sign, digits with an optional
/// fraction, optional exponent. Returns the value and its byte length.
fn scan_number(rest: &str) -> Option<(f64, usize)> {
    let bytes = rest.as_bytes();
    let digits_from = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut i = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_digits = digits_from(i);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = digits_from(i + 1);
        if frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(i + 1), Some(b'-' | b'+')));
        let exp_digits = digits_from((i + 1 + sign).min(bytes.len()));
        if exp_digits > 0 {
            i += 1 + sign + exp_digits;
        }
    }
    let value: f64 = rest[..i].parse().ok()?;
    value.is_finite().then_some((value, i))
}

impl Interpolate for Template {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        let t = clamp01(t);
        if t <= 0.0 {
            return from.clone();
        }
        if t >= 1.0 {
            return to.clone();
        }
        if !from.is_compatible(to) {
            tracing::trace!(%from, %to, "incompatible templates; stepping");
            return step(from, to, t);
        }
        let tokens = from
            .tokens
            .iter()
            .zip(&to.tokens)
            .map(|pair| match pair {
                (Token::Number(a), Token::Number(b)) => Token::Number(lerp(*a, *b, t)),
                (Token::Color(a), Token::Color(b)) => Token::Color(a.lerp(*b, t)),
                (same, _) => same.clone(),
            })
            .collect();
        Self { tokens }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            match token {
                Token::Text(text) => f.write_str(text)?,
                Token::Number(n) => f.write_str(&format_number(*n))?,
                Token::Color(c) => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Template {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Template {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Template> for String {
    fn from(template: Template) -> Self {
        template.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn tpl(s: &str) -> Template {
        Template::parse(s).unwrap()
    }

    #[test]
    fn identifier_digits_stay_literal() {
        let t = tpl("translate3d(-225px, 0, 0)");
        assert_eq!(t.numbers().collect::<Vec<_>>(), vec![-225.0, 0.0, 0.0]);
        assert_eq!(t.to_string(), "translate3d(-225px, 0, 0)");
    }

    #[test]
    fn extracts_colors_and_numbers() {
        let t = tpl("0 0 20px rgba(59,130,246,0.6), 0 0 40px rgba(34,211,238,0.3)");
        assert_eq!(
            t.numbers().collect::<Vec<_>>(),
            vec![0.0, 0.0, 20.0, 0.0, 0.0, 40.0]
        );
        assert_eq!(
            t.colors().collect::<Vec<_>>(),
            vec![Rgba::rgba(59, 130, 246, 0.6), Rgba::rgba(34, 211, 238, 0.3)]
        );
    }

    #[test]
    fn hex_and_keyword_colors() {
        let t = tpl("0 1px #3b82f6 inset, 0 0 transparent");
        assert_eq!(t.colors().count(), 2);
        assert_eq!(t.to_string(), "0 1px rgb(59, 130, 246) inset, 0 0 rgba(0, 0, 0, 0)");
    }

    #[test]
    fn scientific_notation_and_fractions() {
        let t = tpl("scale(.5) rotate(1e1deg) skew(2em)");
        assert_eq!(t.numbers().collect::<Vec<_>>(), vec![0.5, 10.0, 2.0]);
        assert_eq!(t.to_string(), "scale(0.5) rotate(10deg) skew(2em)");
    }

    #[test]
    fn blends_compatible_templates() {
        let from = tpl("translate3d(-225px, 0, 0)");
        let to = tpl("translate3d(225px, 0, 0)");
        assert_eq!(Template::interpolate(&from, &to, 0.5).to_string(), "translate3d(0px, 0, 0)");
        assert_eq!(Template::interpolate(&from, &to, 0.75).to_string(), "translate3d(112.5px, 0, 0)");
    }

    #[test]
    fn blends_shadows_with_colors() {
        let from = tpl("0 0 0px rgba(59,130,246,0), 0 0 0px rgba(34,211,238,0)");
        let to = tpl("0 0 20px rgba(59,130,246,0.6), 0 0 40px rgba(34,211,238,0.3)");
        assert!(from.is_compatible(&to));
        let mid = Template::interpolate(&from, &to, 0.5);
        assert_eq!(
            mid.to_string(),
            "0 0 10px rgba(59, 130, 246, 0.3), 0 0 20px rgba(34, 211, 238, 0.15)"
        );
    }

    #[test]
    fn endpoints_are_exact() {
        let from = tpl("scale(1)");
        let to = tpl("scale(1.1)");
        assert_eq!(Template::interpolate(&from, &to, 0.0), from);
        assert_eq!(Template::interpolate(&from, &to, 1.0), to);
        assert_eq!(Template::interpolate(&from, &to, -3.0), from);
    }

    #[traced_test]
    #[test]
    fn incompatible_templates_step_at_midpoint() {
        let from = tpl("0 0 0px rgba(59,130,246,0)");
        let to = tpl("0 0 20px rgba(59,130,246,0.6), 0 0 40px rgba(34,211,238,0.3)");
        assert!(!from.is_compatible(&to));
        assert_eq!(Template::interpolate(&from, &to, 0.25), from);
        assert_eq!(Template::interpolate(&from, &to, 0.5), to);
        assert!(logs_contain("incompatible templates"));
    }

    #[test]
    fn different_literal_text_is_incompatible() {
        assert!(!tpl("scale(1)").is_compatible(&tpl("rotate(1)")));
        assert!(tpl("scale(1)").is_compatible(&tpl("scale(2)")));
    }

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(Template::parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn non_ascii_text_is_preserved() {
        let t = tpl("→ 12px ✓");
        assert_eq!(t.numbers().collect::<Vec<_>>(), vec![12.0]);
        assert_eq!(t.to_string(), "→ 12px ✓");
    }
}
