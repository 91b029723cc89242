#![forbid(unsafe_code)]

//! Small CSS text helpers shared by the parsers.

/// Decimal places kept when formatting numbers.
const PRECISION: f64 = 1e4;

/// Format a number the way it would be written in CSS: at most four
/// decimals, no trailing zeros, no `-0`. Non-finite values print as `0`.
pub(crate) fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let rounded = (value * PRECISION).round() / PRECISION;
    if rounded == 0.0 {
        return "0".to_owned();
    }
    format!("{rounded}")
}

/// Whether `b` can continue an identifier (so a digit after it is part of a
/// name like `translate3d`, not a number).
pub(crate) fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Byte index of the `)` closing the `(` at `open`.
pub(crate) fn matching_paren(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// If `s` is `name(...)` (case-insensitive name), the text between the
/// parentheses.
pub(crate) fn function_body<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let s = s.trim();
    let open = s.find('(')?;
    if !s[..open].trim().eq_ignore_ascii_case(name) {
        return None;
    }
    let close = matching_paren(s, open)?;
    if close != s.len() - 1 {
        return None;
    }
    Some(&s[open + 1..close])
}

/// Split on `sep` outside parentheses.
pub(crate) fn split_top_level(s: &str, sep: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ if b == sep && depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
