//! Property-based invariant tests for style interpolation.
//!
//! 1. Numbers and color channels are exact at both endpoints
//! 2. Intermediate values stay between the endpoints
//! 3. Out-of-range `t` clamps to the nearest endpoint
//! 4. Templates re-serialize to text that parses to the same shape
//! 5. Mismatched templates step at the midpoint

use folio_style::{Interpolate, LinearGradient, Rgba, StyleValue, Template};
use proptest::prelude::*;

fn color_strategy() -> impl Strategy<Value = Rgba> {
    (any::<u8>(), any::<u8>(), any::<u8>(), 0.0f64..=1.0)
        .prop_map(|(r, g, b, a)| Rgba::rgba(r, g, b, a))
}

fn finite() -> impl Strategy<Value = f64> {
    -1e6f64..1e6
}

fn between(x: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    x >= lo - 1e-9 && x <= hi + 1e-9
}

fn channel_between(x: u8, a: u8, b: u8) -> bool {
    x >= a.min(b) && x <= a.max(b)
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Endpoint exactness
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn numbers_exact_at_endpoints(a in finite(), b in finite()) {
        prop_assert_eq!(f64::interpolate(&a, &b, 0.0), a);
        prop_assert_eq!(f64::interpolate(&a, &b, 1.0), b);
    }

    #[test]
    fn colors_exact_at_endpoints(a in color_strategy(), b in color_strategy()) {
        prop_assert_eq!(Rgba::interpolate(&a, &b, 0.0), a);
        prop_assert_eq!(Rgba::interpolate(&a, &b, 1.0), b);
    }

    #[test]
    fn gradients_exact_at_endpoints(
        angle_a in 0.0f64..360.0,
        angle_b in 0.0f64..360.0,
        a0 in color_strategy(), a1 in color_strategy(),
        b0 in color_strategy(), b1 in color_strategy(),
    ) {
        let from = LinearGradient::between(angle_a, a0, a1);
        let to = LinearGradient::between(angle_b, b0, b1);
        prop_assert_eq!(LinearGradient::interpolate(&from, &to, 0.0), from.clone());
        prop_assert_eq!(LinearGradient::interpolate(&from, &to, 1.0), to);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2-3. Bounds and clamping
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn numbers_stay_between(a in finite(), b in finite(), t in 0.0f64..=1.0) {
        let x = f64::interpolate(&a, &b, t);
        prop_assert!(between(x, a, b), "{x} not between {a} and {b}");
    }

    #[test]
    fn color_channels_stay_between(a in color_strategy(), b in color_strategy(), t in 0.0f64..=1.0) {
        let c = Rgba::interpolate(&a, &b, t);
        prop_assert!(channel_between(c.r, a.r, b.r));
        prop_assert!(channel_between(c.g, a.g, b.g));
        prop_assert!(channel_between(c.b, a.b, b.b));
        prop_assert!(between(c.a, a.a, b.a));
    }

    #[test]
    fn out_of_range_t_clamps(a in finite(), b in finite(), over in 1.0f64..1e9) {
        prop_assert_eq!(f64::interpolate(&a, &b, -over), a);
        prop_assert_eq!(f64::interpolate(&a, &b, 1.0 + over), b);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4-5. Templates
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn marquee_offsets_blend_linearly(amplitude in 1u32..1000, t in 0.0f64..=1.0) {
        let half = f64::from(amplitude) / 2.0;
        let from = Template::parse(&format!("translate3d({}px, 0, 0)", -half)).unwrap();
        let to = Template::parse(&format!("translate3d({half}px, 0, 0)")).unwrap();
        let mid = Template::interpolate(&from, &to, t);
        let offset = mid.numbers().next().unwrap();
        prop_assert!((offset - (-half + 2.0 * half * t)).abs() < 1e-9);
    }

    #[test]
    fn rendered_templates_reparse_compatibly(
        x in -1e4f64..1e4,
        blur in 0.0f64..100.0,
        color in color_strategy(),
    ) {
        let text = format!("0 {x}px {blur}px {color}");
        let parsed = Template::parse(&text).unwrap();
        let reparsed = Template::parse(&parsed.to_string()).unwrap();
        prop_assert!(parsed.is_compatible(&reparsed));
        prop_assert_eq!(parsed.colors().count(), 1);
    }

    #[test]
    fn mismatched_values_step(t in 0.0f64..=1.0, n in finite(), color in color_strategy()) {
        let from = StyleValue::Number(n);
        let to = StyleValue::Color(color);
        let expected = if t < 0.5 { from.clone() } else { to.clone() };
        prop_assert_eq!(StyleValue::interpolate(&from, &to, t), expected);
    }
}
