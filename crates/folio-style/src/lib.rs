#![forbid(unsafe_code)]

//! Style values and interpolation for Folio.
//!
//! # Role in Folio
//! `folio-style` is the vocabulary scroll- and hover-linked effects speak in.
//! A progress value from `folio-core` becomes a CSS value here: a number, a
//! color, a linear gradient, or a template string such as
//! `translate3d(-225px, 0, 0)` or a multi-layer `box-shadow`.
//!
//! # This crate provides
//! - [`Interpolate`]: clamped, endpoint-exact interpolation.
//! - [`Rgba`]: CSS colors (`#hex`, `rgb()`, `rgba()`), per-channel blending.
//! - [`LinearGradient`]: `linear-gradient(...)` with angle and stops.
//! - [`Template`]: any string with embedded numbers and colors.
//! - [`StyleValue`]: one of the above, parsed from CSS text.
//!
//! # How it fits in the system
//! `folio-runtime` holds pairs of [`StyleValue`]s as output ranges and calls
//! [`Interpolate::interpolate`] once per channel per frame. Parsing happens
//! once, when a scene is built.

/// Colors.
pub mod color;
/// Parse errors.
pub mod error;
/// Linear gradients.
pub mod gradient;
/// The interpolation trait.
pub mod interpolate;
/// Templates with embedded numbers and colors.
pub mod template;
/// The tagged style value.
pub mod value;

mod css;

pub use color::Rgba;
pub use error::ParseError;
pub use gradient::{ColorStop, LinearGradient};
pub use interpolate::{Interpolate, step};
pub use template::Template;
pub use value::StyleValue;
