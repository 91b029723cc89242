#![forbid(unsafe_code)]

//! Folio Runtime
//!
//! Ties `folio-core` measurements and `folio-style` values together into the
//! page's live motion.
//!
//! # Key Components
//!
//! - [`Observable`] / [`Derived`] - single-threaded value cells with ordered fan-out
//! - [`MotionTransform`] - clamped progress range mapped onto a style range
//! - [`ScrollDriver`] - frame-coalesced, optionally smoothed scroll progress
//! - [`scenes`] - skills marquee, timeline, background, loader, hero, hover cards
//! - [`MotionConfig`] - every tunable, loadable from TOML/JSON (`config` feature)
//!
//! # Role in Folio
//! The runtime is where one measurement becomes many style channels. A
//! [`ScrollDriver`] publishes a single progress value per frame and every
//! channel bound to it recomputes once, in subscription order.
//!
//! # How it fits in the system
//! Hosts forward scroll, pointer and frame callbacks into the drivers and
//! scenes here, then read [`scenes::Scene::channels`] to apply inline styles.
//! Nothing in this crate installs a tracing subscriber; that is left to the
//! binary (`folio-demo`).

pub mod config;
pub mod error;
pub mod reactive;
pub mod scenes;
pub mod scroll_driver;
pub mod transform;

pub use config::MotionConfig;
pub use error::{ConfigError, Result};
pub use reactive::{Derived, Observable, Subscription};
pub use scenes::{Channel, Scene};
pub use scroll_driver::{Measure, ScrollDriver};
pub use transform::MotionTransform;
