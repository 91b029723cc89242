#![forbid(unsafe_code)]

//! Core: geometry, pointer and scroll inputs, and the small motion kernels.
//!
//! # Role in Folio
//! `folio-core` is the measurement layer. It turns raw host measurements
//! (bounding rectangles, pointer coordinates, viewport heights) into the
//! normalized values the rest of the stack animates with.
//!
//! # Primary responsibilities
//! - **Direction**: classify which edge a pointer crossed when entering an element.
//! - **Scroll progress**: normalize an element's scroll-through position to `[0, 1]`
//!   and smooth it frame by frame.
//! - **Frame coalescing**: keep at most one pending recomputation per display frame.
//! - **Seeded randomness**: deterministic decorative layouts.
//! - **Animation**: springs and the typewriter role cycler.
//!
//! # How it fits in the system
//! `folio-style` interpolates style values, `folio-runtime` fans progress out
//! to those values through observables. Nothing in this crate owns a clock or
//! performs I/O; hosts pass time and measurements in.

pub mod animation;
pub mod direction;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod scroll;
pub mod seeded;

pub use direction::{Direction, HoverState, detect_direction};
pub use event::PointerEvent;
pub use frame::FrameCoalescer;
pub use geometry::{Point, Rect};
pub use scroll::{
    DEFAULT_SMOOTHING_FACTOR, ScrollAnchor, ScrollMeasure, ScrollOffsets, Smoother, clamp01,
    scroll_progress, steps_to_converge,
};
pub use seeded::SeededRng;
