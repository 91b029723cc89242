#![forbid(unsafe_code)]

//! Frame-coalesced scroll progress for one observed element.
//!
//! # Host wiring
//!
//! ```text
//! scroll / resize event ──▶ on_scroll() ──true──▶ host schedules a frame
//! frame callback ─────────▶ on_frame()  ──true──▶ host schedules another
//! ```
//!
//! `on_frame` measures the element once, normalizes it through the
//! configured [`ScrollOffsets`], optionally smooths it, and publishes the
//! result on the progress [`Observable`]. Every style channel bound to that
//! observable derives from the same value; progress is never recomputed per
//! channel.
//!
//! # Invariants
//!
//! 1. At most one measurement per frame, however many scroll events arrived.
//! 2. Published progress is always in `[0, 1]`.
//! 3. With smoothing, frames keep being requested until the smoothed value is
//!    within the settle epsilon of the raw value.

use folio_core::{FrameCoalescer, ScrollMeasure, ScrollOffsets, Smoother};

use crate::reactive::Observable;

/// Default distance at which a smoothed value counts as settled.
pub const DEFAULT_SETTLE_EPSILON: f64 = 1e-4;

/// Source of fresh measurements for the observed element.
pub trait Measure {
    /// Measure the element now.
    fn measure(&self) -> ScrollMeasure;
}

impl<F: Fn() -> ScrollMeasure> Measure for F {
    fn measure(&self) -> ScrollMeasure {
        self()
    }
}

/// Drives one progress observable from host scroll and frame callbacks.
pub struct ScrollDriver<M> {
    source: M,
    offsets: ScrollOffsets,
    smoother: Option<Smoother>,
    settle_epsilon: f64,
    frames: FrameCoalescer<()>,
    raw: f64,
    progress: Observable<f64>,
}

impl<M: Measure> ScrollDriver<M> {
    /// Unsmoothed driver publishing `offsets.progress(source.measure())`.
    #[must_use]
    pub fn new(source: M, offsets: ScrollOffsets) -> Self {
        Self {
            source,
            offsets,
            smoother: None,
            settle_epsilon: DEFAULT_SETTLE_EPSILON,
            frames: FrameCoalescer::new(),
            raw: 0.0,
            progress: Observable::new(0.0),
        }
    }

    /// Smooth published progress with blend `factor` per frame (builder).
    #[must_use]
    pub fn with_smoothing(mut self, factor: f64) -> Self {
        self.smoother = Some(Smoother::new(factor));
        self
    }

    /// Settle distance for smoothing (builder). Non-positive values fall back
    /// to [`DEFAULT_SETTLE_EPSILON`].
    #[must_use]
    pub fn with_settle_epsilon(mut self, epsilon: f64) -> Self {
        self.settle_epsilon = if epsilon > 0.0 {
            epsilon
        } else {
            DEFAULT_SETTLE_EPSILON
        };
        self
    }

    /// Handle to the published progress.
    #[must_use]
    pub fn progress(&self) -> Observable<f64> {
        self.progress.clone()
    }

    /// Unsmoothed progress from the last measured frame.
    #[inline]
    #[must_use]
    pub fn raw_progress(&self) -> f64 {
        self.raw
    }

    #[inline]
    #[must_use]
    pub fn is_smoothed(&self) -> bool {
        self.smoother.is_some()
    }

    /// Frames that actually measured.
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames.frames_run()
    }

    /// A scroll or resize happened. Returns `true` when the host must
    /// schedule a frame callback.
    pub fn on_scroll(&mut self) -> bool {
        self.frames.request(())
    }

    /// Frame callback. Returns `true` when another frame is needed.
    pub fn on_frame(&mut self) -> bool {
        if self.frames.on_frame().is_none() {
            return false;
        }
        let measure = self.source.measure();
        self.raw = self.offsets.progress(measure);
        let published = match self.smoother.as_mut() {
            Some(smoother) => smoother.update(self.raw),
            None => self.raw,
        };
        self.progress.set(published);

        let animating = self
            .smoother
            .is_some_and(|s| !s.is_settled(self.raw, self.settle_epsilon));
        if animating {
            self.frames.request(());
        }
        tracing::trace!(raw = self.raw, published, animating, "scroll frame");
        animating
    }

    /// Drop any pending frame and return to progress 0, as on unmount.
    pub fn reset(&mut self) {
        self.frames.cancel();
        if let Some(smoother) = self.smoother.as_mut() {
            smoother.reset(0.0);
        }
        self.raw = 0.0;
        self.progress.set(0.0);
    }
}

impl<M> std::fmt::Debug for ScrollDriver<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollDriver")
            .field("offsets", &self.offsets)
            .field("smoother", &self.smoother)
            .field("raw", &self.raw)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn element(top: f64) -> Rc<Cell<ScrollMeasure>> {
        Rc::new(Cell::new(ScrollMeasure::new(top, 400.0, 800.0)))
    }

    fn driver(cell: &Rc<Cell<ScrollMeasure>>) -> ScrollDriver<impl Measure> {
        let cell = Rc::clone(cell);
        ScrollDriver::new(move || cell.get(), ScrollOffsets::default())
    }

    #[test]
    fn scroll_bursts_measure_once_per_frame() {
        let el = element(800.0);
        let mut d = driver(&el);
        assert!(d.on_scroll());
        for top in [700.0, 600.0, 500.0] {
            el.set(el.get().with_top(top));
            assert!(!d.on_scroll());
        }
        assert!(!d.on_frame());
        assert_eq!(d.frames_run(), 1);
        // (800 - 500) / (800 + 400)
        assert_eq!(d.progress().get(), 0.25);
    }

    #[test]
    fn frame_without_scroll_is_a_no_op() {
        let el = element(0.0);
        let mut d = driver(&el);
        assert!(!d.on_frame());
        assert_eq!(d.progress().get(), 0.0);
        assert_eq!(d.frames_run(), 0);
    }

    #[test]
    fn smoothing_requests_frames_until_settled() {
        let el = element(-400.0);
        let cell = Rc::clone(&el);
        let mut d = ScrollDriver::new(move || cell.get(), ScrollOffsets::default())
            .with_smoothing(0.15)
            .with_settle_epsilon(1e-3);
        d.on_scroll();
        let mut frames = 0;
        while d.on_frame() {
            frames += 1;
            assert!(frames < 100, "smoothing never settled");
        }
        assert_eq!(d.raw_progress(), 1.0);
        assert!((d.progress().get() - 1.0).abs() < 1e-3);
        // ceil(ln(1e-3) / ln(0.85)) = 43 updates, the last one reports settled.
        assert_eq!(frames + 1, 43);
    }

    #[test]
    fn subscribers_derive_from_one_measurement() {
        let el = element(400.0);
        let measured = Rc::new(Cell::new(0u32));
        let (cell, counter) = (Rc::clone(&el), Rc::clone(&measured));
        let mut d = ScrollDriver::new(
            move || {
                counter.set(counter.get() + 1);
                cell.get()
            },
            ScrollOffsets::default(),
        );
        let progress = d.progress();
        let a = progress.map(|p| p * 100.0);
        let b = progress.map(|p| 1.0 - p);
        d.on_scroll();
        d.on_frame();
        assert_eq!(measured.get(), 1);
        assert!((a.get() - 100.0 / 3.0).abs() < 1e-9);
        assert!((b.get() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn reset_cancels_and_zeroes() {
        let el = element(0.0);
        let mut d = driver(&el);
        d.on_scroll();
        d.on_frame();
        assert!(d.progress().get() > 0.0);
        d.on_scroll();
        d.reset();
        assert_eq!(d.progress().get(), 0.0);
        assert!(!d.on_frame());
    }
}
