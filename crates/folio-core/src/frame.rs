#![forbid(unsafe_code)]

//! Frame-aligned coalescing for high-frequency host callbacks.
//!
//! Scroll, resize, and pointer-move callbacks can fire many times between two
//! display refreshes. Recomputing styles for each of them is wasted work, so
//! [`FrameCoalescer`] keeps at most one pending recomputation per frame:
//!
//! - The first request in a frame asks the host to schedule a frame callback.
//! - Later requests in the same frame replace the pending payload
//!   (latest wins) and do not schedule anything.
//! - The frame callback drains the pending payload with [`FrameCoalescer::on_frame`].
//!
//! Stale intermediate values are harmless, so the only cancellation is
//! "the next request supersedes the pending one", plus an explicit
//! [`FrameCoalescer::cancel`] for unmount.
//!
//! # Usage
//!
//! ```
//! use folio_core::FrameCoalescer;
//!
//! let mut frames = FrameCoalescer::new();
//!
//! // First scroll event of the frame: host must request a frame callback.
//! assert!(frames.request(10.0));
//! // Burst of further events: coalesced.
//! assert!(!frames.request(20.0));
//! assert!(!frames.request(30.0));
//!
//! // Frame callback: only the latest payload is processed.
//! assert_eq!(frames.on_frame(), Some(30.0));
//! assert_eq!(frames.on_frame(), None);
//! ```

/// Coalesces requests so at most one recomputation runs per frame.
///
/// # Thread Safety
///
/// Not thread-safe; lives on the host's UI thread.
///
/// # Performance
///
/// All operations are O(1). At most one payload is held.
#[derive(Debug, Clone)]
pub struct FrameCoalescer<T> {
    /// Pending payload (latest wins).
    pending: Option<T>,
    /// Requests that replaced a pending payload.
    superseded: u64,
    /// Frames that actually ran a recomputation.
    frames_run: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            superseded: 0,
            frames_run: 0,
        }
    }
}

impl<T> FrameCoalescer<T> {
    /// Create an idle coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a recomputation with `payload`.
    ///
    /// Returns `true` when no frame was pending, meaning the host must
    /// schedule a frame callback. Returns `false` when the request was folded
    /// into an already scheduled frame.
    pub fn request(&mut self, payload: T) -> bool {
        if self.pending.replace(payload).is_some() {
            self.superseded = self.superseded.saturating_add(1);
            tracing::trace!(superseded = self.superseded, "frame request coalesced");
            false
        } else {
            true
        }
    }

    /// Frame callback: take the pending payload, if any.
    pub fn on_frame(&mut self) -> Option<T> {
        let payload = self.pending.take();
        if payload.is_some() {
            self.frames_run = self.frames_run.saturating_add(1);
        }
        payload
    }

    /// Drop the pending payload without running it.
    ///
    /// Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Check if a frame is pending.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Peek at the pending payload.
    #[inline]
    #[must_use]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// Number of requests that replaced an earlier pending one.
    #[inline]
    #[must_use]
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }

    /// Number of frames that drained a payload.
    #[inline]
    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
