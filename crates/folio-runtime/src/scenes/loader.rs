#![forbid(unsafe_code)]

//! Page loader: a percentage counter and staggered progress lines.
//!
//! ```text
//! Loading ──(progress hits 100)──▶ Settling ──(fade_delay)──▶ Fading ──(fade)──▶ Done
//! ```
//!
//! While loading, progress grows by a seeded random increment once per
//! `step`. Line `i` targets `clamp01((p/100 − stagger·i) · gain)` and chases
//! it through a [`Spring`], so later lines start later and lag behind.
//!
//! # Invariants
//!
//! 1. Progress is non-decreasing and never exceeds 100.
//! 2. Line targets are non-increasing in the line index.
//! 3. A single large `dt` is split at every step and phase boundary, so
//!    progress and phase do not depend on how time was sliced.

use std::time::Duration;

use folio_core::animation::{Animation, Spring};
use folio_core::{SeededRng, clamp01};
use folio_style::StyleValue;

use crate::scenes::{Channel, Scene};

const FULL: f64 = 100.0;

/// Loader timing and shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub seed: u64,
    /// Interval between progress increments.
    pub step: Duration,
    /// Increment range in percent.
    pub increment: (f64, f64),
    pub line_count: usize,
    /// Progress offset between consecutive lines, as a fraction.
    pub stagger: f64,
    pub gain: f64,
    pub stiffness: f64,
    pub damping: f64,
    /// Pause at 100% before fading.
    pub fade_delay: Duration,
    pub fade_duration: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            step: Duration::from_millis(80),
            increment: (1.0, 3.5),
            line_count: 6,
            stagger: 0.08,
            gain: 1.3,
            stiffness: folio_core::animation::spring::LOADER_STIFFNESS,
            damping: folio_core::animation::spring::LOADER_DAMPING,
            fade_delay: Duration::from_millis(500),
            fade_duration: Duration::from_millis(1000),
        }
    }
}

/// Loader lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderPhase {
    Loading,
    /// Complete, holding at full opacity.
    Settling,
    Fading,
    Done,
}

impl LoaderPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Settling => "settling",
            Self::Fading => "fading",
            Self::Done => "done",
        }
    }
}

/// Target length of line `index` at `progress` percent.
#[must_use]
pub fn line_target(index: usize, progress: f64, stagger: f64, gain: f64) -> f64 {
    clamp01((progress / FULL - stagger * index as f64) * gain)
}

/// The loader overlay.
#[derive(Debug, Clone)]
pub struct Loader {
    config: LoaderConfig,
    rng: SeededRng,
    progress: f64,
    phase: LoaderPhase,
    /// Time spent in the current phase, or toward the next increment.
    elapsed: Duration,
    lines: Vec<Spring>,
}

impl Loader {
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        let step = config.step.max(Duration::from_millis(1));
        let config = LoaderConfig { step, ..config };
        let lines = (0..config.line_count)
            .map(|_| {
                Spring::at(0.0)
                    .with_stiffness(config.stiffness)
                    .with_damping(config.damping)
            })
            .collect();
        Self {
            rng: SeededRng::new(config.seed),
            config,
            progress: 0.0,
            phase: LoaderPhase::Loading,
            elapsed: Duration::ZERO,
            lines,
        }
    }

    /// Overall progress in percent.
    #[inline]
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Percentage shown by the counter.
    #[must_use]
    pub fn percent_label(&self) -> u32 {
        self.progress.floor() as u32
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> LoaderPhase {
        self.phase
    }

    /// Current line lengths in `[0, 1]`.
    #[must_use]
    pub fn lines(&self) -> Vec<f64> {
        self.lines
            .iter()
            .map(|line| clamp01(line.position()))
            .collect()
    }

    /// Current line targets.
    #[must_use]
    pub fn line_targets(&self) -> Vec<f64> {
        (0..self.lines.len())
            .map(|i| line_target(i, self.progress, self.config.stagger, self.config.gain))
            .collect()
    }

    /// Overlay opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        match self.phase {
            LoaderPhase::Loading | LoaderPhase::Settling => 1.0,
            LoaderPhase::Fading => {
                let total = self.config.fade_duration.as_secs_f64();
                if total <= 0.0 {
                    0.0
                } else {
                    clamp01(1.0 - self.elapsed.as_secs_f64() / total)
                }
            }
            LoaderPhase::Done => 0.0,
        }
    }

    fn phase_length(&self) -> Option<Duration> {
        match self.phase {
            LoaderPhase::Loading => Some(self.config.step),
            LoaderPhase::Settling => Some(self.config.fade_delay),
            LoaderPhase::Fading => Some(self.config.fade_duration),
            LoaderPhase::Done => None,
        }
    }

    fn advance(&mut self) {
        self.elapsed = Duration::ZERO;
        self.phase = match self.phase {
            LoaderPhase::Loading => {
                let (lo, hi) = self.config.increment;
                self.progress = (self.progress + self.rng.range(lo, hi)).min(FULL);
                let targets = self.line_targets();
                for (line, target) in self.lines.iter_mut().zip(targets) {
                    line.set_target(target);
                }
                if self.progress >= FULL {
                    LoaderPhase::Settling
                } else {
                    LoaderPhase::Loading
                }
            }
            LoaderPhase::Settling => LoaderPhase::Fading,
            LoaderPhase::Fading | LoaderPhase::Done => LoaderPhase::Done,
        };
        if self.phase != LoaderPhase::Loading {
            tracing::debug!(phase = self.phase.as_str(), "loader phase");
        }
    }

    fn tick_lines(&mut self, dt: Duration) {
        for line in &mut self.lines {
            line.tick(dt);
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

impl Animation for Loader {
    fn tick(&mut self, dt: Duration) {
        let mut remaining = dt;
        while let Some(length) = self.phase_length() {
            let slice = remaining.min(length.saturating_sub(self.elapsed));
            self.tick_lines(slice);
            self.elapsed += slice;
            remaining -= slice;
            if self.elapsed < length {
                return;
            }
            self.advance();
        }
        self.tick_lines(remaining);
    }

    fn is_complete(&self) -> bool {
        self.phase == LoaderPhase::Done
    }

    fn value(&self) -> f32 {
        (self.progress / FULL) as f32
    }

    fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }
}

impl Scene for Loader {
    fn name(&self) -> &'static str {
        "loader"
    }

    fn channels(&self) -> Vec<Channel> {
        let mut out = vec![
            Channel::new("counter.text", format!("{}%", self.percent_label())),
            Channel::new("overlay.opacity", StyleValue::Number(self.opacity()).to_string()),
        ];
        out.extend(self.lines().into_iter().enumerate().map(|(i, length)| {
            Channel::new(
                format!("line{i}.path-length"),
                StyleValue::Number(length).to_string(),
            )
        }));
        out
    }
}
