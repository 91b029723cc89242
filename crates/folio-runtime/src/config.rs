#![forbid(unsafe_code)]

//! Motion tuning as data.
//!
//! Every tunable of the page's motion lives in one [`MotionConfig`] that can
//! be loaded from TOML or JSON (with the `config` feature), so timings and
//! amplitudes change without a rebuild.
//!
//! ```toml
//! # folio-motion.toml
//! [smoothing]
//! factor = 0.2
//!
//! [skills]
//! amplitudes = [300.0, 280.0]
//!
//! [loader]
//! step_ms = 60
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the value the components use on their own, so
//! `MotionConfig::default()` reproduces the stock page.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use folio_core::DEFAULT_SMOOTHING_FACTOR;
use folio_core::animation::TypewriterTiming;

#[cfg(feature = "config")]
use crate::error::{ConfigError, Result};
use crate::scenes::{BackgroundConfig, HeroConfig, LoaderConfig, MarqueeConfig, TimelineConfig};
use crate::scroll_driver::{DEFAULT_SETTLE_EPSILON, Measure, ScrollDriver};
use crate::transform::MotionTransform;

// ---------------------------------------------------------------------------
// Top-level MotionConfig
// ---------------------------------------------------------------------------

/// All motion parameters of the page.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct MotionConfig {
    /// Scroll progress smoothing.
    pub smoothing: SmoothingPolicyConfig,
    /// Skills marquee lanes.
    pub skills: SkillsPolicyConfig,
    /// Experience timeline styles.
    pub timeline: TimelinePolicyConfig,
    /// Background particles and orbs.
    pub background: BackgroundPolicyConfig,
    /// Page loader.
    pub loader: LoaderPolicyConfig,
    /// Hero role typewriter.
    pub typewriter: TypewriterPolicyConfig,
    /// Hero spotlight mask.
    pub hero: HeroPolicyConfig,
}

impl MotionConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load a file by extension (`.json` is JSON, anything else TOML) and
    /// validate it.
    #[cfg(feature = "config")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        let problems = config.validate();
        if !problems.is_empty() {
            tracing::warn!(path = %path.display(), count = problems.len(), "invalid motion config");
            return Err(ConfigError::Validation(problems));
        }
        tracing::debug!(path = %path.display(), json = is_json, "motion config loaded");
        Ok(config)
    }

    /// Encode as TOML.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Encode as pretty JSON.
    #[cfg(feature = "config")]
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let factor = self.smoothing.factor;
        if !(factor > 0.0 && factor <= 1.0) {
            errors.push(format!("smoothing.factor must be in (0, 1], got {factor}"));
        }
        if !(self.smoothing.settle_epsilon > 0.0) {
            errors.push(format!(
                "smoothing.settle_epsilon must be > 0, got {}",
                self.smoothing.settle_epsilon
            ));
        }

        if self.skills.amplitudes.is_empty() {
            errors.push("skills.amplitudes must not be empty".into());
        }
        if let Some(bad) = self.skills.amplitudes.iter().find(|a| !a.is_finite()) {
            errors.push(format!("skills.amplitudes must be finite, got {bad}"));
        }
        if !self.skills.magnetic_multiplier.is_finite() {
            errors.push(format!(
                "skills.magnetic_multiplier must be finite, got {}",
                self.skills.magnetic_multiplier
            ));
        }

        let t = &self.timeline;
        if !(t.opacity_until > 0.0 && t.opacity_until <= 1.0) {
            errors.push(format!(
                "timeline.opacity_until must be in (0, 1], got {}",
                t.opacity_until
            ));
        }
        if !(t.node_span > 0.0 && t.node_span <= 1.0) {
            errors.push(format!(
                "timeline.node_span must be in (0, 1], got {}",
                t.node_span
            ));
        }
        for (name, from, to) in [
            ("outer", &t.outer_from, &t.outer_to),
            ("inner", &t.inner_from, &t.inner_to),
            ("innermost", &t.innermost_from, &t.innermost_to),
            ("glow", &t.glow_from, &t.glow_to),
            ("scale", &t.scale_from, &t.scale_to),
        ] {
            if let Err(e) = MotionTransform::parse(from, to) {
                errors.push(format!("timeline.{name}: {e}"));
            }
        }

        let b = &self.background;
        for (name, speed) in [("grid_speed", b.grid_speed), ("mesh_speed", b.mesh_speed)] {
            if !speed.is_finite() {
                errors.push(format!("background.{name} must be finite, got {speed}"));
            }
        }

        let l = &self.loader;
        if l.step_ms == 0 {
            errors.push("loader.step_ms must be > 0".into());
        }
        if !(l.increment_min > 0.0 && l.increment_min <= l.increment_max) {
            errors.push(format!(
                "loader increments must satisfy 0 < increment_min <= increment_max, got {}..{}",
                l.increment_min, l.increment_max
            ));
        }
        if l.line_count == 0 {
            errors.push("loader.line_count must be > 0".into());
        }
        if !(l.stagger >= 0.0) {
            errors.push(format!("loader.stagger must be >= 0, got {}", l.stagger));
        }
        if !(l.gain > 0.0) {
            errors.push(format!("loader.gain must be > 0, got {}", l.gain));
        }
        if !(l.stiffness > 0.0) {
            errors.push(format!("loader.stiffness must be > 0, got {}", l.stiffness));
        }
        if !(l.damping >= 0.0) {
            errors.push(format!("loader.damping must be >= 0, got {}", l.damping));
        }

        let tw = &self.typewriter;
        if tw.type_step_ms == 0 || tw.delete_step_ms == 0 {
            errors.push("typewriter step durations must be > 0".into());
        }
        if tw.roles.iter().any(|r| r.trim().is_empty()) {
            errors.push("typewriter.roles must not contain blank roles".into());
        }

        if !(self.hero.threshold >= 0.0) {
            errors.push(format!(
                "hero.threshold must be >= 0, got {}",
                self.hero.threshold
            ));
        }

        errors
    }

    /// Apply smoothing settings to a scroll driver.
    #[must_use]
    pub fn configure_driver<M: Measure>(&self, driver: ScrollDriver<M>) -> ScrollDriver<M> {
        if self.smoothing.enabled {
            driver
                .with_smoothing(self.smoothing.factor)
                .with_settle_epsilon(self.smoothing.settle_epsilon)
        } else {
            driver
        }
    }

    /// Build a [`MarqueeConfig`].
    #[must_use]
    pub fn to_marquee_config(&self) -> MarqueeConfig {
        MarqueeConfig {
            amplitudes: self.skills.amplitudes.clone(),
            magnetic_multiplier: self.skills.magnetic_multiplier,
        }
    }

    /// Build a [`TimelineConfig`].
    #[must_use]
    pub fn to_timeline_config(&self) -> TimelineConfig {
        let t = &self.timeline;
        TimelineConfig {
            opacity_until: t.opacity_until,
            node_span: t.node_span,
            outer_from: t.outer_from.clone(),
            outer_to: t.outer_to.clone(),
            inner_from: t.inner_from.clone(),
            inner_to: t.inner_to.clone(),
            innermost_from: t.innermost_from.clone(),
            innermost_to: t.innermost_to.clone(),
            glow_from: t.glow_from.clone(),
            glow_to: t.glow_to.clone(),
            scale_from: t.scale_from.clone(),
            scale_to: t.scale_to.clone(),
        }
    }

    /// Build a [`BackgroundConfig`]. Sampling ranges keep their defaults.
    #[must_use]
    pub fn to_background_config(&self) -> BackgroundConfig {
        let b = &self.background;
        let mut config = BackgroundConfig {
            seed: b.seed,
            grid_speed: b.grid_speed,
            mesh_speed: b.mesh_speed,
            ..BackgroundConfig::default()
        };
        config.particles.count = b.particle_count;
        config.orbs.count = b.orb_count;
        config
    }

    /// Build a [`LoaderConfig`].
    #[must_use]
    pub fn to_loader_config(&self) -> LoaderConfig {
        let l = &self.loader;
        LoaderConfig {
            seed: l.seed,
            step: Duration::from_millis(l.step_ms),
            increment: (l.increment_min, l.increment_max),
            line_count: l.line_count,
            stagger: l.stagger,
            gain: l.gain,
            stiffness: l.stiffness,
            damping: l.damping,
            fade_delay: Duration::from_millis(l.fade_delay_ms),
            fade_duration: Duration::from_millis(l.fade_duration_ms),
        }
    }

    /// Build a [`TypewriterTiming`].
    #[must_use]
    pub fn to_typewriter_timing(&self) -> TypewriterTiming {
        let tw = &self.typewriter;
        TypewriterTiming {
            type_step: Duration::from_millis(tw.type_step_ms),
            hold: Duration::from_millis(tw.hold_ms),
            delete_step: Duration::from_millis(tw.delete_step_ms),
        }
    }

    /// Build a [`HeroConfig`] from the hero and typewriter sections.
    #[must_use]
    pub fn to_hero_config(&self) -> HeroConfig {
        HeroConfig {
            threshold: self.hero.threshold,
            roles: self.typewriter.roles.clone(),
            timing: self.to_typewriter_timing(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Scroll progress smoothing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SmoothingPolicyConfig {
    /// Smooth section progress. Default: true.
    pub enabled: bool,
    /// Blend factor per frame. Default: 0.15.
    pub factor: f64,
    /// Distance at which smoothing stops requesting frames. Default: 1e-4.
    pub settle_epsilon: f64,
}

impl Default for SmoothingPolicyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            factor: DEFAULT_SMOOTHING_FACTOR,
            settle_epsilon: DEFAULT_SETTLE_EPSILON,
        }
    }
}

/// Skills marquee lanes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SkillsPolicyConfig {
    /// Travel of each lane in px, one entry per lane.
    pub amplitudes: Vec<f64>,
    /// Badge pull per px of pointer distance from the window centre.
    /// Default: 0.003.
    pub magnetic_multiplier: f64,
}

impl Default for SkillsPolicyConfig {
    fn default() -> Self {
        let m = MarqueeConfig::default();
        Self {
            amplitudes: m.amplitudes,
            magnetic_multiplier: m.magnetic_multiplier,
        }
    }
}

/// Experience timeline styles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TimelinePolicyConfig {
    /// Progress at which the line is fully opaque. Default: 0.2.
    pub opacity_until: f64,
    /// Node activation window, fraction of its slot. Default: 0.5.
    pub node_span: f64,
    pub outer_from: String,
    pub outer_to: String,
    pub inner_from: String,
    pub inner_to: String,
    pub innermost_from: String,
    pub innermost_to: String,
    pub glow_from: String,
    pub glow_to: String,
    pub scale_from: String,
    pub scale_to: String,
}

impl Default for TimelinePolicyConfig {
    fn default() -> Self {
        let t = TimelineConfig::default();
        Self {
            opacity_until: t.opacity_until,
            node_span: t.node_span,
            outer_from: t.outer_from,
            outer_to: t.outer_to,
            inner_from: t.inner_from,
            inner_to: t.inner_to,
            innermost_from: t.innermost_from,
            innermost_to: t.innermost_to,
            glow_from: t.glow_from,
            glow_to: t.glow_to,
            scale_from: t.scale_from,
            scale_to: t.scale_to,
        }
    }
}

/// Background layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct BackgroundPolicyConfig {
    /// Layout seed. Default: 1.
    pub seed: u64,
    /// Default: 6.
    pub particle_count: usize,
    /// Default: 2.
    pub orb_count: usize,
    /// Default: 0.004.
    pub grid_speed: f64,
    /// Default: 0.001.
    pub mesh_speed: f64,
}

impl Default for BackgroundPolicyConfig {
    fn default() -> Self {
        let b = BackgroundConfig::default();
        Self {
            seed: b.seed,
            particle_count: b.particles.count,
            orb_count: b.orbs.count,
            grid_speed: b.grid_speed,
            mesh_speed: b.mesh_speed,
        }
    }
}

/// Page loader.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct LoaderPolicyConfig {
    pub seed: u64,
    /// Default: 80.
    pub step_ms: u64,
    /// Default: 1.0.
    pub increment_min: f64,
    /// Default: 3.5.
    pub increment_max: f64,
    /// Default: 6.
    pub line_count: usize,
    /// Default: 0.08.
    pub stagger: f64,
    /// Default: 1.3.
    pub gain: f64,
    /// Default: 80.
    pub stiffness: f64,
    /// Default: 25.
    pub damping: f64,
    /// Default: 500.
    pub fade_delay_ms: u64,
    /// Default: 1000.
    pub fade_duration_ms: u64,
}

impl Default for LoaderPolicyConfig {
    fn default() -> Self {
        let l = LoaderConfig::default();
        Self {
            seed: l.seed,
            step_ms: l.step.as_millis() as u64,
            increment_min: l.increment.0,
            increment_max: l.increment.1,
            line_count: l.line_count,
            stagger: l.stagger,
            gain: l.gain,
            stiffness: l.stiffness,
            damping: l.damping,
            fade_delay_ms: l.fade_delay.as_millis() as u64,
            fade_duration_ms: l.fade_duration.as_millis() as u64,
        }
    }
}

/// Hero role typewriter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TypewriterPolicyConfig {
    /// Default: 100.
    pub type_step_ms: u64,
    /// Default: 2000.
    pub hold_ms: u64,
    /// Default: 50.
    pub delete_step_ms: u64,
    pub roles: Vec<String>,
}

impl Default for TypewriterPolicyConfig {
    fn default() -> Self {
        let timing = TypewriterTiming::default();
        Self {
            type_step_ms: timing.type_step.as_millis() as u64,
            hold_ms: timing.hold.as_millis() as u64,
            delete_step_ms: timing.delete_step.as_millis() as u64,
            roles: HeroConfig::default().roles,
        }
    }
}

/// Hero spotlight mask.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HeroPolicyConfig {
    /// Minimum mask movement in percentage points. Default: 1.
    pub threshold: f64,
}

impl Default for HeroPolicyConfig {
    fn default() -> Self {
        Self {
            threshold: HeroConfig::default().threshold,
        }
    }
}
