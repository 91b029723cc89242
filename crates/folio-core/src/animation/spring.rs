#![forbid(unsafe_code)]

//! Damped spring that follows a moving target.
//!
//! The loader's progress lines do not jump to their new length when overall
//! progress advances; each line chases its target through a spring:
//!
//!   a = -stiffness × (position - target) - damping × velocity
//!
//! # Invariants
//!
//! 1. Stiffness is at least [`MIN_STIFFNESS`], damping at least 0.
//! 2. A spring at rest stays put until [`Spring::set_target`] moves the target
//!    by more than the rest threshold, or [`Spring::impulse`] is applied.
//! 3. [`Animation::value`] is the position clamped to `[0, 1]`;
//!    [`Spring::position`] is unclamped.
//!
//! # Failure Modes
//!
//! Long frames are integrated in sub-steps of at most 4 ms, so a stalled tab
//! resuming with a multi-second `dt` converges instead of exploding.

use std::time::Duration;

use super::Animation;

/// Largest single integration step, in seconds.
const MAX_STEP_SECS: f64 = 0.004;

/// Lower bound on stiffness; below this a spring never meaningfully moves.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Loader line stiffness.
pub const LOADER_STIFFNESS: f64 = 80.0;

/// Loader line damping (overdamped for this stiffness: no bounce).
pub const LOADER_DAMPING: f64 = 25.0;

const REST_DELTA: f64 = 0.001;
const REST_SPEED: f64 = 0.01;

/// A damped spring chasing `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    stiffness: f64,
    damping: f64,
    at_rest: bool,
}

impl Spring {
    /// A spring at rest at `initial` (target equals position).
    ///
    /// Uses the loader's stiffness and damping.
    #[must_use]
    pub fn at(initial: f64) -> Self {
        Self {
            position: initial,
            velocity: 0.0,
            target: initial,
            initial,
            stiffness: LOADER_STIFFNESS,
            damping: LOADER_DAMPING,
            at_rest: true,
        }
    }

    /// A spring starting at `initial` heading to `target`.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        let mut spring = Self::at(initial);
        spring.target = target;
        spring.at_rest = (target - initial).abs() < REST_DELTA;
        spring
    }

    /// Set stiffness (builder). Clamped to [`MIN_STIFFNESS`].
    #[must_use]
    pub fn with_stiffness(mut self, stiffness: f64) -> Self {
        self.stiffness = stiffness.max(MIN_STIFFNESS);
        self
    }

    /// Set damping (builder). Clamped to 0.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping.max(0.0);
        self
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    #[inline]
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Damping at which the spring settles fastest without overshoot.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.sqrt()
    }

    /// Move the target. Ignored if the change is below the rest threshold.
    pub fn set_target(&mut self, target: f64) {
        if !target.is_finite() {
            return;
        }
        if (self.target - target).abs() >= REST_DELTA {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Add to the velocity and wake the spring.
    pub fn impulse(&mut self, velocity_delta: f64) {
        self.velocity += velocity_delta;
        self.at_rest = false;
    }

    fn integrate(&mut self, dt: f64) {
        let accel =
            -self.stiffness * (self.position - self.target) - self.damping * self.velocity;
        self.velocity += accel * dt;
        self.position += self.velocity * dt;
    }

    fn settle_if_resting(&mut self) {
        if (self.position - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.position = self.target;
            self.velocity = 0.0;
            self.at_rest = true;
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            self.integrate(step);
            remaining -= step;
        }
        self.settle_if_resting();
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    fn value(&self) -> f32 {
        (self.position as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = 0.0;
        self.at_rest = (self.target - self.initial).abs() < REST_DELTA;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn run(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(MS_16);
        }
    }

    #[test]
    fn spring_reaches_target() {
        let mut spring = Spring::new(0.0, 1.0);
        run(&mut spring, 240);
        assert!(spring.is_complete());
        assert_eq!(spring.position(), 1.0);
    }

    #[test]
    fn spring_at_starts_resting() {
        let spring = Spring::at(0.3);
        assert!(spring.is_complete());
        assert_eq!(spring.target(), 0.3);
    }

    #[test]
    fn loader_spring_does_not_overshoot() {
        let mut spring = Spring::new(0.0, 1.0);
        assert!(spring.damping() > spring.critical_damping());
        for _ in 0..300 {
            spring.tick(MS_16);
            assert!(spring.position() <= 1.0 + 1e-9, "{}", spring.position());
        }
    }

    #[test]
    fn moving_target_wakes_and_follows() {
        let mut spring = Spring::at(0.0);
        spring.set_target(0.5);
        assert!(!spring.is_complete());
        run(&mut spring, 30);
        let halfway = spring.position();
        assert!(halfway > 0.0 && halfway < 0.5, "{halfway}");
        spring.set_target(1.0);
        run(&mut spring, 300);
        assert_eq!(spring.position(), 1.0);
    }

    #[test]
    fn tiny_target_change_is_ignored() {
        let mut spring = Spring::at(1.0);
        spring.set_target(1.0 + REST_DELTA / 2.0);
        assert!(spring.is_complete());
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut spring = Spring::at(0.2);
        spring.set_target(f64::NAN);
        assert_eq!(spring.target(), 0.2);
    }

    #[test]
    fn large_dt_is_subdivided() {
        let mut spring = Spring::new(0.0, 1.0);
        spring.tick(Duration::from_secs(10));
        assert!((spring.position() - 1.0).abs() < 0.01);
    }

    #[test]
    fn bouncy_spring_overshoots_but_value_clamps() {
        let mut spring = Spring::new(0.0, 1.0).with_stiffness(300.0).with_damping(10.0);
        let mut max = 0.0_f64;
        for _ in 0..200 {
            spring.tick(MS_16);
            max = max.max(spring.position());
            assert!((0.0..=1.0).contains(&spring.value()));
        }
        assert!(max > 1.0);
    }

    #[test]
    fn impulse_wakes_resting_spring() {
        let mut spring = Spring::at(0.0);
        spring.impulse(5.0);
        spring.tick(MS_16);
        assert!(spring.position() > 0.0);
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut spring = Spring::new(0.0, 1.0);
        run(&mut spring, 50);
        spring.reset();
        assert_eq!(spring.position(), 0.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(!spring.is_complete());
    }

    #[test]
    fn parameters_are_clamped() {
        let spring = Spring::at(0.0).with_stiffness(0.0).with_damping(-3.0);
        assert_eq!(spring.stiffness(), MIN_STIFFNESS);
        assert_eq!(spring.damping(), 0.0);
    }
}
