#![forbid(unsafe_code)]

//! Typewriter cycling through a list of roles.
//!
//! The hero headline types a role one grapheme at a time, holds it, deletes
//! it faster than it was typed, and moves on to the next role, forever.
//!
//! ```text
//! Typing ──(role fully shown)──▶ Holding ──(hold elapsed)──▶ Deleting
//!   ▲                                                            │
//!   └──────────────(text empty, next role)──────────────────────┘
//! ```
//!
//! Text is split on extended grapheme clusters, so emoji and combining marks
//! appear and disappear whole.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use super::Animation;

/// Shortest step accepted for any phase.
const MIN_STEP: Duration = Duration::from_millis(1);

/// Per-phase durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    /// Delay before each typed grapheme.
    pub type_step: Duration,
    /// How long a fully typed role stays on screen.
    pub hold: Duration,
    /// Delay before each deleted grapheme.
    pub delete_step: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_step: Duration::from_millis(100),
            hold: Duration::from_millis(2000),
            delete_step: Duration::from_millis(50),
        }
    }
}

impl TypewriterTiming {
    fn sanitized(self) -> Self {
        Self {
            type_step: self.type_step.max(MIN_STEP),
            hold: self.hold,
            delete_step: self.delete_step.max(MIN_STEP),
        }
    }
}

/// Current phase of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterPhase {
    Typing,
    Holding,
    Deleting,
}

/// One role with its grapheme boundaries precomputed.
#[derive(Debug, Clone)]
struct Role {
    text: String,
    /// Byte offset after each grapheme.
    ends: Vec<usize>,
}

impl Role {
    fn new(text: String) -> Self {
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self { text, ends }
    }

    fn len(&self) -> usize {
        self.ends.len()
    }

    fn prefix(&self, graphemes: usize) -> &str {
        let end = match graphemes.min(self.ends.len()) {
            0 => 0,
            n => self.ends[n - 1],
        };
        &self.text[..end]
    }
}

/// Types, holds, and deletes roles in a loop.
#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: Vec<Role>,
    timing: TypewriterTiming,
    role: usize,
    shown: usize,
    phase: TypewriterPhase,
    /// Time accumulated toward the next step of the current phase.
    pending: Duration,
    /// Completed type/hold/delete cycles.
    cycles: u64,
}

impl Typewriter {
    /// Create a typewriter over `roles` with default timing.
    #[must_use]
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(|r| Role::new(r.into())).collect(),
            timing: TypewriterTiming::default(),
            role: 0,
            shown: 0,
            phase: TypewriterPhase::Typing,
            pending: Duration::ZERO,
            cycles: 0,
        }
    }

    /// Override timing (builder). Step durations are clamped to at least 1 ms.
    #[must_use]
    pub fn with_timing(mut self, timing: TypewriterTiming) -> Self {
        self.timing = timing.sanitized();
        self
    }

    /// Text currently on screen.
    #[must_use]
    pub fn text(&self) -> &str {
        self.roles
            .get(self.role)
            .map_or("", |role| role.prefix(self.shown))
    }

    /// Index of the role being typed or deleted.
    #[must_use]
    pub fn role_index(&self) -> usize {
        self.role
    }

    #[must_use]
    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Number of roles fully typed and deleted so far.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether the cursor should be drawn solid (typing or deleting) rather
    /// than blinking (holding).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.roles.is_empty() && self.phase != TypewriterPhase::Holding
    }

    fn step_duration(&self) -> Duration {
        match self.phase {
            TypewriterPhase::Typing => self.timing.type_step,
            TypewriterPhase::Holding => self.timing.hold,
            TypewriterPhase::Deleting => self.timing.delete_step,
        }
    }

    fn current_len(&self) -> usize {
        self.roles.get(self.role).map_or(0, Role::len)
    }

    /// Apply one step of the current phase.
    fn step(&mut self) {
        match self.phase {
            TypewriterPhase::Typing => {
                if self.shown < self.current_len() {
                    self.shown += 1;
                }
                if self.shown >= self.current_len() {
                    self.phase = TypewriterPhase::Holding;
                }
            }
            TypewriterPhase::Holding => {
                self.phase = TypewriterPhase::Deleting;
            }
            TypewriterPhase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.role = (self.role + 1) % self.roles.len();
                    self.cycles = self.cycles.saturating_add(1);
                    self.phase = TypewriterPhase::Typing;
                }
            }
        }
    }
}

impl Animation for Typewriter {
    fn tick(&mut self, dt: Duration) {
        if self.roles.is_empty() {
            return;
        }
        self.pending = self.pending.saturating_add(dt);
        loop {
            let step = self.step_duration();
            if self.pending < step {
                break;
            }
            self.pending -= step;
            self.step();
        }
    }

    /// A typewriter loops forever; only an empty role list is complete.
    fn is_complete(&self) -> bool {
        self.roles.is_empty()
    }

    /// Fraction of the current role on screen.
    fn value(&self) -> f32 {
        match self.current_len() {
            0 => 0.0,
            len => self.shown as f32 / len as f32,
        }
    }

    fn reset(&mut self) {
        self.role = 0;
        self.shown = 0;
        self.phase = TypewriterPhase::Typing;
        self.pending = Duration::ZERO;
        self.cycles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn types_one_grapheme_per_step() {
        let mut tw = Typewriter::new(["Rust"]);
        assert_eq!(tw.text(), "");
        tw.tick(ms(100));
        assert_eq!(tw.text(), "R");
        tw.tick(ms(250));
        assert_eq!(tw.text(), "Rus");
        assert_eq!(tw.phase(), TypewriterPhase::Typing);
    }

    #[test]
    fn holds_then_deletes_faster() {
        let mut tw = Typewriter::new(["ab", "xyz"]);
        tw.tick(ms(200));
        assert_eq!(tw.text(), "ab");
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
        assert!(!tw.is_active());

        tw.tick(ms(1999));
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
        tw.tick(ms(1));
        assert_eq!(tw.phase(), TypewriterPhase::Deleting);

        tw.tick(ms(50));
        assert_eq!(tw.text(), "a");
        tw.tick(ms(50));
        assert_eq!(tw.text(), "");
        assert_eq!(tw.role_index(), 1);
        assert_eq!(tw.phase(), TypewriterPhase::Typing);
        assert_eq!(tw.cycles(), 1);
    }

    #[test]
    fn wraps_back_to_first_role() {
        let mut tw = Typewriter::new(["a", "b"]);
        // a: type 100, hold 2000, delete 50; b: same.
        tw.tick(ms(2 * 2150));
        assert_eq!(tw.role_index(), 0);
        assert_eq!(tw.cycles(), 2);
    }

    #[test]
    fn graphemes_are_atomic() {
        let mut tw = Typewriter::new(["e\u{301}👩‍💻"]);
        tw.tick(ms(100));
        assert_eq!(tw.text(), "e\u{301}");
        tw.tick(ms(100));
        assert_eq!(tw.text(), "e\u{301}👩‍💻");
        assert_eq!(tw.phase(), TypewriterPhase::Holding);
    }

    #[test]
    fn value_tracks_fraction_shown() {
        let mut tw = Typewriter::new(["abcd"]);
        tw.tick(ms(200));
        assert_eq!(tw.value(), 0.5);
    }

    #[test]
    fn empty_role_list_is_inert() {
        let mut tw = Typewriter::new(Vec::<String>::new());
        tw.tick(ms(10_000));
        assert_eq!(tw.text(), "");
        assert!(tw.is_complete());
        assert_eq!(tw.value(), 0.0);
    }

    #[test]
    fn custom_timing_and_reset() {
        let timing = TypewriterTiming {
            type_step: ms(10),
            hold: ms(0),
            delete_step: Duration::ZERO,
        };
        let mut tw = Typewriter::new(["hi"]).with_timing(timing);
        tw.tick(ms(20));
        assert_eq!(tw.text(), "hi");
        tw.reset();
        assert_eq!(tw.text(), "");
        assert_eq!(tw.cycles(), 0);
    }
}
