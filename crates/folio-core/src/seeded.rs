#![forbid(unsafe_code)]

//! Deterministic pseudo-random numbers for decorative layout.
//!
//! Background particles and orbs are placed from an integer seed so the page
//! renders the same on every load (and on server and client alike). This is
//! a 64-bit LCG with the output taken from the high bits; it is not suitable
//! for anything security related.

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

/// Seeded 64-bit linear congruential generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a generator from `seed`.
    ///
    /// The seed is scrambled once so that small consecutive seeds do not
    /// produce correlated first outputs.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: scramble(seed),
        };
        rng.next_u64();
        rng
    }

    /// Generator for element `index` of a family seeded with `seed`.
    #[must_use]
    pub fn for_index(seed: u64, index: u64) -> Self {
        Self::new(seed ^ scramble(index.wrapping_add(1)))
    }

    /// Advance and return the next raw value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Uniform value in `[0, 1)` built from the top 53 bits.
    pub fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[lo, hi)`. Swapped bounds are accepted.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        lo + (hi - lo) * self.next_unit()
    }
}

/// SplitMix64 finalizer.
fn scramble(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
