//! Seedable random source for deterministic generation.
//!
//! This module provides a trait-based RNG system: every consumer receives the
//! generator explicitly (`&mut impl RandomSource`), there is no ambient global.
//!
//! # Determinism
//!
//! Given the same seed, a [`PcgRng`] produces the same sequence of values.
//! Its complete state fits in an [`RngState`], which can be captured at any
//! point and restored later to replay the exact same future draws.

/// Uniform random source consumed by map generation and placement.
pub trait RandomSource {
    /// Generate the next raw 32-bit value and advance the state.
    fn next_u32(&mut self) -> u32;

    /// Uniform float in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in `[min, max]` inclusive. Returns `min` when the
    /// range is empty or inverted.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = f64::from(max) - f64::from(min) + 1.0;
        let offset = (self.uniform() * span).floor() as i64;
        (i64::from(min) + offset).min(i64::from(max)) as i32
    }

    /// True with probability `probability` (clamped to `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability.clamp(0.0, 1.0)
    }

    /// Picks an index into a collection of `len` elements.
    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let max = i32::try_from(len - 1).unwrap_or(i32::MAX);
        usize::try_from(self.uniform_int(0, max)).ok()
    }
}

/// Bit-exact capture of a [`PcgRng`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngState {
    /// Seed the generator was created from.
    pub seed: u64,
    /// Internal LCG state at capture time.
    pub state: u64,
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: 64 bits, snapshot and restore are plain copies
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    seed: u64,
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator following the reference PCG seeding procedure.
    pub fn new(seed: u64) -> Self {
        let mut state = Self::pcg_step(0);
        state = state.wrapping_add(mix_seed(seed));
        state = Self::pcg_step(state);
        Self { seed, state }
    }

    /// Seed the generator was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Captures the full generator state.
    pub fn snapshot(&self) -> RngState {
        RngState {
            seed: self.seed,
            state: self.state,
        }
    }

    /// Restores a previously captured state; subsequent draws replay exactly.
    pub fn restore(&mut self, snapshot: RngState) {
        self.seed = snapshot.seed;
        self.state = snapshot.state;
    }

    /// Rebuilds a generator from a captured state.
    pub fn from_snapshot(snapshot: RngState) -> Self {
        Self {
            seed: snapshot.seed,
            state: snapshot.state,
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// SplitMix64 finaliser so that nearby seeds (consecutive timestamps) start
/// far apart in the sequence.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d049bb133111eb);
    hash ^ (hash >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::new(42);
        let mut b = PcgRng::new(42);
        let first: Vec<u32> = (0..16).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..16).map(|_| b.next_u32()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::new(1);
        let mut b = PcgRng::new(2);
        let first: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let second: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(first, second);
    }

    #[test]
    fn restore_replays_future_draws() {
        let mut rng = PcgRng::new(7);
        for _ in 0..5 {
            rng.next_u32();
        }
        let saved = rng.snapshot();
        let expected: Vec<i32> = (0..32).map(|_| rng.uniform_int(-3, 17)).collect();

        rng.restore(saved);
        let replayed: Vec<i32> = (0..32).map(|_| rng.uniform_int(-3, 17)).collect();
        assert_eq!(expected, replayed);

        let mut rebuilt = PcgRng::from_snapshot(saved);
        assert_eq!(rebuilt.uniform_int(-3, 17), expected[0]);
    }

    #[test]
    fn uniform_int_stays_in_range() {
        let mut rng = PcgRng::new(99);
        for _ in 0..1_000 {
            let value = rng.uniform_int(2, 5);
            assert!((2..=5).contains(&value));
        }
        assert_eq!(rng.uniform_int(4, 4), 4);
        assert_eq!(rng.uniform_int(9, 1), 9);
    }

    #[test]
    fn uniform_is_half_open() {
        let mut rng = PcgRng::new(3);
        for _ in 0..1_000 {
            let value = rng.uniform();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn chance_extremes_are_certain() {
        let mut rng = PcgRng::new(11);
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!((0..100).all(|_| rng.chance(1.0)));
    }
}
