//! RNG oracle for the probabilistic parts of a step.
//!
//! The engine never owns a generator. Each step receives a `seed` from its
//! caller and derives one sub-seed per roll through [`compute_seed`], so a
//! step is a pure function of `(state, scanned code, seed)`.
//!
//! # Determinism
//!
//! All implementations must be deterministic: given the same seed they must
//! produce the same value. Tests rely on this to replay exact outcomes.

/// Independent rolls made within one step. Each gets its own sub-seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    /// Whether a grant window hands out a metal at all.
    GrantChance = 0,
    /// Which metal of the pair is handed out.
    GrantPick = 1,
    /// Which of the target's metals is taken in the grab phase.
    GrabPick = 2,
}

/// RNG oracle for deterministic random number generation.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Bernoulli trial that succeeds `percent` times in a hundred.
    ///
    /// 0 never succeeds and 100 (or more) always does.
    fn chance(&self, seed: u64, percent: u32) -> bool {
        percent >= 100 || (percent > 0 && self.roll_d100(seed) <= percent)
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&self, seed: u64, len: usize) -> usize {
        debug_assert!(len > 0, "pick from an empty range");
        (self.next_u32(seed) as usize) % len.max(1)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Stateless here; the state is
/// the seed passed in.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Derive the sub-seed for one roll of a step.
///
/// * `step_seed` - seed handed to the step by its caller
/// * `level` - level the roll is made for (grant windows roll per level)
/// * `context` - which roll within the step
pub fn compute_seed(step_seed: u64, level: i64, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style combiners followed by a murmur3 finalizer
    let mut hash = step_seed;
    hash ^= (level as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x517cc1b727220a95);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(
            compute_seed(7, 8, RollContext::GrantChance),
            compute_seed(7, 8, RollContext::GrantPick)
        );
    }

    #[test]
    fn chance_bounds_are_absolute() {
        let rng = PcgRng;
        for seed in 0..1_000u64 {
            assert!(rng.chance(seed, 100));
            assert!(!rng.chance(seed, 0));
        }
    }

    #[test]
    fn partial_chance_is_neither_always_nor_never() {
        let rng = PcgRng;
        let hits = (0..1_000u64)
            .filter(|seed| rng.chance(compute_seed(*seed, 8, RollContext::GrantChance), 60))
            .count();
        assert!(hits > 0 && hits < 1_000, "hits = {hits}");
    }

    #[test]
    fn pick_stays_in_range() {
        let rng = PcgRng;
        for seed in 0..500u64 {
            assert!(rng.pick(seed, 3) < 3);
        }
    }
}
