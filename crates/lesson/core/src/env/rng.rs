//! Injected randomness and id generation.
//!
//! The engine never owns a source of entropy. The host passes an [`RngOracle`]
//! and an [`IdGenerator`]; both are called synchronously and in a fixed order,
//! so replaying the same sequence reproduces the same update log.
//!
//! # Determinism
//!
//! Implementations must be deterministic: given the same seed they must produce
//! the same sequence of values. Closures can be passed directly, which keeps
//! scripted test sequences short.

/// Source of uniformly distributed floats in `[0, 1)`.
pub trait RngOracle {
    /// Returns the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Returns an index in `0..len`. `len` must be non-zero.
    fn below(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    /// Returns true with the given probability in percent.
    fn chance(&mut self, percent: u32) -> bool {
        self.next_f64() < f64::from(percent) / 100.0
    }
}

impl<F> RngOracle for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Same seed, same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        Self {
            state: Self::pcg_step(seed.wrapping_add(Self::INCREMENT)),
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

    pub fn next_u32(&mut self) -> u32 {
        let output = Self::pcg_output(self.state);
        self.state = Self::pcg_step(self.state);
        output
    }
}

impl RngOracle for PcgRng {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }
}

/// Source of unique instance ids for cards, modifiers, items and drinks.
pub trait IdGenerator {
    fn next_id(&mut self) -> u32;
}

impl<F> IdGenerator for F
where
    F: FnMut() -> u32,
{
    fn next_id(&mut self) -> u32 {
        self()
    }
}

/// Monotonic counter starting at a given value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic_and_in_range() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);

        for _ in 0..256 {
            let value = a.next_f64();
            assert_eq!(value, b.next_f64());
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn below_never_reaches_len() {
        let mut almost_one = || 0.999_999_999_f64;
        assert_eq!(almost_one.below(4), 3);

        let mut zero = || 0.0_f64;
        assert_eq!(zero.below(4), 0);
    }

    #[test]
    fn sequential_ids_increase() {
        let mut ids = SequentialIds::starting_at(10);
        assert_eq!(ids.next_id(), 10);
        assert_eq!(ids.next_id(), 11);
    }
}
