//! Random sources for growth rolls and sampled durations.
//!
//! Every random decision in the simulation goes through [`RandomSource`]:
//! uniform `[0, 1)` draws, bounded indices for shuffling, and samples from
//! a [`NatFloat`]. Two implementations are provided:
//!
//! - [`WorldRng`] wraps any [`rand::Rng`]. [`WorldRng::seeded`] gives a
//!   reproducible stream for a world seed.
//! - [`FixedRandom`] replays a scripted sequence of draws, so tests can pin
//!   down exactly which sites grow and which samples come out.
//!
//! The order in which entities consume draws from a shared source is not a
//! correctness property; only the per-entity logic is.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use substrate_types::NatFloat;

/// A source of randomness shared by the state machines.
pub trait RandomSource {
    /// A uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// A uniform index in `[0, bound)`. Returns 0 when `bound` is 0.
    fn next_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let draw = self.next_f64().clamp(0.0, 1.0);
        // bound is a slot/candidate count, far below 2^52.
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let index = (draw * bound as f64) as usize;
        index.min(bound.saturating_sub(1))
    }

    /// Draw a sample from a natural distribution.
    fn sample(&mut self, dist: &NatFloat) -> f32 {
        dist.sample(|| self.next_f64())
    }

    /// Shuffle `items` uniformly in place.
    ///
    /// The default is Fisher-Yates driven by [`next_below`], so scripted
    /// sources control the permutation.
    ///
    /// [`next_below`]: RandomSource::next_below
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_below(i.saturating_add(1));
            items.swap(i, j);
        }
    }
}

/// [`RandomSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct WorldRng<R = SmallRng> {
    /// The wrapped generator.
    rng: R,
}

impl WorldRng<SmallRng> {
    /// A reproducible source for the given world seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> WorldRng<R> {
    /// Wrap an existing generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for WorldRng<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_below(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// A [`RandomSource`] that replays a fixed sequence of draws, cycling when
/// it runs out. An empty sequence always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct FixedRandom {
    /// Scripted draws.
    values: Vec<f64>,
    /// Index of the next draw.
    cursor: usize,
}

impl FixedRandom {
    /// Create a source that replays `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for FixedRandom {
    fn next_f64(&mut self) -> f64 {
        let len = self.values.len();
        if len == 0 {
            return 0.0;
        }
        let value = self
            .values
            .get(self.cursor.checked_rem(len).unwrap_or(0))
            .copied()
            .unwrap_or(0.0);
        self.cursor = self.cursor.saturating_add(1);
        value
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use substrate_types::DistributionShape;

    use super::*;

    #[test]
    fn fixed_random_cycles() {
        let mut rng = FixedRandom::new([0.1, 0.2]);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.next_f64(), 0.2);
        assert_eq!(rng.next_f64(), 0.1);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn empty_fixed_random_yields_zero() {
        let mut rng = FixedRandom::default();
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.next_below(5), 0);
    }

    #[test]
    fn next_below_maps_draws_to_indices() {
        let mut rng = FixedRandom::new([0.0, 0.5, 0.999]);
        assert_eq!(rng.next_below(4), 0);
        assert_eq!(rng.next_below(4), 2);
        assert_eq!(rng.next_below(4), 3);
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn sample_uses_draws() {
        let mut rng = FixedRandom::constant(0.75);
        let nat = NatFloat::new(10.0, 4.0, DistributionShape::Uniform);
        assert_eq!(rng.sample(&nat), 12.0);
    }

    #[test]
    fn shuffle_is_deterministic_for_fixed_draws() {
        let mut a = [1, 2, 3, 4];
        let mut b = [1, 2, 3, 4];
        FixedRandom::new([0.3, 0.9, 0.1]).shuffle(&mut a);
        FixedRandom::new([0.3, 0.9, 0.1]).shuffle(&mut b);
        assert_eq!(a, b);

        let mut sorted = a;
        sorted.sort_unstable();
        assert_eq!(sorted, [1, 2, 3, 4]);
    }

    #[test]
    fn shuffle_with_zero_draws_rotates_predictably() {
        // j is always 0: each step swaps the tail element to the front.
        let mut items = [1, 2, 3];
        FixedRandom::constant(0.0).shuffle(&mut items);
        assert_eq!(items, [2, 3, 1]);
    }

    #[test]
    fn seeded_world_rng_is_reproducible() {
        let mut a = WorldRng::seeded(42);
        let mut b = WorldRng::seeded(42);
        for _ in 0..100 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
        for _ in 0..100 {
            assert!(a.next_below(7) < 7);
        }
    }

    #[test]
    fn world_rng_shuffle_is_a_reproducible_permutation() {
        let mut a: Vec<u32> = (0..16).collect();
        let mut b = a.clone();
        WorldRng::seeded(9).shuffle(&mut a);
        WorldRng::seeded(9).shuffle(&mut b);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<u32>>());
    }
}
