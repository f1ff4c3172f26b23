//! Randomness used by genome construction and mutation.
//!
//! Every probabilistic decision in the engine goes through a
//! [`RandomSource`], so experiments can plug in any `rand` generator
//! through [`RngSource`] and tests can replay exact sequences through
//! [`Scripted`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed values in `[0, 1)`,
/// from which all other random decisions are derived.
pub trait RandomSource {
    /// Returns a value in `[0, 1)`.
    fn unit(&mut self) -> f32;

    /// Returns `true` with the given probability.
    ///
    /// A probability of 0 never succeeds, 1 always does.
    fn chance(&mut self, probability: f32) -> bool {
        self.unit() < probability
    }

    /// Returns a value in `[-bound, bound)`.
    fn symmetric(&mut self, bound: f32) -> f32 {
        (self.unit() * 2.0 - 1.0) * bound
    }

    /// Returns an index in `0..len`.
    ///
    /// # Panics
    /// This function panics if `len` is zero.
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "random index requested from an empty range");
        ((self.unit() * len as f32) as usize).min(len - 1)
    }
}

/// Simple wrapper for a T: Rng, so generators can be
/// handed to the engine as a [`RandomSource`].
///
/// # Examples
/// ```
/// use morphneat::rng::{RandomSource, RngSource};
///
/// let mut rng = RngSource::seeded(42);
/// let value = rng.symmetric(3.0);
/// assert!((-3.0..3.0).contains(&value));
/// ```
#[derive(Clone, Debug)]
pub struct RngSource<R: Rng>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> RngSource<R> {
        RngSource(rng)
    }

    /// Returns the wrapped generator.
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl RngSource<StdRng> {
    /// A reproducible source seeded with `seed`.
    pub fn seeded(seed: u64) -> RngSource<StdRng> {
        RngSource(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from the operating system.
    pub fn from_entropy() -> RngSource<StdRng> {
        RngSource(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

/// Replays a fixed sequence of unit values, wrapping around
/// when the end is reached.
///
/// # Examples
/// ```
/// use morphneat::rng::{RandomSource, Scripted};
///
/// let mut script = Scripted::new(vec![0.1, 0.9]);
/// assert!(script.chance(0.5));
/// assert!(!script.chance(0.5));
/// // Wrapped around to 0.1.
/// assert_eq!(script.index(10), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Scripted {
    values: Vec<f32>,
    position: usize,
}

impl Scripted {
    /// # Panics
    /// This function panics if `values` is empty or
    /// any value lies outside `[0, 1)`.
    pub fn new(values: impl Into<Vec<f32>>) -> Scripted {
        let values = values.into();
        assert!(!values.is_empty(), "scripted source needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted values must lie in [0, 1): {:?}",
            values
        );
        Scripted {
            values,
            position: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn drawn(&self) -> usize {
        self.position
    }
}

impl RandomSource for Scripted {
    fn unit(&mut self) -> f32 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chance_bounds() {
        let mut rng = RngSource::seeded(3);
        assert!((0..1000).all(|_| !rng.chance(0.0)));
        assert!((0..1000).all(|_| rng.chance(1.0)));
    }

    #[test]
    fn symmetric_range() {
        let mut rng = RngSource::seeded(11);
        for _ in 0..1000 {
            let value = rng.symmetric(2.5);
            assert!((-2.5..2.5).contains(&value), "{}", value);
        }
    }

    #[test]
    fn index_covers_range() {
        let mut rng = RngSource::seeded(5);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            seen[rng.index(8)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn scripted_replay() {
        let mut script = Scripted::new(vec![0.0, 0.5, 0.75]);
        assert_eq!(script.symmetric(2.0), -2.0);
        assert_eq!(script.symmetric(2.0), 0.0);
        assert_eq!(script.symmetric(2.0), 1.0);
        assert_eq!(script.index(3), 0);
        assert_eq!(script.drawn(), 4);
    }

    #[test]
    #[should_panic]
    fn scripted_rejects_out_of_range() {
        Scripted::new(vec![1.0]);
    }

    #[test]
    #[should_panic]
    fn index_of_empty_range() {
        Scripted::new(vec![0.3]).index(0);
    }
}
