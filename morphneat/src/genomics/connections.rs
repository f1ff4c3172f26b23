use crate::rng::RandomSource;
use crate::Innovation;

use std::fmt;

/// A directed, weighted edge between two nodes of the same
/// network, identified by its innovation number.
///
/// Endpoints are node indices into the owning network, and
/// connections are stored in their destination node's
/// incoming list.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    source: usize,
    destination: usize,
    weight: f32,
    mutation_probability: f32,
    innovation: Innovation,
}

impl Connection {
    /// Returns a new connection with the specified weight.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::Connection;
    ///
    /// let connection = Connection::new(0, 3, 7, 1.5, 0.8);
    /// assert_eq!(connection.endpoints(), (0, 3));
    /// assert_eq!(connection.innovation(), 7);
    /// assert_eq!(connection.weight(), 1.5);
    /// ```
    pub fn new(
        source: usize,
        destination: usize,
        innovation: Innovation,
        weight: f32,
        mutation_probability: f32,
    ) -> Connection {
        Connection {
            source,
            destination,
            weight,
            mutation_probability,
            innovation,
        }
    }

    /// Returns a new connection with a weight drawn uniformly
    /// from `[-weight_bound, weight_bound)`.
    pub fn with_random_weight(
        source: usize,
        destination: usize,
        innovation: Innovation,
        weight_bound: f32,
        mutation_probability: f32,
        rng: &mut impl RandomSource,
    ) -> Connection {
        let weight = rng.symmetric(weight_bound);
        Self::new(source, destination, innovation, weight, mutation_probability)
    }

    /// With the connection's mutation probability, adds a value
    /// drawn uniformly from `[-step, step)` to the weight.
    ///
    /// The result is not clamped, so weights can creep beyond
    /// the bound they were initialized in.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::Connection;
    /// use morphneat::rng::Scripted;
    ///
    /// let mut connection = Connection::new(0, 1, 0, 29.0, 1.0);
    ///
    /// // Pass the chance check, then draw the top of the range.
    /// connection.perturb_weight(7.5, &mut Scripted::new(vec![0.0, 0.999]));
    ///
    /// assert!(connection.weight() > 36.0);
    /// ```
    pub fn perturb_weight(&mut self, step: f32, rng: &mut impl RandomSource) {
        if rng.chance(self.mutation_probability) {
            self.weight += rng.symmetric(step);
        }
    }

    /// Returns the connection's innovation number.
    pub fn innovation(&self) -> Innovation {
        self.innovation
    }

    /// Returns the source node's index.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the destination node's index.
    pub fn destination(&self) -> usize {
        self.destination
    }

    /// Returns `(source, destination)`.
    pub fn endpoints(&self) -> (usize, usize) {
        (self.source, self.destination)
    }

    /// Returns the connection's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the chance of weight perturbation.
    pub fn mutation_probability(&self) -> f32 {
        self.mutation_probability
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}[{:?}->{:?}, {:.3}]",
            self.innovation, self.source, self.destination, self.weight,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngSource, Scripted};

    #[test]
    fn random_weight_within_bound() {
        let mut rng = RngSource::seeded(1);
        for _ in 0..500 {
            let connection = Connection::with_random_weight(0, 1, 0, 30.0, 0.5, &mut rng);
            assert!(connection.weight().abs() <= 30.0);
        }
    }

    #[test]
    fn perturb_exact() {
        let mut connection = Connection::new(0, 1, 0, 1.0, 0.5);
        // 0.25 < 0.5 passes, 0.75 maps to half the step.
        connection.perturb_weight(2.0, &mut Scripted::new(vec![0.25, 0.75]));
        assert_eq!(connection.weight(), 2.0);
    }

    #[test]
    fn perturb_skipped() {
        let mut connection = Connection::new(0, 1, 0, 1.0, 0.5);
        let mut script = Scripted::new(vec![0.5, 0.0]);
        connection.perturb_weight(2.0, &mut script);
        assert_eq!(connection.weight(), 1.0);
        // Only the chance check was drawn.
        assert_eq!(script.drawn(), 1);
    }

    #[test]
    fn perturb_drifts_past_bound() {
        let mut connection = Connection::new(0, 1, 0, 1.0, 1.0);
        let mut script = Scripted::new(vec![0.0, 0.99]);
        for _ in 0..10 {
            connection.perturb_weight(0.25, &mut script);
        }
        assert!(connection.weight() > 3.0, "{}", connection.weight());
    }

    #[test]
    fn display() {
        let connection = Connection::new(2, 5, 11, -0.5, 0.1);
        assert_eq!(connection.to_string(), "11[2->5, -0.500]");
    }
}
