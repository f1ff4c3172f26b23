use super::ConfigError;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Per-operation mutation probabilities.
///
/// # Note
/// All quantities should be in the range [0.0, 1.0].
/// [`NetworkConfig::validate`] rejects anything else.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MutationRates {
    /// Chance that a candidate connection is split by
    /// a new hidden node during a node addition mutation.
    pub node_addition: f32,
    /// Chance that a hidden node re-rolls its activation
    /// function during a function mutation.
    pub node_function_change: f32,
    /// Chance that a connection's weight is perturbed
    /// at the start of every mutation.
    pub weight_change: f32,
    /// Chance that a missing input connection is added
    /// during a connection addition mutation.
    pub connection_addition: f32,
}

impl MutationRates {
    /// Returns rates that never mutate anything.
    pub const fn zero() -> MutationRates {
        MutationRates {
            node_addition: 0.0,
            node_function_change: 0.0,
            weight_change: 0.0,
            connection_addition: 0.0,
        }
    }

    fn named(&self) -> [(&'static str, f32); 4] {
        [
            ("node_addition", self.node_addition),
            ("node_function_change", self.node_function_change),
            ("weight_change", self.weight_change),
            ("connection_addition", self.connection_addition),
        ]
    }
}

/// Construction parameters of a [`Network`].
///
/// A network never changes shape after creation, so every
/// genome of an evolutionary run should share one configuration.
///
/// [`Network`]: crate::genomics::Network
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of input nodes.
    pub input_count: NonZeroUsize,
    /// Number of output nodes.
    pub output_count: NonZeroUsize,
    /// Upper bound on the total node count, hidden nodes included.
    pub max_size: usize,
    /// Mutation probabilities.
    pub mutation_rates: MutationRates,
    /// Magnitude bound of initial connection weights. Weight
    /// perturbations use a step of a quarter of this value.
    pub weight_bound: f32,
}

impl NetworkConfig {
    /// Returns a "zero-valued" default configuration: one input,
    /// one output, no room for hidden nodes, no mutations and
    /// a unit weight bound.
    ///
    /// # Note
    /// This value is not suitable for most experiments. It is
    /// meant as a way to fill in unused values during
    /// configuration instantiation.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::NetworkConfig;
    ///
    /// let config = NetworkConfig {
    ///     max_size: 16,
    ///     weight_bound: 30.0,
    ///     ..NetworkConfig::zero()
    /// };
    /// assert!(config.validate().is_ok());
    /// ```
    pub const fn zero() -> NetworkConfig {
        NetworkConfig {
            input_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
            max_size: 2,
            mutation_rates: MutationRates::zero(),
            weight_bound: 1.0,
        }
    }

    /// Number of input and output nodes, which every
    /// network of this configuration always has.
    pub fn io_count(&self) -> usize {
        self.input_count.get() + self.output_count.get()
    }

    /// Checks that the configuration describes a
    /// constructible network.
    ///
    /// # Errors
    /// Returns an error if `max_size` cannot hold the input and
    /// output nodes, if the weight bound is not a positive finite
    /// number, or if any mutation rate lies outside [0.0, 1.0].
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::NetworkConfig;
    ///
    /// let config = NetworkConfig {
    ///     max_size: 1,
    ///     ..NetworkConfig::zero()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size < self.io_count() {
            return Err(ConfigError::MaxSizeTooSmall {
                max_size: self.max_size,
                required: self.io_count(),
            });
        }
        if !(self.weight_bound.is_finite() && self.weight_bound > 0.0) {
            return Err(ConfigError::InvalidWeightBound(self.weight_bound));
        }
        match self
            .mutation_rates
            .named()
            .into_iter()
            .find(|(_, rate)| !(0.0..=1.0).contains(rate))
        {
            Some((name, rate)) => Err(ConfigError::RateOutOfRange(name, rate)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_valid() {
        assert!(NetworkConfig::zero().validate().is_ok());
    }

    #[test]
    fn invalid_weight_bounds() {
        for bound in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let config = NetworkConfig {
                weight_bound: bound,
                ..NetworkConfig::zero()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidWeightBound(_))
            ));
        }
    }

    #[test]
    fn rate_out_of_range() {
        let config = NetworkConfig {
            mutation_rates: MutationRates {
                weight_change: 1.5,
                ..MutationRates::zero()
            },
            ..NetworkConfig::zero()
        };
        match config.validate() {
            Err(ConfigError::RateOutOfRange(name, rate)) => {
                assert_eq!(name, "weight_change");
                assert_eq!(rate, 1.5);
            }
            other => panic!("unexpected validation result {:?}", other),
        }
    }

    #[test]
    fn max_size_too_small() {
        let config = NetworkConfig {
            input_count: NonZeroUsize::new(4).unwrap(),
            output_count: NonZeroUsize::new(3).unwrap(),
            max_size: 6,
            ..NetworkConfig::zero()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MaxSizeTooSmall {
                max_size: 6,
                required: 7
            })
        ));
    }

    #[test]
    fn from_json() {
        let config: NetworkConfig = serde_json::from_str(
            r#"{
                "input_count": 6,
                "output_count": 4,
                "max_size": 20,
                "mutation_rates": {
                    "node_addition": 0.05,
                    "node_function_change": 0.1,
                    "weight_change": 0.8,
                    "connection_addition": 0.1
                },
                "weight_bound": 30.0
            }"#,
        )
        .unwrap();
        assert_eq!(config.input_count.get(), 6);
        assert_eq!(config.output_count.get(), 4);
        assert_eq!(config.io_count(), 10);
        assert_eq!(config.mutation_rates.weight_change, 0.8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_input_count_is_rejected_by_serde() {
        let parsed = serde_json::from_str::<NetworkConfig>(
            r#"{
                "input_count": 0,
                "output_count": 1,
                "max_size": 2,
                "mutation_rates": {
                    "node_addition": 0.0,
                    "node_function_change": 0.0,
                    "weight_change": 0.0,
                    "connection_addition": 0.0
                },
                "weight_bound": 1.0
            }"#,
        );
        assert!(parsed.is_err());
    }
}
