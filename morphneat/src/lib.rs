//! # MorphNEAT
//! A historical-marking genome engine for the small feed-forward networks
//! that drive evolved soft-body creatures.
//!
//! Each [`Network`] is both a genome and its own phenotype: nodes live in a
//! single arena and connections refer to them by index, so genomes can be
//! cloned, crossed over and rebuilt freely. Structural mutations are
//! numbered through an [`InnovationRegistry`] shared by a whole evolutionary
//! run, which is what allows genomes evolved independently to be aligned
//! gene-by-gene during crossover and compared during speciation.
//!
//! The physics simulation, the controller that turns network outputs into
//! actuator commands, and the population loop that decides who breeds are
//! left to the embedding application.
//!
//! [`Network`]: crate::genomics::Network
//! [`InnovationRegistry`]: crate::genomics::InnovationRegistry
//!
//! # Example usage
//! ```
//! use morphneat::genomics::{InnovationRegistry, MutationRates, Network, NetworkConfig};
//! use morphneat::rng::RngSource;
//! use std::num::NonZeroUsize;
//!
//! let config = NetworkConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     max_size: 10,
//!     mutation_rates: MutationRates {
//!         node_addition: 0.2,
//!         node_function_change: 0.1,
//!         weight_change: 0.8,
//!         connection_addition: 0.3,
//!     },
//!     weight_bound: 30.0,
//! };
//! let mut registry = InnovationRegistry::for_config(&config);
//! let mut rng = RngSource::seeded(7);
//!
//! let mut weaker = Network::new(&config, &mut rng);
//! let mut fitter = Network::new(&config, &mut rng);
//! for _ in 0..20 {
//!     weaker.mutate(&mut registry, &mut rng);
//!     fitter.mutate(&mut registry, &mut rng);
//! }
//!
//! // Genes unique to the weaker parent are never inherited.
//! let mut child = weaker.cross_with(&fitter, &mut rng);
//! assert!(child
//!     .innovations()
//!     .all(|gene| fitter.innovation(gene.innovation).is_some()));
//!
//! child.set_inputs(&[0.5, -0.25]);
//! let steering = child.output(0);
//! assert!(steering.is_finite());
//! ```

pub mod genomics;
pub mod rng;

/// Identifier type used to designate historically
/// identical mutations for the purposes of
/// genome comparison and genetic tracking.
pub type Innovation = usize;
