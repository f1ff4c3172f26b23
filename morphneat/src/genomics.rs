//! Networks are the focus of evolution.
//! They are a collection of nodes and connections that act both as
//! a genome, recorded in an innovation map, and as the phenotype
//! evaluated each simulation step. Networks can be progressively
//! mutated, thus adding complexity and functionality.

mod config;
mod connections;
mod errors;
mod history;
mod nodes;

pub use config::{MutationRates, NetworkConfig};
pub use connections::Connection;
pub use errors::{ConfigError, ConnectionRejection, SplitRejection};
use errors::InnovationEntryError;
pub use history::{InnovationInfo, InnovationRegistry, InnovationSource, SharedInnovationRegistry};
pub use nodes::{Node, NodeFunction, NodeType};

use crate::rng::RandomSource;
use crate::Innovation;

use std::collections::{btree_map, BTreeMap};
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

/// The outcome of splitting a connection with a new hidden node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeSplit {
    /// Innovation of the split connection, no longer
    /// expressed by the network.
    pub retired: Innovation,
    /// Index of the new hidden node.
    pub hidden_node: usize,
    /// Innovation of the connection into the new node.
    pub input_innovation: Innovation,
    /// Innovation of the connection out of the new node.
    pub output_innovation: Innovation,
    /// Whether either innovation was new to the registry.
    pub minted: bool,
}

/// An evolvable feed-forward network.
///
/// Nodes are kept in index order: inputs, then outputs, then hidden
/// nodes in creation order. Connections only ever run from inputs
/// to hidden or output nodes and from hidden to output nodes, so
/// the graph is always acyclic.
///
/// The innovation map always describes exactly the connections
/// the network expresses, weights included.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    input_count: usize,
    output_count: usize,
    max_size: usize,
    mutation_rates: MutationRates,
    weight_bound: f32,
    nodes: Vec<Node>,
    // Ordered, so that rebuilding from the map is reproducible.
    innovations: BTreeMap<Innovation, InnovationInfo>,
}

impl Network {
    /// Create a new, fully connected network with the
    /// specified configuration.
    ///
    /// Every input is connected to every output with a random
    /// weight. The connection from input `i` to output `o` is given
    /// the innovation number `o + i ⨯ output_count`, so all fresh
    /// networks share their numbering without consulting a registry.
    ///
    /// # Panics
    /// This function panics if the configuration is invalid.
    /// See [`NetworkConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{Network, NetworkConfig, NodeType};
    /// use morphneat::rng::RngSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     max_size: 10,
    ///     weight_bound: 30.0,
    ///     ..NetworkConfig::zero()
    /// };
    ///
    /// let network = Network::new(&config, &mut RngSource::seeded(0));
    ///
    /// assert_eq!(network.nodes().len(), 2 + 1);
    /// assert_eq!(network.hidden_count(), 0);
    /// assert_eq!(network.connection_count(), 2);
    /// assert!(network.innovations().all(|gene| gene.innovation < 2));
    /// assert!(network.innovations().all(|gene| gene.weight.abs() <= 30.0));
    /// ```
    pub fn new(config: &NetworkConfig, rng: &mut impl RandomSource) -> Network {
        let mut network = Self::empty(config);
        network.connect_inputs_to_outputs(rng);
        network
    }

    /// Create a network expressing the enabled entries of an
    /// innovation map.
    ///
    /// Input and output nodes are always created. Hidden nodes are
    /// created on demand up to the highest index referenced by an
    /// entry, each with a random function. Entries that break the
    /// node rules (such as two connections between the same nodes)
    /// are dropped. An empty map yields a [fresh](Self::new) network.
    ///
    /// # Panics
    /// This function panics if the configuration is invalid, if an
    /// entry references a node at or beyond `max_size`, if an
    /// entry leads into an input node from a non-input node, or if
    /// two entries share an innovation number but not their endpoints.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{InnovationInfo, Network, NetworkConfig, NodeType};
    /// use morphneat::rng::RngSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     max_size: 10,
    ///     ..NetworkConfig::zero()
    /// };
    ///
    /// let network = Network::from_innovations(
    ///     &config,
    ///     vec![
    ///         InnovationInfo::new(1, 1, 2, 0.5),
    ///         InnovationInfo::new(2, 0, 3, 1.0),
    ///         InnovationInfo::new(3, 3, 2, -2.0),
    ///     ],
    ///     &mut RngSource::seeded(0),
    /// );
    ///
    /// assert_eq!(network.nodes().len(), 4);
    /// assert_eq!(network.node(3).node_type(), NodeType::Hidden);
    /// assert_eq!(network.node(2).connection_weight_from(3), -2.0);
    /// ```
    pub fn from_innovations(
        config: &NetworkConfig,
        innovations: impl IntoIterator<Item = InnovationInfo>,
        rng: &mut impl RandomSource,
    ) -> Network {
        let mut network = Self::empty(config);
        let mut enabled = innovations
            .into_iter()
            .filter(|gene| gene.enabled)
            .peekable();
        if enabled.peek().is_none() {
            network.connect_inputs_to_outputs(rng);
        } else {
            for gene in enabled {
                network.express(gene, rng);
            }
        }
        network
    }

    /// Returns a network rebuilt from this network's innovation
    /// map, as [`from_innovations`](Self::from_innovations) would.
    ///
    /// Connections and weights are preserved; hidden nodes get
    /// newly rolled functions. Use [`Clone`] for an exact copy.
    pub fn reconstruct(&self, rng: &mut impl RandomSource) -> Network {
        Self::from_innovations(&self.config(), self.innovations.values().copied(), rng)
    }

    /// A network with only its input and output nodes.
    fn empty(config: &NetworkConfig) -> Network {
        config
            .validate()
            .unwrap_or_else(|e| panic!("invalid network configuration: {}", e));
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();

        let mut nodes = Vec::with_capacity(config.max_size);
        for i in 0..input_count {
            nodes.push(Node::new(i, NodeType::Input, NodeFunction::Tanh, 0.0));
        }
        for o in input_count..input_count + output_count {
            nodes.push(Node::new(o, NodeType::Output, NodeFunction::Tanh, 0.0));
        }

        Network {
            input_count,
            output_count,
            max_size: config.max_size,
            mutation_rates: config.mutation_rates,
            weight_bound: config.weight_bound,
            nodes,
            innovations: BTreeMap::new(),
        }
    }

    fn connect_inputs_to_outputs(&mut self, rng: &mut impl RandomSource) {
        for i in 0..self.input_count {
            for o in 0..self.output_count {
                let connection = Connection::with_random_weight(
                    i,
                    self.input_count + o,
                    o + i * self.output_count,
                    self.weight_bound,
                    self.mutation_rates.weight_change,
                    rng,
                );
                self.insert_connection(connection);
            }
        }
    }

    /// Adds the connection described by `gene`, creating
    /// hidden nodes up to its endpoints as needed.
    fn express(&mut self, gene: InnovationInfo, rng: &mut impl RandomSource) {
        let highest = gene.source.max(gene.destination);
        if highest >= self.max_size {
            panic!(
                "{}",
                InnovationEntryError::EndpointBeyondMaxSize(gene.innovation, highest, self.max_size)
            );
        }
        while self.nodes.len() <= highest {
            self.push_hidden_node(rng);
        }

        let source_type = self.nodes[gene.source].node_type();
        match self.nodes[gene.destination].accepts_connection_from(gene.source, source_type) {
            Ok(()) => self.insert_connection(Connection::new(
                gene.source,
                gene.destination,
                gene.innovation,
                gene.weight,
                self.mutation_rates.weight_change,
            )),
            Err(rejection) => log::trace!("dropped innovation {}: {}", gene.innovation, rejection),
        }
    }

    /// Appends a hidden node with a random function,
    /// returning its index.
    fn push_hidden_node(&mut self, rng: &mut impl RandomSource) -> usize {
        debug_assert!(self.nodes.len() < self.max_size);
        let index = self.nodes.len();
        self.nodes.push(Node::new(
            index,
            NodeType::Hidden,
            NodeFunction::random(rng),
            self.mutation_rates.node_function_change,
        ));
        index
    }

    /// Records and adds a connection the node rules
    /// are known to accept.
    ///
    /// # Panics
    /// This function panics if the connection's innovation number
    /// is already expressed, which can only happen if two different
    /// connections were given the same number.
    fn insert_connection(&mut self, connection: Connection) {
        match self.innovations.entry(connection.innovation()) {
            btree_map::Entry::Occupied(entry) => panic!(
                "{}",
                InnovationEntryError::DuplicateInnovation(
                    connection.innovation(),
                    entry.get().endpoints(),
                    connection.endpoints(),
                )
            ),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(InnovationInfo::from(&connection));
            }
        }
        self.nodes[connection.destination()].add_incoming_unchecked(connection);
    }

    /// Sets the value fed into the input node at `index`.
    ///
    /// # Panics
    /// This function panics if `index` is not an input index.
    pub fn set_input(&mut self, index: usize, value: f32) {
        assert!(
            index < self.input_count,
            "input index {} out of range for {} inputs",
            index,
            self.input_count
        );
        self.nodes[index].set_external_input(value);
    }

    /// Sets the value of each input node to the
    /// corresponding value in the passed slice.
    ///
    /// # Panics
    /// This function panics if the length of the passed slice
    /// is not equal to the number of inputs in the network.
    pub fn set_inputs(&mut self, values: &[f32]) {
        assert_eq!(
            values.len(),
            self.input_count,
            "expected {} input values",
            self.input_count
        );
        for (node, value) in self.nodes.iter_mut().zip(values) {
            node.set_external_input(*value);
        }
    }

    /// Computes the value of the output node at `index`.
    ///
    /// # Panics
    /// This function panics if `index` is not an output index.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{Network, NetworkConfig};
    /// use morphneat::rng::RngSource;
    ///
    /// let mut network = Network::new(&NetworkConfig::zero(), &mut RngSource::seeded(1));
    ///
    /// network.set_input(0, 0.0);
    /// assert_eq!(network.output(0), 0.0);
    /// ```
    pub fn output(&self, index: usize) -> f32 {
        assert!(
            index < self.output_count,
            "output index {} out of range for {} outputs",
            index,
            self.output_count
        );
        self.node_output(self.input_count + index)
    }

    /// Computes every output value, in order.
    pub fn outputs(&self) -> Vec<f32> {
        self.output_node_indices()
            .map(|index| self.node_output(index))
            .collect()
    }

    /// Computes the value of any node.
    pub fn node_output(&self, index: usize) -> f32 {
        self.nodes[index].output(&self.nodes)
    }

    /// Induces one round of mutation.
    ///
    /// Every connection's weight is first perturbed (see
    /// [`perturb_weights`](Self::perturb_weights)) with a step of a
    /// quarter of the weight bound. Then one of
    /// [connection addition](Self::mutate_add_connections),
    /// [function perturbation](Self::perturb_node_functions) or
    /// [node addition](Self::mutate_add_nodes) is chosen uniformly.
    ///
    /// Returns `true` if the chosen operation minted a new
    /// innovation in the registry.
    ///
    /// # Panics
    /// This function panics if the registry hands out a number the
    /// network already expresses for other endpoints, as a registry
    /// built for a different network shape would.
    pub fn mutate(
        &mut self,
        registry: &mut impl InnovationSource,
        rng: &mut impl RandomSource,
    ) -> bool {
        self.perturb_weights(self.weight_bound / 4.0, rng);
        let minted = match rng.index(3) {
            0 => self.mutate_add_connections(registry, rng),
            1 => {
                self.perturb_node_functions(rng);
                false
            }
            _ => self.mutate_add_nodes(registry, rng),
        };
        debug_assert!(self.topological_order().is_some());
        minted
    }

    /// Perturbs the incoming weights of every non-input node,
    /// keeping the innovation map in step.
    pub fn perturb_weights(&mut self, step: f32, rng: &mut impl RandomSource) {
        for node in &mut self.nodes[self.input_count..] {
            node.perturb_incoming_weights(step, rng);
        }
        for connection in self.nodes.iter().flat_map(|n| n.incoming()) {
            if let Some(gene) = self.innovations.get_mut(&connection.innovation()) {
                gene.weight = connection.weight();
            }
        }
    }

    /// Lets every node re-roll its function.
    /// See [`Node::perturb_function`].
    pub fn perturb_node_functions(&mut self, rng: &mut impl RandomSource) {
        for node in &mut self.nodes {
            node.perturb_function(rng);
        }
    }

    /// Induces a _connection addition mutation_: for every non-input
    /// node, each input node it lacks a connection from is connected
    /// to it with probability `connection_addition`.
    ///
    /// Returns `true` if any added connection minted a new innovation.
    pub fn mutate_add_connections(
        &mut self,
        registry: &mut impl InnovationSource,
        rng: &mut impl RandomSource,
    ) -> bool {
        let mut minted = false;
        for destination in self.input_count..self.nodes.len() {
            for source in 0..self.input_count {
                if self.nodes[destination].has_connection_from(source)
                    || !rng.chance(self.mutation_rates.connection_addition)
                {
                    continue;
                }
                if let Ok(existed) = self.add_connection(source, destination, registry, rng) {
                    minted |= !existed;
                }
            }
        }
        minted
    }

    /// Adds a connection with a random weight between two nodes,
    /// numbered through the registry.
    ///
    /// Returns whether the innovation number already existed,
    /// meaning the connection is a rediscovery rather than a new
    /// invention.
    ///
    /// # Errors
    /// Returns an error, leaving the network and registry untouched,
    /// if the node rules reject the connection.
    ///
    /// # Panics
    /// This function panics if either index is out of range, or if
    /// `destination` is an input node and `source` is not.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{InnovationRegistry, Network, NetworkConfig};
    /// use morphneat::rng::RngSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     max_size: 10,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut registry = InnovationRegistry::for_config(&config);
    /// let mut rng = RngSource::seeded(4);
    ///
    /// let mut first = Network::new(&config, &mut rng);
    /// let mut second = Network::new(&config, &mut rng);
    /// first.add_node_in_place_of(0, 2, &mut registry, &mut rng).unwrap();
    /// second.add_node_in_place_of(0, 2, &mut registry, &mut rng).unwrap();
    ///
    /// // The first genome invents 1 -> 3, the second rediscovers it.
    /// assert_eq!(first.add_connection(1, 3, &mut registry, &mut rng), Ok(false));
    /// assert_eq!(second.add_connection(1, 3, &mut registry, &mut rng), Ok(true));
    /// assert_eq!(
    ///     first.node(3).incoming()[1].innovation(),
    ///     second.node(3).incoming()[1].innovation(),
    /// );
    /// ```
    pub fn add_connection(
        &mut self,
        source: usize,
        destination: usize,
        registry: &mut impl InnovationSource,
        rng: &mut impl RandomSource,
    ) -> Result<bool, ConnectionRejection> {
        let source_type = self.node(source).node_type();
        if let Err(rejection) = self.node(destination).accepts_connection_from(source, source_type) {
            log::trace!(
                "rejected connection {} -> {}: {}",
                source,
                destination,
                rejection
            );
            return Err(rejection);
        }

        let (innovation, existed) = registry.innovation_for(source, destination);
        self.insert_connection(Connection::with_random_weight(
            source,
            destination,
            innovation,
            self.weight_bound,
            self.mutation_rates.weight_change,
            rng,
        ));
        Ok(existed)
    }

    /// Induces a _node addition mutation_: every connection between
    /// two non-hidden nodes is split with probability `node_addition`,
    /// for as long as the network has room for new nodes.
    ///
    /// Returns `true` if any split minted a new innovation.
    pub fn mutate_add_nodes(
        &mut self,
        registry: &mut impl InnovationSource,
        rng: &mut impl RandomSource,
    ) -> bool {
        let candidates: Vec<(usize, usize)> = self.splittable_connections().collect();
        let mut minted = false;
        for (source, destination) in candidates {
            if !rng.chance(self.mutation_rates.node_addition) {
                continue;
            }
            match self.add_node_in_place_of(source, destination, registry, rng) {
                Ok(split) => minted |= split.minted,
                Err(rejection) => log::trace!(
                    "rejected split of {} -> {}: {}",
                    source,
                    destination,
                    rejection
                ),
            }
        }
        minted
    }

    /// Endpoints of every connection with no hidden endpoint.
    fn splittable_connections(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes
            .iter()
            .filter(|n| n.node_type() != NodeType::Hidden)
            .flat_map(|n| n.incoming())
            .map(|c| c.endpoints())
            .filter(move |(source, _)| self.node_type_at(*source) != NodeType::Hidden)
    }

    /// Splits the connection `source -> destination` with a new hidden
    /// node `C`: `source --w--> destination` becomes
    /// `source --1.0--> C --w--> destination`.
    ///
    /// The split connection's innovation leaves the network's map, but
    /// stays in the registry. The two new connections are numbered
    /// through the registry.
    ///
    /// # Errors
    /// Returns an error, leaving the network untouched, if the network
    /// is at its maximum size or either endpoint is a hidden node.
    ///
    /// # Panics
    /// This function panics if there is no such connection.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{InnovationRegistry, Network, NetworkConfig, NodeType};
    /// use morphneat::rng::RngSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     max_size: 10,
    ///     weight_bound: 30.0,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut registry = InnovationRegistry::for_config(&config);
    /// let mut rng = RngSource::seeded(0);
    /// let mut network = Network::new(&config, &mut rng);
    /// let weight = network.node(2).connection_weight_from(0);
    ///
    /// let split = network.add_node_in_place_of(0, 2, &mut registry, &mut rng).unwrap();
    ///
    /// assert_eq!(split.hidden_node, 3);
    /// assert_eq!(network.node(3).node_type(), NodeType::Hidden);
    /// assert_eq!(network.node(3).connection_weight_from(0), 1.0);
    /// assert_eq!(network.node(2).connection_weight_from(3), weight);
    /// assert!(!network.node(2).has_connection_from(0));
    /// assert!(network.innovation(split.retired).is_none());
    /// ```
    pub fn add_node_in_place_of(
        &mut self,
        source: usize,
        destination: usize,
        registry: &mut impl InnovationSource,
        rng: &mut impl RandomSource,
    ) -> Result<NodeSplit, SplitRejection> {
        if self.nodes.len() >= self.max_size {
            return Err(SplitRejection::AtMaxSize(self.max_size));
        }
        if let Some(hidden) = [source, destination]
            .into_iter()
            .find(|endpoint| self.node_type_at(*endpoint) == NodeType::Hidden)
        {
            return Err(SplitRejection::HiddenEndpoint(hidden));
        }

        let weight = self.node(destination).connection_weight_from(source);
        let retired = match self.nodes[destination].remove_incoming_connection_from(source) {
            Some(innovation) => innovation,
            None => unreachable!("connection {} -> {} vanished", source, destination),
        };
        self.innovations.remove(&retired);

        let hidden_node = self.push_hidden_node(rng);
        let (input_innovation, input_existed) = registry.innovation_for(source, hidden_node);
        self.insert_connection(Connection::new(
            source,
            hidden_node,
            input_innovation,
            1.0,
            self.mutation_rates.weight_change,
        ));
        let (output_innovation, output_existed) = registry.innovation_for(hidden_node, destination);
        self.insert_connection(Connection::new(
            hidden_node,
            destination,
            output_innovation,
            weight,
            self.mutation_rates.weight_change,
        ));

        log::debug!(
            "split {} -> {} (innovation {}) through node {} as innovations {} and {}",
            source,
            destination,
            retired,
            hidden_node,
            input_innovation,
            output_innovation
        );
        Ok(NodeSplit {
            retired,
            hidden_node,
            input_innovation,
            output_innovation,
            minted: !(input_existed && output_existed),
        })
    }

    /// Combines the network with a fitter parent and returns
    /// their _child_.
    ///
    /// Innovations common to both parents are inherited from either
    /// one with equal probability. Innovations only the fitter parent
    /// has are always inherited; those only `self` has are dropped.
    /// Callers must therefore always call this on the less fit parent.
    /// The child is built with
    /// [`from_innovations`](Self::from_innovations) and the fitter
    /// parent's configuration.
    ///
    /// # Panics
    /// This function panics if the parents differ in input count,
    /// output count or maximum size.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{InnovationRegistry, Network, NetworkConfig};
    /// use morphneat::rng::RngSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     max_size: 10,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut registry = InnovationRegistry::for_config(&config);
    /// let mut rng = RngSource::seeded(3);
    ///
    /// let weaker = Network::new(&config, &mut rng);
    /// let mut fitter = Network::new(&config, &mut rng);
    /// fitter.add_node_in_place_of(0, 2, &mut registry, &mut rng).unwrap();
    ///
    /// let child = weaker.cross_with(&fitter, &mut rng);
    ///
    /// // The child has the fitter parent's structure.
    /// assert_eq!(child.nodes().len(), 4);
    /// assert_eq!(child.measure_difference(&fitter), 0.0);
    /// ```
    pub fn cross_with(&self, fitter_parent: &Network, rng: &mut impl RandomSource) -> Network {
        assert!(
            self.input_count == fitter_parent.input_count
                && self.output_count == fitter_parent.output_count
                && self.max_size == fitter_parent.max_size,
            "crossover between differently shaped networks"
        );

        let mut common = 0;
        let inherited: Vec<InnovationInfo> = fitter_parent
            .innovations
            .iter()
            .map(|(innovation, fitter_gene)| match self.innovations.get(innovation) {
                Some(own_gene) => {
                    common += 1;
                    if rng.chance(0.5) {
                        *own_gene
                    } else {
                        *fitter_gene
                    }
                }
                None => *fitter_gene,
            })
            .collect();
        log::debug!(
            "crossover: {} common, {} from fitter parent only, {} dropped",
            common,
            inherited.len() - common,
            self.innovations.len() - common
        );

        Self::from_innovations(&fitter_parent.config(), inherited, rng)
    }

    /// Calculates the _genetic distance_ between `self` and `other`:
    /// the number of innovations expressed by exactly one of them.
    ///
    /// Weight differences of common innovations are not counted.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{InnovationRegistry, Network, NetworkConfig};
    /// use morphneat::rng::RngSource;
    /// use std::num::NonZeroUsize;
    ///
    /// let config = NetworkConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     max_size: 10,
    ///     ..NetworkConfig::zero()
    /// };
    /// let mut registry = InnovationRegistry::for_config(&config);
    /// let mut rng = RngSource::seeded(5);
    ///
    /// let first = Network::new(&config, &mut rng);
    /// let mut second = Network::new(&config, &mut rng);
    /// assert_eq!(first.measure_difference(&second), 0.0);
    ///
    /// // One innovation retired, two added.
    /// second.add_node_in_place_of(1, 2, &mut registry, &mut rng).unwrap();
    /// assert_eq!(first.measure_difference(&second), 3.0);
    /// assert_eq!(second.measure_difference(&first), 3.0);
    /// ```
    pub fn measure_difference(&self, other: &Network) -> f32 {
        let own_only = self
            .innovations
            .keys()
            .filter(|id| !other.innovations.contains_key(id))
            .count();
        let other_only = other
            .innovations
            .keys()
            .filter(|id| !self.innovations.contains_key(id))
            .count();
        (own_only + other_only) as f32
    }

    /// Returns node indices in an order where every connection's
    /// source comes before its destination, or `None` if the
    /// graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<usize>> {
        let mut pending: Vec<usize> = self.nodes.iter().map(|n| n.incoming().len()).collect();
        let mut outgoing = vec![vec![]; self.nodes.len()];
        for connection in self.nodes.iter().flat_map(|n| n.incoming()) {
            outgoing[connection.source()].push(connection.destination());
        }

        let mut ready: Vec<usize> = (0..self.nodes.len()).filter(|i| pending[*i] == 0).collect();
        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(node) = ready.pop() {
            order.push(node);
            for destination in &outgoing[node] {
                pending[*destination] -= 1;
                if pending[*destination] == 0 {
                    ready.push(*destination);
                }
            }
        }

        if order.len() == self.nodes.len() {
            Some(order)
        } else {
            None
        }
    }

    /// Returns the configuration the network was built with.
    pub fn config(&self) -> NetworkConfig {
        NetworkConfig {
            input_count: NonZeroUsize::new(self.input_count)
                .unwrap_or_else(|| unreachable!("network without inputs")),
            output_count: NonZeroUsize::new(self.output_count)
                .unwrap_or_else(|| unreachable!("network without outputs")),
            max_size: self.max_size,
            mutation_rates: self.mutation_rates,
            weight_bound: self.weight_bound,
        }
    }

    /// Returns the type a node at `index` has or would have.
    fn node_type_at(&self, index: usize) -> NodeType {
        if index < self.input_count {
            NodeType::Input
        } else if index < self.input_count + self.output_count {
            NodeType::Output
        } else {
            NodeType::Hidden
        }
    }

    /// Returns the node at `index`.
    ///
    /// # Panics
    /// This function panics if there is no such node.
    pub fn node(&self, index: usize) -> &Node {
        match self.nodes.get(index) {
            Some(node) => node,
            None => panic!(
                "node index {} out of range for network of {} nodes",
                index,
                self.nodes.len()
            ),
        }
    }

    /// Returns the network's nodes, in index order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the indices of the output nodes.
    pub fn output_node_indices(&self) -> Range<usize> {
        self.input_count..self.input_count + self.output_count
    }

    /// Returns an iterator over the innovation map, in
    /// innovation order.
    pub fn innovations(&self) -> impl Iterator<Item = &InnovationInfo> {
        self.innovations.values()
    }

    /// Returns the map entry of an innovation, if the
    /// network expresses it.
    pub fn innovation(&self, innovation: Innovation) -> Option<&InnovationInfo> {
        self.innovations.get(&innovation)
    }

    /// Returns the number of connections.
    pub fn connection_count(&self) -> usize {
        self.innovations.len()
    }

    /// Returns the number of hidden nodes.
    pub fn hidden_count(&self) -> usize {
        self.nodes.len() - self.input_count - self.output_count
    }

    /// Returns the number of input nodes.
    pub fn input_count(&self) -> usize {
        self.input_count
    }

    /// Returns the number of output nodes.
    pub fn output_count(&self) -> usize {
        self.output_count
    }

    /// Returns the maximum number of nodes, hidden nodes included.
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let connections: Vec<String> = self
            .nodes
            .iter()
            .flat_map(|n| n.incoming())
            .map(|c| c.to_string())
            .collect();
        let nodes: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        f.debug_struct("Network")
            .field("Connections", &connections)
            .field("Nodes", &nodes)
            .finish()
    }
}
