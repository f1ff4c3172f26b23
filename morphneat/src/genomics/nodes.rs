use super::{Connection, ConnectionRejection};
use crate::rng::RandomSource;
use crate::Innovation;

use std::fmt;

/// The transfer function applied to a node's summed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeFunction {
    // tanh(x)
    Tanh,
    // |x|
    Absolute,
    // exp(-x²)
    Gaussian,
    // sin(x)
    Sine,
    // cos(x)
    Cosine,
    // -1 if x < -1
    // x  if -1 ≤ x ≤ 1
    // 1  if x > 1
    ClippedLinear,
    // 1 if x > 0
    // 0 otherwise
    Step,
    // x
    Transfer,
}

impl NodeFunction {
    /// Every available function.
    pub const ALL: [NodeFunction; 8] = [
        NodeFunction::Tanh,
        NodeFunction::Absolute,
        NodeFunction::Gaussian,
        NodeFunction::Sine,
        NodeFunction::Cosine,
        NodeFunction::ClippedLinear,
        NodeFunction::Step,
        NodeFunction::Transfer,
    ];

    /// Returns a function chosen uniformly from [`ALL`](Self::ALL).
    pub fn random(rng: &mut impl RandomSource) -> NodeFunction {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    /// Applies the function to `x`.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::NodeFunction;
    ///
    /// assert_eq!(NodeFunction::Tanh.apply(0.0), 0.0);
    /// assert_eq!(NodeFunction::ClippedLinear.apply(-3.0), -1.0);
    /// assert_eq!(NodeFunction::Step.apply(0.0), 0.0);
    /// ```
    pub fn apply(self, x: f32) -> f32 {
        match self {
            NodeFunction::Tanh => x.tanh(),
            NodeFunction::Absolute => x.abs(),
            NodeFunction::Gaussian => (-x * x).exp(),
            NodeFunction::Sine => x.sin(),
            NodeFunction::Cosine => x.cos(),
            NodeFunction::ClippedLinear => x.clamp(-1.0, 1.0),
            NodeFunction::Step => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            NodeFunction::Transfer => x,
        }
    }
}

/// A NodeType indicates the role of a node,
/// and never changes after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Input nodes.
    Input,
    /// Hidden nodes.
    Hidden,
    /// Output nodes.
    Output,
}

/// A vertex of a network, owning its incoming connections.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    index: usize,
    node_type: NodeType,
    function: NodeFunction,
    mutation_probability: f32,
    incoming: Vec<Connection>,
    external_input: f32,
}

impl Node {
    /// Generate a new node with the passed parameters.
    ///
    /// `mutation_probability` is the chance that
    /// [`perturb_function`](Self::perturb_function) re-rolls
    /// the node's function.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{Node, NodeFunction, NodeType};
    ///
    /// let node = Node::new(5, NodeType::Hidden, NodeFunction::Sine, 0.1);
    /// assert_eq!(node.index(), 5);
    /// assert_eq!(node.incoming().len(), 0);
    /// ```
    pub fn new(
        index: usize,
        node_type: NodeType,
        function: NodeFunction,
        mutation_probability: f32,
    ) -> Node {
        Node {
            index,
            node_type,
            function,
            mutation_probability,
            incoming: Vec::new(),
            external_input: 0.0,
        }
    }

    /// Checks whether a connection from a node with the given
    /// index and type could be added to this node.
    ///
    /// # Errors
    /// Returns an error if the nodes have the same type, if an
    /// output node would feed a hidden node, or if a connection
    /// from `source_index` already exists.
    ///
    /// # Panics
    /// This function panics if this is an input node and the
    /// source is not: input nodes never take connections, and
    /// asking them to is a bug in the caller.
    pub fn accepts_connection_from(
        &self,
        source_index: usize,
        source_type: NodeType,
    ) -> Result<(), ConnectionRejection> {
        if source_type == self.node_type {
            return Err(ConnectionRejection::SameType(source_type));
        }
        assert!(
            self.node_type != NodeType::Input,
            "attempted to connect node {} into input node {}",
            source_index,
            self.index
        );
        if self.node_type == NodeType::Hidden && source_type == NodeType::Output {
            Err(ConnectionRejection::OutputIntoHidden)
        } else if self.has_connection_from(source_index) {
            Err(ConnectionRejection::Duplicate(source_index))
        } else {
            Ok(())
        }
    }

    /// Appends `connection` to the node's incoming connections,
    /// after checking it with
    /// [`accepts_connection_from`](Self::accepts_connection_from).
    ///
    /// # Panics
    /// This function panics if the connection's destination is not
    /// this node, or under the conditions of `accepts_connection_from`.
    ///
    /// # Examples
    /// ```
    /// use morphneat::genomics::{Connection, Node, NodeFunction, NodeType};
    ///
    /// let mut output = Node::new(2, NodeType::Output, NodeFunction::Tanh, 0.0);
    ///
    /// assert!(output
    ///     .add_incoming_connection_from(Connection::new(0, 2, 0, 1.0, 0.5), NodeType::Input)
    ///     .is_ok());
    /// // Duplicates are rejected.
    /// assert!(output
    ///     .add_incoming_connection_from(Connection::new(0, 2, 9, 2.0, 0.5), NodeType::Input)
    ///     .is_err());
    /// // So are connections between outputs.
    /// assert!(output
    ///     .add_incoming_connection_from(Connection::new(3, 2, 4, 2.0, 0.5), NodeType::Output)
    ///     .is_err());
    /// ```
    pub fn add_incoming_connection_from(
        &mut self,
        connection: Connection,
        source_type: NodeType,
    ) -> Result<(), ConnectionRejection> {
        self.accepts_connection_from(connection.source(), source_type)?;
        self.add_incoming_unchecked(connection);
        Ok(())
    }

    /// Appends `connection` without checking the node rules.
    pub(super) fn add_incoming_unchecked(&mut self, connection: Connection) {
        assert_eq!(
            connection.destination(),
            self.index,
            "connection {} does not lead into node {}",
            connection,
            self.index
        );
        self.incoming.push(connection);
    }

    /// Removes the first connection coming from `source_index`,
    /// returning its innovation number if there was one.
    pub fn remove_incoming_connection_from(&mut self, source_index: usize) -> Option<Innovation> {
        let position = self
            .incoming
            .iter()
            .position(|c| c.source() == source_index)?;
        Some(self.incoming.remove(position).innovation())
    }

    /// Returns whether the node has a connection from `source_index`.
    pub fn has_connection_from(&self, source_index: usize) -> bool {
        self.incoming.iter().any(|c| c.source() == source_index)
    }

    /// Returns the weight of the connection from `source_index`.
    ///
    /// # Panics
    /// This function panics if there is no such connection.
    /// Check with [`has_connection_from`](Self::has_connection_from) first.
    pub fn connection_weight_from(&self, source_index: usize) -> f32 {
        match self.incoming.iter().find(|c| c.source() == source_index) {
            Some(connection) => connection.weight(),
            None => panic!(
                "no connection from node {} into node {}",
                source_index, self.index
            ),
        }
    }

    /// Computes the node's output: its function applied to the
    /// weighted sum of its sources' outputs plus its external input.
    ///
    /// `nodes` is the arena the node's connections index into.
    /// The recursion only terminates on acyclic graphs, which
    /// networks guarantee by construction.
    pub fn output(&self, nodes: &[Node]) -> f32 {
        let sum: f32 = self
            .incoming
            .iter()
            .map(|c| c.weight() * nodes[c.source()].output(nodes))
            .sum();
        self.function.apply(sum + self.external_input)
    }

    /// With the node's mutation probability, re-rolls its function.
    pub fn perturb_function(&mut self, rng: &mut impl RandomSource) {
        if rng.chance(self.mutation_probability) {
            self.function = NodeFunction::random(rng);
        }
    }

    /// Perturbs the weight of every incoming connection.
    /// See [`Connection::perturb_weight`].
    pub fn perturb_incoming_weights(&mut self, step: f32, rng: &mut impl RandomSource) {
        for connection in &mut self.incoming {
            connection.perturb_weight(step, rng);
        }
    }

    /// Returns the node's index in its network.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the node's type.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the node's function.
    pub fn function(&self) -> NodeFunction {
        self.function
    }

    /// Returns the chance of a function re-roll.
    pub fn mutation_probability(&self) -> f32 {
        self.mutation_probability
    }

    /// Returns the node's incoming connections, in insertion order.
    pub fn incoming(&self) -> &[Connection] {
        &self.incoming
    }

    /// Returns the value added to the node's input sum.
    pub fn external_input(&self) -> f32 {
        self.external_input
    }

    /// Sets the value added to the node's input sum.
    pub fn set_external_input(&mut self, value: f32) {
        self.external_input = value;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}[{:?}, {:?}, IN: {:?}]",
            self.index,
            self.node_type,
            self.function,
            self.incoming.iter().map(|c| c.source()).collect::<Vec<_>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngSource, Scripted};

    fn input(index: usize) -> Node {
        Node::new(index, NodeType::Input, NodeFunction::Tanh, 0.0)
    }

    #[test]
    fn functions() {
        use NodeFunction::*;
        let x = 0.5_f32;
        assert_eq!(Tanh.apply(x), x.tanh());
        assert_eq!(Absolute.apply(-x), x);
        assert_eq!(Gaussian.apply(0.0), 1.0);
        assert_eq!(Gaussian.apply(2.0), (-4.0_f32).exp());
        assert_eq!(Sine.apply(x), x.sin());
        assert_eq!(Cosine.apply(0.0), 1.0);
        assert_eq!(ClippedLinear.apply(x), x);
        assert_eq!(ClippedLinear.apply(2.0), 1.0);
        assert_eq!(ClippedLinear.apply(-2.0), -1.0);
        assert_eq!(Step.apply(x), 1.0);
        assert_eq!(Step.apply(-x), 0.0);
        assert_eq!(Transfer.apply(-7.25), -7.25);
    }

    #[test]
    fn random_function_covers_all() {
        let mut rng = RngSource::seeded(9);
        let mut seen = vec![];
        for _ in 0..1000 {
            let function = NodeFunction::random(&mut rng);
            if !seen.contains(&function) {
                seen.push(function);
            }
        }
        assert_eq!(seen.len(), NodeFunction::ALL.len());
    }

    #[test]
    fn same_type_rejected() {
        let mut output = Node::new(3, NodeType::Output, NodeFunction::Tanh, 0.0);
        assert_eq!(
            output.add_incoming_connection_from(Connection::new(2, 3, 0, 1.0, 0.0), NodeType::Output),
            Err(ConnectionRejection::SameType(NodeType::Output))
        );
        let mut hidden = Node::new(5, NodeType::Hidden, NodeFunction::Tanh, 0.0);
        assert_eq!(
            hidden.add_incoming_connection_from(Connection::new(4, 5, 0, 1.0, 0.0), NodeType::Hidden),
            Err(ConnectionRejection::SameType(NodeType::Hidden))
        );
        // Same-type is checked before the input rule.
        let mut input = input(0);
        assert_eq!(
            input.add_incoming_connection_from(Connection::new(1, 0, 0, 1.0, 0.0), NodeType::Input),
            Err(ConnectionRejection::SameType(NodeType::Input))
        );
        assert!(input.incoming().is_empty());
    }

    #[test]
    #[should_panic(expected = "into input node")]
    fn connection_into_input() {
        let mut input = input(0);
        let _ = input.add_incoming_connection_from(Connection::new(2, 0, 0, 1.0, 0.0), NodeType::Output);
    }

    #[test]
    fn output_into_hidden_rejected() {
        let mut hidden = Node::new(4, NodeType::Hidden, NodeFunction::Tanh, 0.0);
        assert_eq!(
            hidden.add_incoming_connection_from(Connection::new(2, 4, 0, 1.0, 0.0), NodeType::Output),
            Err(ConnectionRejection::OutputIntoHidden)
        );
        assert!(hidden
            .add_incoming_connection_from(Connection::new(0, 4, 1, 1.0, 0.0), NodeType::Input)
            .is_ok());
    }

    #[test]
    fn duplicate_rejected() {
        let mut output = Node::new(2, NodeType::Output, NodeFunction::Tanh, 0.0);
        output
            .add_incoming_connection_from(Connection::new(0, 2, 0, 1.0, 0.0), NodeType::Input)
            .unwrap();
        assert_eq!(
            output.add_incoming_connection_from(Connection::new(0, 2, 5, -1.0, 0.0), NodeType::Input),
            Err(ConnectionRejection::Duplicate(0))
        );
        assert_eq!(output.incoming().len(), 1);
        assert_eq!(output.connection_weight_from(0), 1.0);
    }

    #[test]
    fn remove_connection() {
        let mut output = Node::new(2, NodeType::Output, NodeFunction::Tanh, 0.0);
        output
            .add_incoming_connection_from(Connection::new(0, 2, 0, 1.0, 0.0), NodeType::Input)
            .unwrap();
        output
            .add_incoming_connection_from(Connection::new(1, 2, 1, 1.0, 0.0), NodeType::Input)
            .unwrap();
        assert_eq!(output.remove_incoming_connection_from(0), Some(0));
        assert_eq!(output.remove_incoming_connection_from(0), None);
        assert!(!output.has_connection_from(0));
        assert!(output.has_connection_from(1));
    }

    #[test]
    #[should_panic(expected = "no connection from node 1 into node 2")]
    fn missing_connection_weight() {
        let output = Node::new(2, NodeType::Output, NodeFunction::Tanh, 0.0);
        output.connection_weight_from(1);
    }

    #[test]
    fn output_recursion() {
        let mut nodes = vec![
            input(0),
            input(1),
            Node::new(2, NodeType::Output, NodeFunction::Transfer, 0.0),
            Node::new(3, NodeType::Hidden, NodeFunction::Absolute, 0.0),
        ];
        nodes[0].set_external_input(0.5);
        nodes[1].set_external_input(-1.0);
        nodes[3]
            .add_incoming_connection_from(Connection::new(1, 3, 2, 3.0, 0.0), NodeType::Input)
            .unwrap();
        nodes[2]
            .add_incoming_connection_from(Connection::new(0, 2, 0, 2.0, 0.0), NodeType::Input)
            .unwrap();
        nodes[2]
            .add_incoming_connection_from(Connection::new(3, 2, 3, -0.5, 0.0), NodeType::Hidden)
            .unwrap();
        nodes[2].set_external_input(0.25);

        let hidden = (3.0 * (-1.0_f32).tanh()).abs();
        let expected = 2.0 * 0.5_f32.tanh() - 0.5 * hidden + 0.25;
        assert!((nodes[2].output(&nodes) - expected).abs() < 1e-6);
    }

    #[test]
    fn perturb_function() {
        let mut hidden = Node::new(4, NodeType::Hidden, NodeFunction::Tanh, 0.5);
        // Fails the chance check.
        hidden.perturb_function(&mut Scripted::new(vec![0.6]));
        assert_eq!(hidden.function(), NodeFunction::Tanh);
        // Passes, then picks the last function.
        hidden.perturb_function(&mut Scripted::new(vec![0.1, 0.99]));
        assert_eq!(hidden.function(), NodeFunction::Transfer);

        let mut fixed = input(0);
        let mut rng = RngSource::seeded(2);
        for _ in 0..100 {
            fixed.perturb_function(&mut rng);
        }
        assert_eq!(fixed.function(), NodeFunction::Tanh);
    }

    #[test]
    fn perturb_incoming_weights() {
        let mut output = Node::new(2, NodeType::Output, NodeFunction::Tanh, 0.0);
        output
            .add_incoming_connection_from(Connection::new(0, 2, 0, 1.0, 1.0), NodeType::Input)
            .unwrap();
        output
            .add_incoming_connection_from(Connection::new(1, 2, 1, 1.0, 0.0), NodeType::Input)
            .unwrap();
        // First connection: chance, then +step/2. Second: failed chance.
        output.perturb_incoming_weights(4.0, &mut Scripted::new(vec![0.0, 0.75, 0.0]));
        assert_eq!(output.connection_weight_from(0), 3.0);
        assert_eq!(output.connection_weight_from(1), 1.0);
    }
}
