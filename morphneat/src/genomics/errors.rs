use super::NodeType;
use crate::Innovation;

use std::error::Error;
use std::fmt;

/// Reasons a node refuses an incoming connection.
///
/// Rejections are an expected outcome of random
/// mutation attempts, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionRejection {
    /// Source and destination have the same node type.
    SameType(NodeType),
    /// Output nodes may not feed hidden nodes.
    OutputIntoHidden,
    /// The destination already has a connection from this source.
    Duplicate(usize),
}

/// Reasons a connection cannot be split by a new node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitRejection {
    /// The network already holds its maximum number of nodes.
    AtMaxSize(usize),
    /// One of the connection's endpoints is a hidden node.
    HiddenEndpoint(usize),
}

/// An error type indicating an unusable network configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `max_size` cannot hold every input and output node.
    MaxSizeTooSmall { max_size: usize, required: usize },
    /// The weight bound is not a positive finite number.
    InvalidWeightBound(f32),
    /// A mutation rate is not a probability.
    RateOutOfRange(&'static str, f32),
}

/// An error type indicating an innovation entry that no
/// network of the given shape could express.
#[derive(Debug)]
pub(crate) enum InnovationEntryError {
    /// An endpoint lies at or beyond the network's maximum size.
    EndpointBeyondMaxSize(Innovation, usize, usize),
    /// One innovation number was given to two different connections.
    DuplicateInnovation(Innovation, (usize, usize), (usize, usize)),
}

impl fmt::Display for ConnectionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameType(node_type) => {
                write!(f, "connection between two {:?} nodes", node_type)
            }
            Self::OutputIntoHidden => write!(f, "connection from output node into hidden node"),
            Self::Duplicate(source) => write!(f, "duplicate connection from node {}", source),
        }
    }
}

impl fmt::Display for SplitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtMaxSize(size) => write!(f, "node split on network at maximum size {}", size),
            Self::HiddenEndpoint(node) => {
                write!(f, "node split of connection with hidden endpoint {}", node)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxSizeTooSmall { max_size, required } => write!(
                f,
                "maximum size {} cannot hold {} input and output nodes",
                max_size, required
            ),
            Self::InvalidWeightBound(bound) => {
                write!(f, "weight bound {} is not a positive finite number", bound)
            }
            Self::RateOutOfRange(name, rate) => {
                write!(f, "mutation rate {} = {} is not in [0, 1]", name, rate)
            }
        }
    }
}

impl fmt::Display for InnovationEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndpointBeyondMaxSize(innovation, endpoint, max_size) => write!(
                f,
                "innovation {} references node {} beyond maximum size {}",
                innovation, endpoint, max_size
            ),
            Self::DuplicateInnovation(innovation, first, second) => write!(
                f,
                "innovation {} assigned to both {} -> {} and {} -> {}",
                innovation, first.0, first.1, second.0, second.1
            ),
        }
    }
}

impl Error for ConnectionRejection {}
impl Error for SplitRejection {}
impl Error for ConfigError {}
impl Error for InnovationEntryError {}
