//! Graph-specific error types.

use lv_core::{CoreError, EdgeId, NodeId, OsmNodeId, OsmWayId};

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction, validation and routing errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A way's node, segment-length and geometry lists do not line up.
    MalformedWay { way: OsmWayId, reason: String },

    /// An edge refers to a node handle that doesn't exist.
    InvalidNodeRef { edge: EdgeId, node: NodeId },

    /// An edge carries a negative or non-finite length.
    InvalidLength { edge: EdgeId, length: f64 },

    /// A node carries a non-finite coordinate.
    InvalidCoord { node: OsmNodeId },

    /// Adjacency list is inconsistent (edge listed at a node it doesn't touch).
    InconsistentAdjacency { edge: EdgeId, node: NodeId },

    /// A node id is not part of the graph.
    UnknownNode { node: String },

    /// Source and target lie in disconnected components.
    NoPath { source: String, target: String },

    /// Handle not found in index map.
    IdNotFound { what: &'static str },

    /// Configuration handed to the builder was rejected.
    Config(CoreError),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::MalformedWay { way, reason } => {
                write!(f, "Malformed way {}: {}", way, reason)
            }
            GraphError::InvalidNodeRef { edge, node } => {
                write!(f, "Edge {} refers to non-existent node {}", edge, node)
            }
            GraphError::InvalidLength { edge, length } => {
                write!(f, "Edge {} has invalid length {}", edge, length)
            }
            GraphError::InvalidCoord { node } => {
                write!(f, "Node {} has a non-finite coordinate", node)
            }
            GraphError::InconsistentAdjacency { edge, node } => {
                write!(
                    f,
                    "Edge {} in node {}'s adjacency list but doesn't touch that node",
                    edge, node
                )
            }
            GraphError::UnknownNode { node } => {
                write!(f, "Node {} is not part of the graph", node)
            }
            GraphError::NoPath { source, target } => {
                write!(f, "No path between {} and {}", source, target)
            }
            GraphError::IdNotFound { what } => {
                write!(f, "{} not found in index map", what)
            }
            GraphError::Config(err) => write!(f, "Invalid configuration: {}", err),
        }
    }
}

impl std::error::Error for GraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GraphError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        GraphError::Config(err)
    }
}
