//! Error types for substation placement.

use lv_core::OsmNodeId;
use lv_graph::GraphError;
use lv_spatial::SpatialError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlacementError {
    #[error("No candidate nodes to place a substation at")]
    NoCandidates,

    #[error("Candidate {node} has invalid capacity {capacity}")]
    InvalidCapacity { node: OsmNodeId, capacity: f64 },

    #[error("Candidate {node} is not a node of the grid graph")]
    UnknownNode { node: OsmNodeId },

    #[error("Candidate {to} is unreachable from candidate {from}")]
    UnreachableNode { from: OsmNodeId, to: OsmNodeId },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Spatial error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
