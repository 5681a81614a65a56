//! Core graph data structures.

use std::collections::HashMap;

use lv_core::{Coord, Crs, EdgeId, NodeId, OsmNodeId, OsmWayId, Real};

use crate::error::GraphResult;
use crate::indexing::OsmIndex;
use crate::paths::RoutingIndex;

/// Coordinates of every node, keyed by OSM id.
pub type NodeCoordinateMap = HashMap<OsmNodeId, Coord>;

/// A node of the routable way graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub osm_id: OsmNodeId,
    pub coord: Coord,
}

/// A way segment between two nodes.
///
/// Several edges may join the same pair of nodes; each one stands for a
/// distinct physical way.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    /// Segment length in meters (CRS units for projected graphs).
    pub length: Real,
    pub way: OsmWayId,
    /// Road classification of the source way (OSM `highway` tag).
    pub highway: String,
}

impl Edge {
    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.source, self.target]
    }

    /// The endpoint opposite to `node`, or `None` if `node` is not an endpoint.
    pub fn opposite(&self, node: NodeId) -> Option<NodeId> {
        if node == self.source {
            Some(self.target)
        } else if node == self.target {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// The graph: a validated, immutable multigraph of way nodes and segments.
///
/// The graph stores:
/// - All nodes and edges in vectors (indexed by their handles).
/// - The OSM id index.
/// - Compact adjacency: for each node, which edges are incident.
/// - A routing index for length-weighted shortest paths.
///
/// Once built it is only read, so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct Graph {
    pub(crate) crs: Crs,
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) index: OsmIndex,

    /// Offsets for node->edge adjacency: node i's edges are in node_edges[node_edge_offsets[i]..node_edge_offsets[i+1]].
    pub(crate) node_edge_offsets: Vec<usize>,

    /// Flat list of edge handles incident to nodes (sorted by node then edge for determinism).
    pub(crate) node_edges: Vec<EdgeId>,

    pub(crate) routing: RoutingIndex,

    /// Hash over node ids and coordinates; changes whenever the node set does.
    pub(crate) fingerprint: u64,
}

impl Graph {
    /// CRS shared by every node coordinate.
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Return all nodes in handle order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by handle (returns None if out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.pos())
    }

    /// Get an edge by handle (returns None if out of bounds).
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.pos())
    }

    /// Handle of an OSM node, failing with `UnknownNode`.
    pub fn node_id(&self, osm_id: OsmNodeId) -> GraphResult<NodeId> {
        self.index.handle(osm_id)
    }

    pub fn contains(&self, osm_id: OsmNodeId) -> bool {
        self.index.get(osm_id).is_some()
    }

    /// Coordinate of an OSM node.
    pub fn coord(&self, osm_id: OsmNodeId) -> GraphResult<Coord> {
        let id = self.node_id(osm_id)?;
        Ok(self.nodes[id.pos()].coord)
    }

    /// Iterate over all edge handles incident to a given node.
    pub fn incident_edges(&self, node_id: NodeId) -> &[EdgeId] {
        let idx = node_id.pos();
        if idx >= self.nodes.len() {
            return &[];
        }
        let start = self.node_edge_offsets[idx];
        let end = self.node_edge_offsets[idx + 1];
        &self.node_edges[start..end]
    }

    /// Neighbouring nodes, one entry per incident edge (parallel edges repeat).
    pub fn neighbors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.incident_edges(node_id)
            .iter()
            .filter_map(move |e| self.edges[e.pos()].opposite(node_id))
    }

    /// Number of edge ends at a node; a self-loop counts twice.
    pub fn degree(&self, node_id: NodeId) -> usize {
        self.incident_edges(node_id)
            .iter()
            .map(|e| if self.edges[e.pos()].is_self_loop() { 2 } else { 1 })
            .sum()
    }

    /// Node coordinates keyed by OSM id.
    pub fn coordinate_map(&self) -> NodeCoordinateMap {
        self.nodes.iter().map(|n| (n.osm_id, n.coord)).collect()
    }

    /// Snapshot identity of the node set, used to invalidate spatial indexes.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }
}
