//! Incremental graph builder.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use lv_core::{Coord, Crs, EdgeId, NodeId, OsmNodeId, OsmWayId, Real};

use crate::error::GraphResult;
use crate::graph::{Edge, Graph, Node};
use crate::indexing::OsmIndex;
use crate::paths::RoutingIndex;
use crate::validate;

/// Builder for constructing a graph incrementally.
///
/// Use `add_node` and `add_edge` to build up the graph,
/// then call `build()` to validate and freeze it into an immutable `Graph`.
#[derive(Debug)]
pub struct GraphBuilder {
    crs: Crs,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: OsmIndex,
}

impl GraphBuilder {
    /// Create a new empty builder; `crs` tags every node of the result.
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            nodes: Vec::new(),
            edges: Vec::new(),
            index: OsmIndex::new(),
        }
    }

    /// Add a node and return its handle.
    ///
    /// Idempotent on `osm_id`: adding a known node returns the existing handle
    /// and overwrites its coordinate (last write wins).
    pub fn add_node(&mut self, osm_id: OsmNodeId, coord: Coord) -> NodeId {
        let (id, inserted) = self.index.get_or_insert(osm_id);
        if inserted {
            self.nodes.push(Node { id, osm_id, coord });
        } else {
            self.nodes[id.pos()].coord = coord;
        }
        id
    }

    /// Add a segment between two nodes and return the edge handle.
    ///
    /// No deduplication: repeated pairs produce parallel edges.
    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        length: Real,
        way: OsmWayId,
        highway: impl Into<String>,
    ) -> EdgeId {
        let id = EdgeId::from_usize(self.edges.len());
        self.edges.push(Edge {
            id,
            source,
            target,
            length,
            way,
            highway: highway.into(),
        });
        id
    }

    /// Handle of an already added node.
    pub fn node_id(&self, osm_id: OsmNodeId) -> Option<NodeId> {
        self.index.get(osm_id)
    }

    /// Current coordinate of an already added node.
    pub fn coord(&self, osm_id: OsmNodeId) -> Option<Coord> {
        self.node_id(osm_id).map(|id| self.nodes[id.pos()].coord)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build and validate the graph, returning an immutable `Graph`.
    ///
    /// This performs validation and constructs compact adjacency lists and the
    /// routing index.
    pub fn build(self) -> GraphResult<Graph> {
        // First validate the structure
        validate::validate_structure(&self.nodes, &self.edges)?;

        // Build adjacency lists: node -> [edges]
        let (node_edge_offsets, node_edges) = Self::build_adjacency(&self.nodes, &self.edges);

        // Validate adjacency consistency
        validate::validate_adjacency(&self.nodes, &self.edges, &node_edge_offsets, &node_edges)?;

        let routing = RoutingIndex::new(
            self.nodes.len(),
            self.edges.iter().map(|e| (e.source, e.target, e.length)),
        );
        let fingerprint = Self::fingerprint(&self.nodes);

        Ok(Graph {
            crs: self.crs,
            nodes: self.nodes,
            edges: self.edges,
            index: self.index,
            node_edge_offsets,
            node_edges,
            routing,
            fingerprint,
        })
    }

    /// Build compact adjacency lists: for each node, collect its incident edges.
    fn build_adjacency(nodes: &[Node], edges: &[Edge]) -> (Vec<usize>, Vec<EdgeId>) {
        // Group edges by node; a self-loop is listed once
        let mut node_to_edges: HashMap<NodeId, Vec<EdgeId>> = HashMap::new();
        for edge in edges {
            node_to_edges.entry(edge.source).or_default().push(edge.id);
            if !edge.is_self_loop() {
                node_to_edges.entry(edge.target).or_default().push(edge.id);
            }
        }

        // Sort each node's edge list for determinism
        for edge_list in node_to_edges.values_mut() {
            edge_list.sort_by_key(|e| e.index());
        }

        // Build offsets and flat list
        let mut offsets = Vec::with_capacity(nodes.len() + 1);
        let mut flat_edges = Vec::new();
        offsets.push(0);

        for node in nodes {
            if let Some(edge_list) = node_to_edges.get(&node.id) {
                flat_edges.extend_from_slice(edge_list);
            }
            offsets.push(flat_edges.len());
        }

        (offsets, flat_edges)
    }

    fn fingerprint(nodes: &[Node]) -> u64 {
        let mut hasher = DefaultHasher::new();
        nodes.len().hash(&mut hasher);
        for node in nodes {
            node.osm_id.hash(&mut hasher);
            node.coord.x.to_bits().hash(&mut hasher);
            node.coord.y.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    }
}
