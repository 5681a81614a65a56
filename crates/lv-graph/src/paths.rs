//! Length-weighted shortest paths.
//!
//! The routing index mirrors the arena as an undirected petgraph graph whose
//! node indices equal the arena handles, so no translation table is needed.

use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use lv_core::{NodeId, OsmNodeId, Real};

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Secondary index over an arena of nodes and weighted edges.
#[derive(Debug, Clone, Default)]
pub struct RoutingIndex {
    graph: UnGraph<(), Real>,
}

impl RoutingIndex {
    /// Build from a node count and `(a, b, length)` triples.
    pub fn new(node_count: usize, edges: impl IntoIterator<Item = (NodeId, NodeId, Real)>) -> Self {
        let mut graph = UnGraph::with_capacity(node_count, 0);
        for _ in 0..node_count {
            graph.add_node(());
        }
        for (a, b, length) in edges {
            graph.add_edge(NodeIndex::new(a.pos()), NodeIndex::new(b.pos()), length);
        }
        Self { graph }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Shortest length from `source` to `target`, `None` if disconnected.
    ///
    /// Handles must be in range.
    pub fn distance(&self, source: NodeId, target: NodeId) -> Option<Real> {
        if source == target {
            return Some(0.0);
        }
        let goal = NodeIndex::new(target.pos());
        let costs = dijkstra(
            &self.graph,
            NodeIndex::new(source.pos()),
            Some(goal),
            |e| *e.weight(),
        );
        costs.get(&goal).copied()
    }

    /// Shortest lengths from `source` to every node, in handle order.
    pub fn distances_from(&self, source: NodeId) -> Vec<Option<Real>> {
        let mut out = vec![None; self.graph.node_count()];
        let costs = dijkstra(&self.graph, NodeIndex::new(source.pos()), None, |e| {
            *e.weight()
        });
        for (node, cost) in costs {
            out[node.index()] = Some(cost);
        }
        out
    }
}

/// Shortest lengths from one source node, addressed by OSM id.
#[derive(Debug, Clone)]
pub struct DistanceMap<'g> {
    graph: &'g Graph,
    source: OsmNodeId,
    lengths: Vec<Option<Real>>,
}

impl DistanceMap<'_> {
    pub fn source(&self) -> OsmNodeId {
        self.source
    }

    /// Length to `target`; `UnknownNode` if absent, `NoPath` if unreachable.
    pub fn get(&self, target: OsmNodeId) -> GraphResult<Real> {
        let handle = self.graph.node_id(target)?;
        self.lengths[handle.pos()].ok_or_else(|| GraphError::NoPath {
            source: self.source.to_string(),
            target: target.to_string(),
        })
    }
}

impl Graph {
    /// Sum of segment lengths along the length-weighted shortest path.
    pub fn shortest_path_length(&self, source: OsmNodeId, target: OsmNodeId) -> GraphResult<Real> {
        let s = self.node_id(source)?;
        let t = self.node_id(target)?;
        self.routing
            .distance(s, t)
            .ok_or_else(|| GraphError::NoPath {
                source: source.to_string(),
                target: target.to_string(),
            })
    }

    /// Single-source shortest lengths to every node of the graph.
    pub fn shortest_path_lengths_from(&self, source: OsmNodeId) -> GraphResult<DistanceMap<'_>> {
        let s = self.node_id(source)?;
        Ok(DistanceMap {
            graph: self,
            source,
            lengths: self.routing.distances_from(s),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u32) -> NodeId {
        NodeId::from_index(i)
    }

    #[test]
    fn picks_shorter_of_parallel_edges() {
        let routing = RoutingIndex::new(2, [(id(0), id(1), 30.0), (id(0), id(1), 12.0)]);
        assert_eq!(routing.distance(id(0), id(1)), Some(12.0));
    }

    #[test]
    fn detour_beats_long_direct_edge() {
        let routing = RoutingIndex::new(
            3,
            [
                (id(0), id(2), 100.0),
                (id(0), id(1), 20.0),
                (id(1), id(2), 30.0),
            ],
        );
        assert_eq!(routing.distance(id(0), id(2)), Some(50.0));
        assert_eq!(routing.distance(id(2), id(0)), Some(50.0));
    }

    #[test]
    fn disconnected_is_none() {
        let routing = RoutingIndex::new(3, [(id(0), id(1), 1.0)]);
        assert_eq!(routing.distance(id(0), id(2)), None);
        assert_eq!(routing.distance(id(2), id(2)), Some(0.0));

        let all = routing.distances_from(id(0));
        assert_eq!(all, vec![Some(0.0), Some(1.0), None]);
    }
}
