//! Graph validation logic.

use std::collections::HashMap;

use lv_core::EdgeId;

use crate::error::{GraphError, GraphResult};
use crate::graph::{Edge, Node};

/// Validate the graph structure: all references exist, attributes are usable, etc.
pub(crate) fn validate_structure(nodes: &[Node], edges: &[Edge]) -> GraphResult<()> {
    // Node handles are contiguous and coordinates usable
    for (i, node) in nodes.iter().enumerate() {
        if node.id.pos() != i {
            return Err(GraphError::IdNotFound { what: "NodeId" });
        }
        if !node.coord.is_finite() {
            return Err(GraphError::InvalidCoord { node: node.osm_id });
        }
    }

    for (i, edge) in edges.iter().enumerate() {
        if edge.id.pos() != i {
            return Err(GraphError::IdNotFound { what: "EdgeId" });
        }

        // Both endpoints must exist
        for node in edge.endpoints() {
            if node.pos() >= nodes.len() {
                return Err(GraphError::InvalidNodeRef {
                    edge: edge.id,
                    node,
                });
            }
        }

        if !edge.length.is_finite() || edge.length < 0.0 {
            return Err(GraphError::InvalidLength {
                edge: edge.id,
                length: edge.length,
            });
        }
    }

    Ok(())
}

/// Validate adjacency lists for consistency.
pub(crate) fn validate_adjacency(
    nodes: &[Node],
    edges: &[Edge],
    node_edge_offsets: &[usize],
    node_edges: &[EdgeId],
) -> GraphResult<()> {
    // Check that offsets array has correct length (nodes.len() + 1)
    if node_edge_offsets.len() != nodes.len() + 1 {
        return Err(GraphError::IdNotFound {
            what: "adjacency offsets",
        });
    }

    let mut seen: HashMap<EdgeId, usize> = HashMap::new();

    // For each node, validate its adjacency list
    for node in nodes {
        let idx = node.id.pos();
        let start = node_edge_offsets[idx];
        let end = node_edge_offsets[idx + 1];

        for &edge_id in &node_edges[start..end] {
            // Edge must exist and touch this node
            let touches = edges
                .get(edge_id.pos())
                .is_some_and(|edge| edge.opposite(node.id).is_some());
            if !touches {
                return Err(GraphError::InconsistentAdjacency {
                    edge: edge_id,
                    node: node.id,
                });
            }
            *seen.entry(edge_id).or_default() += 1;
        }
    }

    // Every edge appears once per distinct endpoint
    for edge in edges {
        let expected = if edge.is_self_loop() { 1 } else { 2 };
        if seen.get(&edge.id).copied().unwrap_or(0) != expected {
            return Err(GraphError::InconsistentAdjacency {
                edge: edge.id,
                node: edge.source,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lv_core::{Coord, Id, OsmNodeId, OsmWayId};

    fn node(i: u32) -> Node {
        Node {
            id: Id::from_index(i),
            osm_id: OsmNodeId::new(i as i64 + 100),
            coord: Coord::new(i as f64, 0.0),
        }
    }

    fn edge(i: u32, a: u32, b: u32, length: f64) -> Edge {
        Edge {
            id: Id::from_index(i),
            source: Id::from_index(a),
            target: Id::from_index(b),
            length,
            way: OsmWayId::new(1),
            highway: "residential".into(),
        }
    }

    #[test]
    fn validate_empty_graph() {
        assert!(validate_structure(&[], &[]).is_ok());
        assert!(validate_adjacency(&[], &[], &[0], &[]).is_ok());
    }

    #[test]
    fn validate_invalid_node_ref() {
        let nodes = vec![node(0)];
        let edges = vec![edge(0, 0, 99, 1.0)]; // Invalid!

        let result = validate_structure(&nodes, &edges);
        assert!(matches!(
            result.unwrap_err(),
            GraphError::InvalidNodeRef { .. }
        ));
    }

    #[test]
    fn validate_negative_length() {
        let nodes = vec![node(0), node(1)];
        let edges = vec![edge(0, 0, 1, -3.0)];
        assert!(matches!(
            validate_structure(&nodes, &edges),
            Err(GraphError::InvalidLength { .. })
        ));
    }

    #[test]
    fn validate_non_finite_coord() {
        let mut bad = node(0);
        bad.coord.y = f64::NAN;
        assert!(matches!(
            validate_structure(&[bad], &[]),
            Err(GraphError::InvalidCoord { .. })
        ));
    }

    #[test]
    fn validate_adjacency_missing_endpoint() {
        let nodes = vec![node(0), node(1)];
        let edges = vec![edge(0, 0, 1, 1.0)];
        // Edge listed at node 0 only
        let offsets = vec![0, 1, 1];
        let flat = vec![Id::from_index(0)];
        assert!(validate_adjacency(&nodes, &edges, &offsets, &flat).is_err());
    }

    #[test]
    fn validate_adjacency_wrong_node() {
        let nodes = vec![node(0), node(1), node(2)];
        let edges = vec![edge(0, 0, 1, 1.0)];
        // Edge listed at node 2, which it doesn't touch
        let offsets = vec![0, 1, 2, 3];
        let flat = vec![Id::from_index(0), Id::from_index(0), Id::from_index(0)];
        assert!(matches!(
            validate_adjacency(&nodes, &edges, &offsets, &flat),
            Err(GraphError::InconsistentAdjacency { .. })
        ));
    }
}
