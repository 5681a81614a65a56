//! Integration tests for lv-graph.

use std::collections::HashSet;

use lv_core::{Coord, Crs, OsmNodeId, OsmWayId, SpatialConfig};
use lv_graph::{
    Branch, CableDistributor, GraphBuilder, GraphError, GridNodeKey, GridTopology, Station,
    WaySegmentGroup, build_graph_from_ways,
};
use proptest::prelude::*;

fn straight_way(id: i64, nodes: &[i64], x0: f64) -> WaySegmentGroup {
    let geometry = (0..nodes.len())
        .map(|i| Coord::new(x0 + 10.0 * i as f64, 0.0))
        .collect();
    WaySegmentGroup::new(
        OsmWayId::new(id),
        nodes.iter().copied().map(OsmNodeId::new).collect(),
        vec![10.0; nodes.len() - 1],
        "residential",
        geometry,
    )
    .unwrap()
}

fn projected() -> SpatialConfig {
    SpatialConfig::new(Crs::epsg(25832))
}

#[test]
fn build_minimal_graph() {
    // Build: 1 -(10)- 2 -(10)- 3
    let (graph, coords) = build_graph_from_ways(&[straight_way(1, &[1, 2, 3], 0.0)], &projected()).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.crs().to_string(), "epsg:25832");
    assert_eq!(coords.len(), 3);

    // Middle node touches both segments
    let mid = graph.node_id(OsmNodeId::new(2)).unwrap();
    assert_eq!(graph.incident_edges(mid).len(), 2);
    assert_eq!(graph.degree(mid), 2);
}

#[test]
fn repeated_way_produces_parallel_edges() {
    let way = straight_way(5, &[1, 2], 0.0);
    let (graph, _) = build_graph_from_ways(&[way.clone(), way], &projected()).unwrap();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
    let a = graph.node_id(OsmNodeId::new(1)).unwrap();
    let b = graph.node_id(OsmNodeId::new(2)).unwrap();
    assert_eq!(graph.neighbors(a).collect::<Vec<_>>(), vec![b, b]);
}

#[test]
fn shortest_path_uses_segment_lengths() {
    // Chain 1-2-3 (10 + 10) next to a long shortcut 1-3 (50)
    let direct = WaySegmentGroup::new(
        OsmWayId::new(2),
        vec![OsmNodeId::new(1), OsmNodeId::new(3)],
        vec![50.0],
        "track",
        vec![Coord::new(0.0, 0.0), Coord::new(20.0, 0.0)],
    )
    .unwrap();
    let (graph, _) = build_graph_from_ways(&[straight_way(1, &[1, 2, 3], 0.0), direct], &projected()).unwrap();

    let len = graph
        .shortest_path_length(OsmNodeId::new(1), OsmNodeId::new(3))
        .unwrap();
    assert_eq!(len, 20.0);

    let from_one = graph.shortest_path_lengths_from(OsmNodeId::new(1)).unwrap();
    assert_eq!(from_one.get(OsmNodeId::new(2)).unwrap(), 10.0);
    assert_eq!(from_one.get(OsmNodeId::new(1)).unwrap(), 0.0);
}

#[test]
fn disconnected_graph_reports_no_path() {
    let (graph, _) = build_graph_from_ways(
        &[straight_way(1, &[1, 2], 0.0), straight_way(2, &[3, 4], 100.0)],
        &projected(),
    )
    .unwrap();

    let err = graph
        .shortest_path_length(OsmNodeId::new(1), OsmNodeId::new(4))
        .unwrap_err();
    assert!(matches!(err, GraphError::NoPath { .. }));

    let from_one = graph.shortest_path_lengths_from(OsmNodeId::new(1)).unwrap();
    assert!(matches!(
        from_one.get(OsmNodeId::new(3)),
        Err(GraphError::NoPath { .. })
    ));
    assert!(matches!(
        graph.shortest_path_length(OsmNodeId::new(1), OsmNodeId::new(99)),
        Err(GraphError::UnknownNode { .. })
    ));
}

#[test]
fn builder_rejects_dangling_edge() {
    let mut builder = GraphBuilder::new(Crs::epsg(3035));
    let a = builder.add_node(OsmNodeId::new(1), Coord::new(0.0, 0.0));
    builder.add_edge(a, lv_core::NodeId::from_index(5), 1.0, OsmWayId::new(1), "service");
    assert!(matches!(
        builder.build(),
        Err(GraphError::InvalidNodeRef { .. })
    ));
}

#[test]
fn topology_path_length_and_disconnection() {
    let mut grid = GridTopology::new();
    grid.add_node(Station::new(1).at(Coord::new(0.0, 0.0)));
    for id in 1..=3 {
        grid.add_node(CableDistributor::new(id));
    }
    grid.add_node(CableDistributor::new(9));

    let st = GridNodeKey::Station(1);
    let cd = GridNodeKey::CableDistributor;
    grid.add_edge(st, cd(1), Branch::new(120.0)).unwrap();
    grid.add_edge(cd(1), cd(2), Branch::new(80.0)).unwrap();
    grid.add_edge(st, cd(3), Branch::new(30.0)).unwrap();
    grid.add_edge(cd(3), cd(2), Branch::new(30.0)).unwrap();

    assert_eq!(grid.path_length(st, cd(2)).unwrap(), 60.0);
    assert_eq!(grid.path_length(cd(1), cd(3)).unwrap(), 110.0);
    assert!(matches!(
        grid.path_length(st, cd(9)),
        Err(GraphError::NoPath { .. })
    ));
    assert_eq!(grid.isolated_nodes(), vec![cd(9)]);
}

proptest! {
    #[test]
    fn edge_count_is_segments_times_ways(
        node_counts in prop::collection::vec(2usize..8, 1..6),
        repeats in 1usize..3,
    ) {
        // Ways share a node pool so nodes repeat across ways.
        let mut ways = Vec::new();
        for (w, &n) in node_counts.iter().enumerate() {
            let nodes: Vec<i64> = (0..n as i64).map(|i| (i * 7 + w as i64) % 10).collect();
            for _ in 0..repeats {
                ways.push(straight_way(w as i64, &nodes, 0.0));
            }
        }

        let (graph, coords) = build_graph_from_ways(&ways, &projected()).unwrap();

        let expected_edges: usize = ways.iter().map(|w| w.nodes().len() - 1).sum();
        let distinct: HashSet<_> = ways.iter().flat_map(|w| w.nodes().iter().copied()).collect();
        prop_assert_eq!(graph.edge_count(), expected_edges);
        prop_assert_eq!(graph.node_count(), distinct.len());
        prop_assert_eq!(coords.len(), distinct.len());
    }
}
