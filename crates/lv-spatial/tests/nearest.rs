//! Nearest-node lookups against built way graphs.

use lv_core::{Coord, Crs, CrsKind, OsmNodeId, OsmWayId, SpatialConfig};
use lv_graph::{Graph, GraphBuilder, WaySegmentGroup, build_graph_from_ways};
use lv_spatial::{NearestNodeCache, NodeLocator, SpatialError, nearest_node, nearest_nodes};
use proptest::prelude::*;

/// Reference great-circle distance (spherical law of haversines), meters.
fn reference_haversine(lon1: f64, lat1: f64, lon2: f64, lat2: f64, radius: f64) -> f64 {
    let (p1, p2) = (lat1.to_radians(), lat2.to_radians());
    let dp = p2 - p1;
    let dl = (lon2 - lon1).to_radians();
    let a = (dp / 2.0).sin().powi(2) + p1.cos() * p2.cos() * (dl / 2.0).sin().powi(2);
    radius * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

fn graph_of(crs: Crs, points: &[(i64, f64, f64)]) -> Graph {
    let mut builder = GraphBuilder::new(crs);
    for &(id, x, y) in points {
        builder.add_node(OsmNodeId::new(id), Coord::new(x, y));
    }
    builder.build().unwrap()
}

fn projected() -> SpatialConfig {
    SpatialConfig::new(Crs::epsg(3035))
}

fn geographic() -> SpatialConfig {
    SpatialConfig::new(Crs::epsg(4326))
}

#[test]
fn single_node_graph_always_wins() {
    let graph = graph_of(Crs::epsg(3035), &[(7, 100.0, 200.0)]);
    for (x, y) in [(0.0, 0.0), (100.0, 200.0), (-5e6, 3e6)] {
        let (id, dist) = nearest_node(&graph, x, y, &projected()).unwrap();
        assert_eq!(id, OsmNodeId::new(7));
        let expected = ((x - 100.0_f64).powi(2) + (y - 200.0_f64).powi(2)).sqrt();
        assert!((dist - expected).abs() < 1e-9 * expected.max(1.0));
    }
}

#[test]
fn single_node_geographic_graph() {
    let graph = graph_of(Crs::epsg(4326), &[(1, 13.4050, 52.5200)]);
    let (id, dist) = nearest_node(&graph, 2.3522, 48.8566, &geographic()).unwrap();
    assert_eq!(id, OsmNodeId::new(1));
    // Berlin - Paris, roughly 878 km
    assert!((dist - 878_000.0).abs() < 5_000.0);
}

#[test]
fn haversine_distance_matches_reference() {
    let nodes = [
        (1, 13.3777, 52.5163),
        (2, 13.4132, 52.5219),
        (3, 13.3500, 52.5145),
        (4, 13.4546, 52.5105),
    ];
    let graph = graph_of(Crs::epsg(4326), &nodes);
    let config = geographic();
    let xs = [13.3790, 13.4100, 13.3400, 13.4600];
    let ys = [52.5170, 52.5230, 52.5140, 52.5110];

    let (ids, dists) = nearest_nodes(&graph, &xs, &ys, &config).unwrap();
    let expected_ids: Vec<_> = [1, 2, 3, 4].into_iter().map(OsmNodeId::new).collect();
    assert_eq!(ids, expected_ids);

    for i in 0..4 {
        let (_, lon, lat) = nodes[i];
        let reference = reference_haversine(xs[i], ys[i], lon, lat, config.earth_radius_m);
        assert!(
            (dists[i] - reference).abs() < 1e-3,
            "query {i}: got {} expected {}",
            dists[i],
            reference
        );
    }
}

#[test]
fn repeated_queries_are_identical() {
    let graph = graph_of(
        Crs::epsg(3035),
        &[(1, 0.0, 0.0), (2, 10.0, 0.0), (3, 10.0, 10.0), (4, 0.0, 10.0)],
    );
    let locator = NodeLocator::new(&graph, &projected()).unwrap();
    let xs = [1.0, 9.0, 5.0, 5.0];
    let ys = [1.0, 9.5, 5.0, -3.0];

    let first = locator.nearest(&xs, &ys).unwrap();
    let second = locator.nearest(&xs, &ys).unwrap();
    let fresh = nearest_nodes(&graph, &xs, &ys, &projected()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, fresh);
    // (5, 5) is equidistant from all four corners; first inserted wins
    assert_eq!(first.0[2], OsmNodeId::new(1));
}

#[test]
fn large_batches_keep_query_order() {
    let graph = graph_of(Crs::epsg(3035), &[(1, 0.0, 0.0), (2, 1000.0, 0.0)]);
    let xs: Vec<f64> = (0..1000).map(|i| i as f64).collect();
    let ys = vec![0.0; xs.len()];

    let (ids, dists) = nearest_nodes(&graph, &xs, &ys, &projected()).unwrap();
    assert_eq!(ids.len(), 1000);
    for (i, (id, d)) in ids.iter().zip(&dists).enumerate() {
        let x = i as f64;
        let expected = if x <= 500.0 { OsmNodeId::new(1) } else { OsmNodeId::new(2) };
        assert_eq!(*id, expected, "query {i}");
        assert_eq!(*d, x.min(1000.0 - x));
    }
}

#[test]
fn rejects_bad_queries() {
    let graph = graph_of(Crs::epsg(3035), &[(1, 0.0, 0.0)]);
    let config = projected();

    assert!(matches!(
        nearest_nodes(&graph, &[1.0, 2.0], &[1.0], &config),
        Err(SpatialError::InvalidCoordinate { .. })
    ));
    assert!(matches!(
        nearest_nodes(&graph, &[1.0, f64::NAN], &[1.0, 2.0], &config),
        Err(SpatialError::InvalidCoordinate { .. })
    ));
    assert!(matches!(
        nearest_node(&graph, 0.0, f64::INFINITY, &config),
        Err(SpatialError::InvalidCoordinate { .. })
    ));
}

#[test]
fn empty_graph_is_an_error() {
    let graph = GraphBuilder::new(Crs::epsg(3035)).build().unwrap();
    assert!(matches!(
        nearest_node(&graph, 0.0, 0.0, &projected()),
        Err(SpatialError::EmptyGraph)
    ));
}

#[test]
fn unknown_crs_has_no_backend() {
    let graph = graph_of(Crs::epsg(99999), &[(1, 0.0, 0.0)]);
    let config = SpatialConfig::new(Crs::epsg(99999));
    assert!(matches!(
        nearest_node(&graph, 0.0, 0.0, &config),
        Err(SpatialError::UnsupportedSpatialBackend { .. })
    ));

    // An explicit classification makes the same code usable.
    let crs = Crs::with_kind(99999, CrsKind::Projected);
    let graph = graph_of(crs, &[(1, 0.0, 0.0)]);
    let locator = NodeLocator::new(&graph, &SpatialConfig::new(crs)).unwrap();
    assert_eq!(locator.kind(), CrsKind::Projected);
}

#[test]
fn cache_rebuilds_when_nodes_change() {
    let config = projected();
    let way = |x: f64| {
        WaySegmentGroup::new(
            OsmWayId::new(1),
            vec![OsmNodeId::new(1), OsmNodeId::new(2)],
            vec![10.0],
            "residential",
            vec![Coord::new(0.0, 0.0), Coord::new(x, 0.0)],
        )
        .unwrap()
    };
    let (g1, _) = build_graph_from_ways(&[way(10.0)], &config).unwrap();
    let (g2, _) = build_graph_from_ways(&[way(-10.0)], &config).unwrap();

    let mut cache = NearestNodeCache::new();
    assert!(!cache.is_built());
    let hit = cache.locator(&g1, &config).unwrap().nearest_one(9.0, 0.0).unwrap();
    assert_eq!(hit.0, OsmNodeId::new(2));
    assert!(cache.locator(&g1, &config).unwrap().is_current(&g1, &config));

    let hit = cache.locator(&g2, &config).unwrap().nearest_one(9.0, 0.0).unwrap();
    assert_eq!(hit.0, OsmNodeId::new(1));
    assert!(!cache.locator(&g2, &config).unwrap().is_current(&g1, &config));

    cache.invalidate();
    assert!(!cache.is_built());
}

proptest! {
    #[test]
    fn euclidean_result_is_never_beaten(
        points in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 1..40),
        qx in -1200.0f64..1200.0,
        qy in -1200.0f64..1200.0,
    ) {
        let nodes: Vec<(i64, f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| (i as i64, x, y))
            .collect();
        let graph = graph_of(Crs::epsg(25833), &nodes);

        let (id, dist) = nearest_node(&graph, qx, qy, &SpatialConfig::new(Crs::epsg(25833))).unwrap();
        let best = graph.coord(id).unwrap();
        prop_assert!((best.euclidean_distance(&Coord::new(qx, qy)) - dist).abs() < 1e-9);
        for &(_, x, y) in &nodes {
            let d = Coord::new(x, y).euclidean_distance(&Coord::new(qx, qy));
            prop_assert!(dist <= d + 1e-9);
        }
    }
}
