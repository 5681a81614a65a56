//! Routable graph construction from imported ways.

use lv_core::{Coord, OsmNodeId, OsmWayId, Real, SpatialConfig};
use tracing::{debug, warn};

use crate::builder::GraphBuilder;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeCoordinateMap};

/// One imported way: ordered nodes, per-segment lengths and per-node geometry.
///
/// Shape is checked on construction, so a value of this type always has
/// `length_segments.len() == nodes.len() - 1` and `geometry.len() == nodes.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaySegmentGroup {
    osm_id: OsmWayId,
    nodes: Vec<OsmNodeId>,
    length_segments: Vec<Real>,
    highway: String,
    geometry: Vec<Coord>,
}

impl WaySegmentGroup {
    pub fn new(
        osm_id: OsmWayId,
        nodes: Vec<OsmNodeId>,
        length_segments: Vec<Real>,
        highway: impl Into<String>,
        geometry: Vec<Coord>,
    ) -> GraphResult<Self> {
        let malformed = |reason: String| GraphError::MalformedWay {
            way: osm_id,
            reason,
        };

        if nodes.len() < 2 {
            return Err(malformed(format!(
                "needs at least 2 nodes, got {}",
                nodes.len()
            )));
        }
        if length_segments.len() != nodes.len() - 1 {
            return Err(malformed(format!(
                "{} nodes need {} segment lengths, got {}",
                nodes.len(),
                nodes.len() - 1,
                length_segments.len()
            )));
        }
        if geometry.len() != nodes.len() {
            return Err(malformed(format!(
                "{} nodes need {} geometry points, got {}",
                nodes.len(),
                nodes.len(),
                geometry.len()
            )));
        }
        if let Some((i, len)) = length_segments
            .iter()
            .enumerate()
            .find(|(_, l)| !l.is_finite() || **l < 0.0)
        {
            return Err(malformed(format!("segment {i} has invalid length {len}")));
        }
        if let Some(i) = geometry.iter().position(|c| !c.is_finite()) {
            return Err(malformed(format!("geometry point {i} is not finite")));
        }

        Ok(Self {
            osm_id,
            nodes,
            length_segments,
            highway: highway.into(),
            geometry,
        })
    }

    pub fn osm_id(&self) -> OsmWayId {
        self.osm_id
    }

    pub fn nodes(&self) -> &[OsmNodeId] {
        &self.nodes
    }

    pub fn length_segments(&self) -> &[Real] {
        &self.length_segments
    }

    pub fn highway(&self) -> &str {
        &self.highway
    }

    pub fn geometry(&self) -> &[Coord] {
        &self.geometry
    }

    /// Number of segments (edges) this way contributes.
    pub fn segment_count(&self) -> usize {
        self.length_segments.len()
    }

    /// Total way length.
    pub fn length(&self) -> Real {
        self.length_segments.iter().sum()
    }
}

/// Build the routable multigraph for a set of ways.
///
/// Every consecutive node pair of every way becomes one edge, in input order and
/// without deduplication. A node shared by several ways takes the coordinate of
/// the last way processed.
pub fn build_graph_from_ways(
    ways: &[WaySegmentGroup],
    config: &SpatialConfig,
) -> GraphResult<(Graph, NodeCoordinateMap)> {
    config.validate()?;

    let mut builder = GraphBuilder::new(config.crs);
    let mut moved = 0usize;

    for way in ways {
        let mut handles = Vec::with_capacity(way.nodes.len());
        for (&osm_id, &coord) in way.nodes.iter().zip(&way.geometry) {
            if let (Some(tol), Some(previous)) = (config.coordinate_tolerance, builder.coord(osm_id)) {
                let shift = previous.euclidean_distance(&coord);
                if shift > tol {
                    moved += 1;
                    warn!(
                        node = %osm_id,
                        way = %way.osm_id,
                        shift,
                        "node coordinate differs between ways; keeping the later one"
                    );
                }
            }
            handles.push(builder.add_node(osm_id, coord));
        }

        for (pair, &length) in handles.windows(2).zip(&way.length_segments) {
            builder.add_edge(pair[0], pair[1], length, way.osm_id, way.highway.as_str());
        }
    }

    let graph = builder.build()?;
    debug!(
        ways = ways.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        crs = %graph.crs(),
        moved,
        "built way graph"
    );

    let coords = graph.coordinate_map();
    Ok((graph, coords))
}
