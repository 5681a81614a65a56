//! Candidate connection points.

use lv_core::{Coord, OsmNodeId, Real};
use lv_spatial::NodeLocator;

use crate::error::PlacementResult;

/// A graph node annotated with the load or generation it connects.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateNode {
    pub node: OsmNodeId,
    /// Load or generation magnitude, non-negative.
    pub capacity: Real,
    /// Coordinate reported when this candidate wins; the graph node's own
    /// coordinate is used when absent.
    pub coord: Option<Coord>,
}

impl CandidateNode {
    pub fn new(node: OsmNodeId, capacity: Real) -> Self {
        Self {
            node,
            capacity,
            coord: None,
        }
    }

    pub fn with_coord(mut self, coord: Coord) -> Self {
        self.coord = Some(coord);
        self
    }
}

/// A point of interest (building, generator, ...) with its capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLoad {
    pub coord: Coord,
    pub capacity: Real,
}

/// One candidate row per point, attached to the point's nearest graph node.
///
/// Several points may share a node; each keeps its own row. A row keeps the
/// point's own location, so a winning site is reported where its first point
/// lies rather than at the graph node.
pub fn candidates_from_points(
    locator: &NodeLocator,
    points: &[PointLoad],
) -> PlacementResult<Vec<CandidateNode>> {
    let xs: Vec<Real> = points.iter().map(|p| p.coord.x).collect();
    let ys: Vec<Real> = points.iter().map(|p| p.coord.y).collect();
    let (nodes, _) = locator.nearest(&xs, &ys)?;

    Ok(nodes
        .into_iter()
        .zip(points)
        .map(|(node, p)| CandidateNode::new(node, p.capacity).with_coord(p.coord))
        .collect())
}
