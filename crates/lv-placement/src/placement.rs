//! Power-distance substation placement.
//!
//! Every candidate row acts both as a load source and as a possible
//! substation site. For a site `t` and a source row `s` the power distance is
//! `shortest_path_length(s.node, t) * s.capacity`. The chosen site is the one
//! owning the smallest strictly positive power distance seen over all
//! (site, source) pairs. Sites are scanned in row order and a later pair only
//! replaces the running best when it is strictly smaller.
//!
//! Zero-length pairs (a row against its own node) and zero-capacity rows never
//! compete. When no pair is positive the first candidate row is returned and
//! [`Placement::power_distance`] is `None`.

use std::collections::HashMap;

use lv_core::{Coord, OsmNodeId, Real, ensure_non_negative};
use lv_graph::{DistanceMap, Graph, GraphError};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::candidate::CandidateNode;
use crate::error::{PlacementError, PlacementResult};

/// Outcome of one placement run.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub node: OsmNodeId,
    pub coord: Coord,
    /// Smallest positive power distance found, `None` if every pair was zero.
    pub power_distance: Option<Real>,
    /// Number of (site, source) pairs evaluated.
    pub evaluated_pairs: usize,
}

/// Coordinate of the substation site for `candidates` on `graph`.
pub fn place_substation(graph: &Graph, candidates: &[CandidateNode]) -> PlacementResult<Coord> {
    place_substation_detailed(graph, candidates).map(|p| p.coord)
}

/// Same as [`place_substation`] but reports the winning node and its score.
pub fn place_substation_detailed(
    graph: &Graph,
    candidates: &[CandidateNode],
) -> PlacementResult<Placement> {
    let first = candidates.first().ok_or(PlacementError::NoCandidates)?;
    check_candidates(graph, candidates)?;

    // One single-source search per distinct node; undirected, so the length
    // from `s` to `t` is read from the map rooted at `s`.
    let mut from_source: HashMap<OsmNodeId, DistanceMap<'_>> = HashMap::new();
    for c in candidates {
        if !from_source.contains_key(&c.node) {
            from_source.insert(c.node, graph.shortest_path_lengths_from(c.node)?);
        }
    }
    debug!(
        candidates = candidates.len(),
        sources = from_source.len(),
        "evaluating substation sites"
    );

    let mut best = Real::INFINITY;
    let mut best_node = first.node;
    let mut evaluated_pairs = 0;

    for target in candidates {
        for source in candidates {
            let Some(lengths) = from_source.get(&source.node) else {
                return Err(PlacementError::UnknownNode { node: source.node });
            };
            let length = lengths.get(target.node).map_err(|err| match err {
                GraphError::NoPath { .. } => PlacementError::UnreachableNode {
                    from: source.node,
                    to: target.node,
                },
                other => PlacementError::Graph(other),
            })?;
            evaluated_pairs += 1;

            let power_distance = length * source.capacity;
            if power_distance > 0.0 && power_distance < best {
                best = power_distance;
                best_node = target.node;
            }
        }
    }

    let power_distance = best.is_finite().then_some(best);
    if power_distance.is_none() {
        warn!(
            node = %best_node,
            "no positive power distance among candidates, using first candidate"
        );
    }

    let coord = site_coord(graph, candidates, best_node)?;
    info!(node = %best_node, x = coord.x, y = coord.y, ?power_distance, "substation placed");

    Ok(Placement {
        node: best_node,
        coord,
        power_distance,
        evaluated_pairs,
    })
}

/// Graph and candidate rows for one independent placement.
#[derive(Debug, Clone, Copy)]
pub struct PlacementJob<'a> {
    pub graph: &'a Graph,
    pub candidates: &'a [CandidateNode],
}

/// Runs independent placements in parallel; results keep job order.
pub fn place_substations(jobs: &[PlacementJob<'_>]) -> Vec<PlacementResult<Placement>> {
    jobs.par_iter()
        .map(|job| place_substation_detailed(job.graph, job.candidates))
        .collect()
}

fn check_candidates(graph: &Graph, candidates: &[CandidateNode]) -> PlacementResult<()> {
    for c in candidates {
        if ensure_non_negative(c.capacity, "capacity").is_err() {
            return Err(PlacementError::InvalidCapacity {
                node: c.node,
                capacity: c.capacity,
            });
        }
        if !graph.contains(c.node) {
            return Err(PlacementError::UnknownNode { node: c.node });
        }
    }
    Ok(())
}

/// Coordinate of the first row for `node`, else the graph node's own.
fn site_coord(graph: &Graph, candidates: &[CandidateNode], node: OsmNodeId) -> PlacementResult<Coord> {
    match candidates.iter().find(|c| c.node == node).and_then(|c| c.coord) {
        Some(coord) => Ok(coord),
        None => Ok(graph.coord(node)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lv_core::{Crs, OsmWayId};
    use lv_graph::GraphBuilder;

    fn n(i: i64) -> OsmNodeId {
        OsmNodeId::new(i)
    }

    fn line() -> Graph {
        let mut b = GraphBuilder::new(Crs::epsg(3035));
        let a = b.add_node(n(1), Coord::new(0.0, 0.0));
        let c = b.add_node(n(2), Coord::new(100.0, 0.0));
        b.add_edge(a, c, 100.0, OsmWayId::new(1), "residential");
        b.build().unwrap()
    }

    #[test]
    fn empty_candidates() {
        assert_eq!(
            place_substation(&line(), &[]),
            Err(PlacementError::NoCandidates)
        );
    }

    #[test]
    fn negative_capacity_rejected() {
        let err = place_substation(&line(), &[CandidateNode::new(n(1), -1.0)]).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidCapacity { .. }));
    }

    #[test]
    fn nan_capacity_rejected() {
        let err = place_substation(&line(), &[CandidateNode::new(n(1), f64::NAN)]).unwrap_err();
        assert!(matches!(err, PlacementError::InvalidCapacity { .. }));
    }

    #[test]
    fn unknown_candidate_node() {
        let err = place_substation(&line(), &[CandidateNode::new(n(9), 1.0)]).unwrap_err();
        assert_eq!(err, PlacementError::UnknownNode { node: n(9) });
    }

    #[test]
    fn pairs_are_counted() {
        let cands = [CandidateNode::new(n(1), 10.0), CandidateNode::new(n(2), 1.0)];
        let p = place_substation_detailed(&line(), &cands).unwrap();
        assert_eq!(p.evaluated_pairs, 4);
        // B->A costs 100 * 1, A->B costs 100 * 10
        assert_eq!(p.node, n(1));
        assert_eq!(p.power_distance, Some(100.0));
    }

    #[test]
    fn graph_coordinate_used_without_row_coordinate() {
        let cands = [CandidateNode::new(n(1), 0.0), CandidateNode::new(n(2), 0.0)];
        let p = place_substation_detailed(&line(), &cands).unwrap();
        assert_eq!(p.node, n(1));
        assert_eq!(p.coord, Coord::new(0.0, 0.0));
        assert_eq!(p.power_distance, None);
    }
}
