//! Planar nearest-node search for projected CRSs.

use lv_core::{Coord, CrsKind, NodeId, Real};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::traits::{SpatialIndex, lowest_handle_at_min};

type Entry = GeomWithData<[f64; 2], u32>;

/// R*-tree over node coordinates, Euclidean metric.
pub struct EuclideanIndex {
    tree: RTree<Entry>,
    coords: Vec<Coord>,
}

impl EuclideanIndex {
    /// Index `coords`; position `i` becomes node handle `i`.
    pub fn new(coords: Vec<Coord>) -> Self {
        let entries: Vec<Entry> = coords
            .iter()
            .enumerate()
            .map(|(i, c)| GeomWithData::new(c.to_array(), i as u32))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            coords,
        }
    }
}

impl SpatialIndex for EuclideanIndex {
    fn kind(&self) -> CrsKind {
        CrsKind::Projected
    }

    fn len(&self) -> usize {
        self.coords.len()
    }

    fn nearest(&self, point: Coord) -> Option<(NodeId, Real)> {
        let hits = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&point.to_array())
            .map(|(entry, d2)| (entry.data, d2));
        let id = lowest_handle_at_min(hits)?;
        Some((id, self.coords[id.pos()].euclidean_distance(&point)))
    }
}
