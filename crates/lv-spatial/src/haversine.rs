//! Great-circle nearest-node search for geographic CRSs.
//!
//! Nodes are placed on the unit sphere. Chord length grows monotonically with
//! central angle, so the Euclidean nearest neighbour in 3-D is the great-circle
//! nearest neighbour. The reported distance is recomputed with the haversine
//! formula and scaled by the configured earth radius.

use lv_core::{Coord, CrsKind, NodeId, Real};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use crate::traits::{SpatialIndex, lowest_handle_at_min};

type Entry = GeomWithData<[f64; 3], u32>;

/// Central angle in radians between two lon/lat points given in degrees.
pub fn haversine_central_angle(a: Coord, b: Coord) -> Real {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * h.sqrt().min(1.0).asin()
}

fn unit_sphere(c: Coord) -> [f64; 3] {
    let lat = c.y.to_radians();
    let lon = c.x.to_radians();
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

/// R*-tree over unit-sphere positions of lon/lat node coordinates.
pub struct HaversineIndex {
    tree: RTree<Entry>,
    coords: Vec<Coord>,
    earth_radius_m: Real,
}

impl HaversineIndex {
    /// Index `coords` (x = longitude, y = latitude, degrees); position `i` becomes handle `i`.
    pub fn new(coords: Vec<Coord>, earth_radius_m: Real) -> Self {
        let entries: Vec<Entry> = coords
            .iter()
            .enumerate()
            .map(|(i, &c)| GeomWithData::new(unit_sphere(c), i as u32))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
            coords,
            earth_radius_m,
        }
    }
}

impl SpatialIndex for HaversineIndex {
    fn kind(&self) -> CrsKind {
        CrsKind::Geographic
    }

    fn len(&self) -> usize {
        self.coords.len()
    }

    fn nearest(&self, point: Coord) -> Option<(NodeId, Real)> {
        let hits = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&unit_sphere(point))
            .map(|(entry, d2)| (entry.data, d2));
        let id = lowest_handle_at_min(hits)?;
        let angle = haversine_central_angle(point, self.coords[id.pos()]);
        Some((id, angle * self.earth_radius_m))
    }
}
