//! lv-spatial: nearest graph node lookup for lvgrid.
//!
//! Maps arbitrary coordinates (building loads, generators, ...) onto the nodes
//! of a way graph. Two search strategies are always available and selected by
//! the graph's CRS:
//! - [`EuclideanIndex`] for projected CRSs (distance in CRS units)
//! - [`HaversineIndex`] for geographic CRSs (great-circle distance in meters)

pub mod error;
pub mod euclidean;
pub mod haversine;
pub mod locator;
pub mod traits;

pub use error::{SpatialError, SpatialResult};
pub use euclidean::EuclideanIndex;
pub use haversine::{HaversineIndex, haversine_central_angle};
pub use locator::{NearestNodeCache, NodeLocator, nearest_node, nearest_nodes};
pub use traits::SpatialIndex;
