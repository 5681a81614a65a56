//! lv-core: stable foundation for lvgrid.
//!
//! Contains:
//! - ids (compact arena handles + opaque OSM identifiers)
//! - geo (coordinates)
//! - crs (coordinate reference system tag + classification)
//! - config (spatial configuration passed into graph building and lookups)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod config;
pub mod crs;
pub mod error;
pub mod geo;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use config::{DEFAULT_EARTH_RADIUS_M, SpatialConfig};
pub use crs::{Crs, CrsKind};
pub use error::{CoreError, CoreResult};
pub use geo::Coord;
pub use ids::*;
pub use numeric::*;
