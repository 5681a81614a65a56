//! Spatial configuration handed explicitly to graph building and lookups.

use crate::crs::Crs;
use crate::error::{CoreError, CoreResult};
use crate::numeric::{Real, ensure_finite};

/// Mean earth radius in meters (IUGG), used to turn central angles into meters.
pub const DEFAULT_EARTH_RADIUS_M: Real = 6_371_009.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialConfig {
    /// CRS applied uniformly to every node of a built graph.
    pub crs: Crs,
    /// Radius used by the haversine search to convert radians to meters.
    pub earth_radius_m: Real,
    /// When set, moving an already-placed node by more than this many CRS units
    /// while building from ways is logged.
    pub coordinate_tolerance: Option<Real>,
}

impl SpatialConfig {
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            earth_radius_m: DEFAULT_EARTH_RADIUS_M,
            coordinate_tolerance: None,
        }
    }

    pub fn with_earth_radius(mut self, earth_radius_m: Real) -> Self {
        self.earth_radius_m = earth_radius_m;
        self
    }

    pub fn with_coordinate_tolerance(mut self, tolerance: Real) -> Self {
        self.coordinate_tolerance = Some(tolerance);
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        let radius = ensure_finite(self.earth_radius_m, "earth_radius_m")?;
        if radius <= 0.0 {
            return Err(CoreError::InvalidArg {
                what: "earth_radius_m must be positive",
            });
        }
        if let Some(tol) = self.coordinate_tolerance {
            if ensure_finite(tol, "coordinate_tolerance")? < 0.0 {
                return Err(CoreError::InvalidArg {
                    what: "coordinate_tolerance must be non-negative",
                });
            }
        }
        Ok(())
    }
}
