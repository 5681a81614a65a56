//! Planar/angular coordinate pair.

use crate::numeric::Real;

/// A 2-D coordinate in a graph's CRS.
///
/// For geographic CRSs `x` is longitude and `y` is latitude, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: Real,
    pub y: Real,
}

impl Coord {
    #[inline]
    pub const fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Straight-line distance in CRS units.
    pub fn euclidean_distance(&self, other: &Coord) -> Real {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn to_array(self) -> [Real; 2] {
        [self.x, self.y]
    }
}

impl From<(Real, Real)> for Coord {
    fn from((x, y): (Real, Real)) -> Self {
        Coord { x, y }
    }
}

impl From<[Real; 2]> for Coord {
    fn from([x, y]: [Real; 2]) -> Self {
        Coord { x, y }
    }
}
