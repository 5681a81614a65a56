//! Coordinate reference system tag and projected/geographic classification.
//!
//! The graph only carries an EPSG code. Coordinates are never transformed here;
//! the classification decides which nearest-neighbour metric is valid.

use core::fmt;

use crate::error::{CoreError, CoreResult};

/// Metric class of a CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CrsKind {
    /// Planar coordinates in linear units; Euclidean metric.
    Projected,
    /// Longitude/latitude in degrees; great-circle metric.
    Geographic,
}

/// Geographic 2-D EPSG codes recognised without an explicit override.
const GEOGRAPHIC_CODES: &[u32] = &[
    4019, 4148, 4151, 4167, 4171, 4230, 4258, 4267, 4269, 4283, 4314, 4326, 4490, 4612,
    4617, 4674,
];

/// Inclusive ranges of projected EPSG codes recognised without an explicit override.
const PROJECTED_RANGES: &[(u32, u32)] = &[
    (2056, 2056),   // CH1903+ / LV95
    (2154, 2154),   // RGF93 / Lambert-93
    (3034, 3035),   // ETRS89 / LCC + LAEA Europe
    (3040, 3051),   // ETRS89 / UTM + TM zones
    (3067, 3067),   // ETRS89 / TM35FIN
    (3395, 3395),   // World Mercator
    (3857, 3857),   // Web Mercator
    (5243, 5243),   // ETRS89 / LCC Germany
    (25828, 25838), // ETRS89 / UTM
    (27700, 27700), // British National Grid
    (28992, 28992), // Amersfoort / RD New
    (31466, 31469), // DHDN / Gauss-Krueger
    (32601, 32660), // WGS 84 / UTM north
    (32701, 32760), // WGS 84 / UTM south
    (900913, 900913),
];

/// A CRS identified by its EPSG code, optionally with an explicit metric class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs {
    srid: u32,
    kind: Option<CrsKind>,
}

impl Crs {
    /// CRS from an EPSG code. The metric class is looked up when asked for.
    pub const fn epsg(srid: u32) -> Self {
        Self { srid, kind: None }
    }

    /// CRS with an explicit metric class, for codes outside the built-in tables.
    pub const fn with_kind(srid: u32, kind: CrsKind) -> Self {
        Self {
            srid,
            kind: Some(kind),
        }
    }

    /// Parse `"epsg:4326"`, `"EPSG:4326"` or a bare `"4326"`.
    pub fn from_user_input(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        let code = match trimmed.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => {
                return Err(CoreError::InvalidCrs {
                    input: input.to_string(),
                });
            }
            None => trimmed,
        };
        code.trim()
            .parse::<u32>()
            .map(Self::epsg)
            .map_err(|_| CoreError::InvalidCrs {
                input: input.to_string(),
            })
    }

    pub fn srid(&self) -> u32 {
        self.srid
    }

    /// Metric class: the explicit override if any, else the built-in tables.
    ///
    /// `None` means the code is unknown and no nearest-neighbour metric can be chosen.
    pub fn kind(&self) -> Option<CrsKind> {
        if let Some(kind) = self.kind {
            return Some(kind);
        }
        if GEOGRAPHIC_CODES.contains(&self.srid) {
            return Some(CrsKind::Geographic);
        }
        if PROJECTED_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&self.srid))
        {
            return Some(CrsKind::Projected);
        }
        None
    }

    pub fn is_projected(&self) -> bool {
        self.kind() == Some(CrsKind::Projected)
    }

    pub fn is_geographic(&self) -> bool {
        self.kind() == Some(CrsKind::Geographic)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epsg:{}", self.srid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_user_input() {
        assert_eq!(Crs::from_user_input("epsg:4326").unwrap().srid(), 4326);
        assert_eq!(Crs::from_user_input("EPSG:3035").unwrap().srid(), 3035);
        assert_eq!(Crs::from_user_input(" 25832 ").unwrap().srid(), 25832);
        assert!(Crs::from_user_input("esri:102100").is_err());
        assert!(Crs::from_user_input("epsg:abc").is_err());
    }

    #[test]
    fn classify_known_codes() {
        assert_eq!(Crs::epsg(4326).kind(), Some(CrsKind::Geographic));
        assert_eq!(Crs::epsg(4258).kind(), Some(CrsKind::Geographic));
        assert_eq!(Crs::epsg(3035).kind(), Some(CrsKind::Projected));
        assert_eq!(Crs::epsg(32633).kind(), Some(CrsKind::Projected));
        assert_eq!(Crs::epsg(31467).kind(), Some(CrsKind::Projected));
        assert!(Crs::epsg(3857).is_projected());
        assert!(Crs::epsg(4326).is_geographic());
    }

    #[test]
    fn unknown_code_needs_override() {
        assert_eq!(Crs::epsg(99999).kind(), None);
        assert_eq!(
            Crs::with_kind(99999, CrsKind::Projected).kind(),
            Some(CrsKind::Projected)
        );
    }

    #[test]
    fn display_matches_graph_tag_format() {
        assert_eq!(Crs::epsg(4326).to_string(), "epsg:4326");
    }

    proptest! {
        #[test]
        fn display_parses_back(srid in any::<u32>()) {
            let crs = Crs::epsg(srid);
            prop_assert_eq!(Crs::from_user_input(&crs.to_string()).unwrap(), crs);
            prop_assert_eq!(Crs::from_user_input(&srid.to_string()).unwrap(), crs);
        }
    }
}
