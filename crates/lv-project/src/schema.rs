//! Configuration and input document schema.

use lv_core::{CrsKind, DEFAULT_EARTH_RADIUS_M, OsmNodeId, OsmWayId};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

fn latest_version() -> u32 {
    LATEST_VERSION
}

fn default_earth_radius() -> f64 {
    DEFAULT_EARTH_RADIUS_M
}

/// Run configuration (`config.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "latest_version")]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub osm: OsmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OsmConfig {
    pub srid: SridDef,
    #[serde(default = "default_earth_radius")]
    pub earth_radius_m: f64,
    /// Overrides the built-in EPSG classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs_kind: Option<CrsKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_tolerance: Option<f64>,
}

/// An EPSG code written either as a number or as `"epsg:<code>"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SridDef {
    Code(u32),
    Name(String),
}

/// Street geometry and points of interest for one grid area.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GridInput {
    #[serde(default)]
    pub ways: Vec<WayDef>,
    #[serde(default)]
    pub points: Vec<PointDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WayDef {
    pub osm_id: OsmWayId,
    pub nodes: Vec<OsmNodeId>,
    pub length_segments: Vec<f64>,
    #[serde(default)]
    pub highway: String,
    /// One `[x, y]` per entry of `nodes`.
    pub geometry: Vec<[f64; 2]>,
}

/// A load or generator to be attached to the grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointDef {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub capacity: f64,
}
