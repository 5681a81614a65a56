//! lv-project: configuration and input documents, load and validation.
//!
//! Files are YAML unless their extension is `.json`.

pub mod schema;
pub mod validate;

use std::path::Path;

use lv_core::{Coord, Crs, SpatialConfig};
use lv_graph::{GraphError, WaySegmentGroup};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use schema::*;
pub use validate::{ValidationError, validate_config, validate_input};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> ProjectResult<T> {
    let content = std::fs::read_to_string(path)?;
    let doc = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(doc)
}

fn write_document<T: Serialize>(path: &Path, doc: &T) -> ProjectResult<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_yaml::to_string(doc)?
    };
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_config(path: &Path) -> ProjectResult<GridConfig> {
    let config: GridConfig = read_document(path)?;
    validate_config(&config)?;
    tracing::debug!(path = %path.display(), srid = ?config.osm.srid, "loaded config");
    Ok(config)
}

pub fn save_config(path: &Path, config: &GridConfig) -> ProjectResult<()> {
    validate_config(config)?;
    write_document(path, config)
}

pub fn load_input(path: &Path) -> ProjectResult<GridInput> {
    let input: GridInput = read_document(path)?;
    validate_input(&input)?;
    tracing::debug!(
        path = %path.display(),
        ways = input.ways.len(),
        points = input.points.len(),
        "loaded input"
    );
    Ok(input)
}

pub fn save_input(path: &Path, input: &GridInput) -> ProjectResult<()> {
    validate_input(input)?;
    write_document(path, input)
}

impl OsmConfig {
    pub fn crs(&self) -> ProjectResult<Crs> {
        let crs = match &self.srid {
            SridDef::Code(code) => Crs::epsg(*code),
            SridDef::Name(name) => Crs::from_user_input(name).map_err(|_| {
                ValidationError::InvalidValue {
                    field: "osm.srid".to_string(),
                    value: name.clone(),
                    reason: "expected an EPSG code".to_string(),
                }
            })?,
        };
        Ok(match self.crs_kind {
            Some(kind) => Crs::with_kind(crs.srid(), kind),
            None => crs,
        })
    }
}

impl GridConfig {
    pub fn to_spatial_config(&self) -> ProjectResult<SpatialConfig> {
        let mut config = SpatialConfig::new(self.osm.crs()?).with_earth_radius(self.osm.earth_radius_m);
        if let Some(tol) = self.osm.coordinate_tolerance {
            config = config.with_coordinate_tolerance(tol);
        }
        Ok(config)
    }
}

impl GridInput {
    pub fn to_ways(&self) -> ProjectResult<Vec<WaySegmentGroup>> {
        self.ways
            .iter()
            .map(|w| {
                WaySegmentGroup::new(
                    w.osm_id,
                    w.nodes.clone(),
                    w.length_segments.clone(),
                    w.highway.clone(),
                    w.geometry.iter().map(|&p| Coord::from(p)).collect(),
                )
                .map_err(ProjectError::from)
            })
            .collect()
    }
}
