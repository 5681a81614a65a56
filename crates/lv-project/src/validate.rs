//! Document validation logic.

use crate::schema::{GridConfig, GridInput, LATEST_VERSION, SridDef, WayDef};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_config(config: &GridConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let osm = &config.osm;
    if let SridDef::Name(name) = &osm.srid {
        if lv_core::Crs::from_user_input(name).is_err() {
            return Err(invalid("osm.srid", name, "expected an EPSG code"));
        }
    }
    if !osm.earth_radius_m.is_finite() || osm.earth_radius_m <= 0.0 {
        return Err(invalid(
            "osm.earth_radius_m",
            osm.earth_radius_m,
            "must be positive",
        ));
    }
    if let Some(tol) = osm.coordinate_tolerance {
        if !tol.is_finite() || tol < 0.0 {
            return Err(invalid(
                "osm.coordinate_tolerance",
                tol,
                "must be non-negative",
            ));
        }
    }
    Ok(())
}

pub fn validate_input(input: &GridInput) -> Result<(), ValidationError> {
    // Repeated way ids are kept; each occurrence adds its own edges.
    for way in &input.ways {
        validate_way(way)?;
    }

    let mut point_ids = HashSet::new();
    for point in &input.points {
        if !point_ids.insert(point.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: point.id.clone(),
                context: "points".to_string(),
            });
        }
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(invalid(
                format!("points[{}]", point.id),
                format!("({}, {})", point.x, point.y),
                "coordinates must be finite",
            ));
        }
        if !point.capacity.is_finite() || point.capacity < 0.0 {
            return Err(invalid(
                format!("points[{}].capacity", point.id),
                point.capacity,
                "must be non-negative",
            ));
        }
    }

    Ok(())
}

fn validate_way(way: &WayDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("ways[{}].{name}", way.osm_id);

    if way.nodes.len() < 2 {
        return Err(invalid(field("nodes"), way.nodes.len(), "need at least 2 nodes"));
    }
    if way.length_segments.len() + 1 != way.nodes.len() {
        return Err(invalid(
            field("length_segments"),
            way.length_segments.len(),
            "need one length per consecutive node pair",
        ));
    }
    if way.geometry.len() != way.nodes.len() {
        return Err(invalid(
            field("geometry"),
            way.geometry.len(),
            "need one point per node",
        ));
    }
    if let Some(len) = way
        .length_segments
        .iter()
        .find(|l| !l.is_finite() || **l < 0.0)
    {
        return Err(invalid(field("length_segments"), len, "must be non-negative"));
    }
    if way.geometry.iter().flatten().any(|v| !v.is_finite()) {
        return Err(invalid(field("geometry"), "non-finite", "coordinates must be finite"));
    }
    Ok(())
}
