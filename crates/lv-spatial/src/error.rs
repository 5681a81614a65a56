//! Error types for nearest-node lookups.

use lv_core::{CoreError, Crs};
use thiserror::Error;

/// Errors that can occur while building or querying a spatial index.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    #[error("Invalid query coordinate: {what}")]
    InvalidCoordinate { what: String },

    #[error("Graph has no nodes to search")]
    EmptyGraph,

    #[error("No nearest-neighbour backend for {crs}: CRS is neither known projected nor geographic")]
    UnsupportedSpatialBackend { crs: Crs },

    #[error("Configuration error: {0}")]
    Config(#[from] CoreError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
