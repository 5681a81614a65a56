use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Project(#[from] lv_project::ProjectError),

    #[error("{0}")]
    Graph(#[from] lv_graph::GraphError),

    #[error("{0}")]
    Spatial(#[from] lv_spatial::SpatialError),

    #[error("{0}")]
    Placement(#[from] lv_placement::PlacementError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
