//! Nearest graph node lookup for arbitrary query coordinates.

use lv_core::{Coord, CoreError, Crs, CrsKind, OsmNodeId, Real, SpatialConfig, ensure_finite};
use lv_graph::Graph;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{SpatialError, SpatialResult};
use crate::euclidean::EuclideanIndex;
use crate::haversine::HaversineIndex;
use crate::traits::SpatialIndex;

/// Batches smaller than this are answered on the calling thread.
const PARALLEL_THRESHOLD: usize = 256;

/// Spatial index bound to one graph snapshot.
///
/// The search strategy is chosen from the graph's CRS when the locator is built.
pub struct NodeLocator {
    index: Box<dyn SpatialIndex>,
    osm_ids: Vec<OsmNodeId>,
    crs: Crs,
    earth_radius_m: Real,
    fingerprint: u64,
}

impl std::fmt::Debug for NodeLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeLocator")
            .field("kind", &self.index.kind())
            .field("nodes", &self.osm_ids.len())
            .field("crs", &self.crs)
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

impl NodeLocator {
    /// Index every node of `graph`.
    pub fn new(graph: &Graph, config: &SpatialConfig) -> SpatialResult<Self> {
        config.validate()?;
        if graph.is_empty() {
            return Err(SpatialError::EmptyGraph);
        }

        let crs = graph.crs();
        let kind = crs
            .kind()
            .ok_or(SpatialError::UnsupportedSpatialBackend { crs })?;
        let coords = graph.nodes().iter().map(|n| n.coord).collect();

        let index: Box<dyn SpatialIndex> = match kind {
            CrsKind::Projected => Box::new(EuclideanIndex::new(coords)),
            CrsKind::Geographic => Box::new(HaversineIndex::new(coords, config.earth_radius_m)),
        };
        debug!(nodes = index.len(), ?kind, %crs, "built nearest-node index");

        Ok(Self {
            index,
            osm_ids: graph.nodes().iter().map(|n| n.osm_id).collect(),
            crs,
            earth_radius_m: config.earth_radius_m,
            fingerprint: graph.fingerprint(),
        })
    }

    pub fn kind(&self) -> CrsKind {
        self.index.kind()
    }

    /// Whether this locator still describes `graph` under `config`.
    pub fn is_current(&self, graph: &Graph, config: &SpatialConfig) -> bool {
        self.fingerprint == graph.fingerprint()
            && self.crs == graph.crs()
            && self.earth_radius_m == config.earth_radius_m
    }

    /// Nearest node to a single point.
    pub fn nearest_one(&self, x: Real, y: Real) -> SpatialResult<(OsmNodeId, Real)> {
        check_point(x, y)?;
        self.query(x, y)
    }

    /// Nearest node to each `(xs[i], ys[i])`, in query order.
    pub fn nearest(&self, xs: &[Real], ys: &[Real]) -> SpatialResult<(Vec<OsmNodeId>, Vec<Real>)> {
        if xs.len() != ys.len() {
            return Err(SpatialError::InvalidCoordinate {
                what: format!("{} x values but {} y values", xs.len(), ys.len()),
            });
        }
        for (&x, &y) in xs.iter().zip(ys) {
            check_point(x, y)?;
        }

        let hits: Vec<(OsmNodeId, Real)> = if xs.len() < PARALLEL_THRESHOLD {
            xs.iter()
                .zip(ys)
                .map(|(&x, &y)| self.query(x, y))
                .collect::<SpatialResult<_>>()?
        } else {
            xs.par_iter()
                .zip(ys.par_iter())
                .map(|(&x, &y)| self.query(x, y))
                .collect::<SpatialResult<_>>()?
        };
        Ok(hits.into_iter().unzip())
    }

    fn query(&self, x: Real, y: Real) -> SpatialResult<(OsmNodeId, Real)> {
        let (id, dist) = self
            .index
            .nearest(Coord::new(x, y))
            .ok_or(SpatialError::EmptyGraph)?;
        Ok((self.osm_ids[id.pos()], dist))
    }
}

fn check_point(x: Real, y: Real) -> SpatialResult<()> {
    let finite = |v: Real, what: &'static str| {
        ensure_finite(v, what).map_err(|err| match err {
            CoreError::NonFinite { what, value } => SpatialError::InvalidCoordinate {
                what: format!("{what} is {value}"),
            },
            other => SpatialError::Config(other),
        })
    };
    finite(x, "x")?;
    finite(y, "y")?;
    Ok(())
}

/// Locator reused across lookups as long as the graph's node set is unchanged.
#[derive(Debug, Default)]
pub struct NearestNodeCache {
    locator: Option<NodeLocator>,
}

impl NearestNodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current locator for `graph`, rebuilding it if the graph changed.
    pub fn locator(&mut self, graph: &Graph, config: &SpatialConfig) -> SpatialResult<&NodeLocator> {
        let locator = match self.locator.take() {
            Some(loc) if loc.is_current(graph, config) => loc,
            _ => NodeLocator::new(graph, config)?,
        };
        let locator: &NodeLocator = self.locator.insert(locator);
        Ok(locator)
    }

    pub fn invalidate(&mut self) {
        self.locator = None;
    }

    pub fn is_built(&self) -> bool {
        self.locator.is_some()
    }
}

/// Nearest graph node to each query point.
///
/// Builds a throw-away index; use [`NodeLocator`] or [`NearestNodeCache`] for
/// repeated lookups against the same graph.
pub fn nearest_nodes(
    graph: &Graph,
    xs: &[Real],
    ys: &[Real],
    config: &SpatialConfig,
) -> SpatialResult<(Vec<OsmNodeId>, Vec<Real>)> {
    NodeLocator::new(graph, config)?.nearest(xs, ys)
}

/// Nearest graph node to a single point.
pub fn nearest_node(
    graph: &Graph,
    x: Real,
    y: Real,
    config: &SpatialConfig,
) -> SpatialResult<(OsmNodeId, Real)> {
    NodeLocator::new(graph, config)?.nearest_one(x, y)
}
