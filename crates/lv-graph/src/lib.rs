//! lv-graph: graph/model layer for lvgrid.
//!
//! Provides:
//! - Way graph data structures (Node, Edge, Graph) and the routable graph builder
//! - Incremental arena builder with validation
//! - Stable OSM id indexing
//! - Length-weighted shortest paths
//! - Grid topology model (stations, cable distributors, branches)
//!
//! # Example
//!
//! ```
//! use lv_core::{Coord, Crs, OsmNodeId, OsmWayId, SpatialConfig};
//! use lv_graph::{WaySegmentGroup, build_graph_from_ways};
//!
//! let way = WaySegmentGroup::new(
//!     OsmWayId::new(1),
//!     vec![OsmNodeId::new(10), OsmNodeId::new(11), OsmNodeId::new(12)],
//!     vec![40.0, 60.0],
//!     "residential",
//!     vec![Coord::new(0.0, 0.0), Coord::new(40.0, 0.0), Coord::new(100.0, 0.0)],
//! )
//! .unwrap();
//! let config = SpatialConfig::new(Crs::epsg(3035));
//! let (graph, coords) = build_graph_from_ways(&[way], &config).unwrap();
//!
//! assert_eq!(graph.edge_count(), 2);
//! assert_eq!(coords.len(), 3);
//! assert_eq!(
//!     graph
//!         .shortest_path_length(OsmNodeId::new(10), OsmNodeId::new(12))
//!         .unwrap(),
//!     100.0
//! );
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod paths;
pub mod topology;
pub(crate) mod validate;
pub mod ways;

// Re-exports for ergonomics
pub use builder::GraphBuilder;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, Graph, Node, NodeCoordinateMap};
pub use indexing::OsmIndex;
pub use paths::{DistanceMap, RoutingIndex};
pub use topology::{
    Branch, CableDistributor, GridNode, GridNodeKey, GridTopology, Station, Transformer,
};
pub use ways::{WaySegmentGroup, build_graph_from_ways};
