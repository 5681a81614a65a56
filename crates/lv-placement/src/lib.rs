//! lv-placement: substation siting by minimal power distance.
//!
//! Candidate rows pair a graph node with the capacity it connects. The site
//! is chosen by [`place_substation`]; see [`placement`] for the exact rule.
//!
//! ```
//! use lv_core::{Coord, Crs, OsmNodeId, OsmWayId};
//! use lv_graph::GraphBuilder;
//! use lv_placement::{CandidateNode, place_substation};
//!
//! let mut b = GraphBuilder::new(Crs::epsg(3035));
//! let a = b.add_node(OsmNodeId::new(1), Coord::new(0.0, 0.0));
//! let c = b.add_node(OsmNodeId::new(2), Coord::new(100.0, 0.0));
//! b.add_edge(a, c, 100.0, OsmWayId::new(7), "residential");
//! let graph = b.build().unwrap();
//!
//! let site = place_substation(
//!     &graph,
//!     &[
//!         CandidateNode::new(OsmNodeId::new(1), 10.0),
//!         CandidateNode::new(OsmNodeId::new(2), 1.0),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(site, Coord::new(0.0, 0.0));
//! ```

pub mod candidate;
pub mod error;
pub mod placement;

pub use candidate::{CandidateNode, PointLoad, candidates_from_points};
pub use error::{PlacementError, PlacementResult};
pub use placement::{
    Placement, PlacementJob, place_substation, place_substation_detailed, place_substations,
};
