//! Stable indexing between external OSM node ids and arena handles.
//!
//! Provides bidirectional mappings between `OsmNodeId` and the contiguous
//! `NodeId` handles (0..N) of a graph.

use std::collections::HashMap;

use lv_core::{NodeId, OsmNodeId};

use crate::error::{GraphError, GraphResult};

/// Index map providing O(1) bidirectional lookup between OSM ids and handles.
///
/// Handles are assigned in first-insertion order, so iteration order of a
/// graph's nodes is stable for a fixed input.
#[derive(Debug, Clone, Default)]
pub struct OsmIndex {
    /// Contiguous list of OSM ids (handle index -> OsmNodeId).
    osm_ids: Vec<OsmNodeId>,

    /// Reverse lookup: OsmNodeId -> handle.
    handles: HashMap<OsmNodeId, NodeId>,
}

impl OsmIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `osm_id`, allocating the next one if it is new.
    ///
    /// The flag is `true` when a handle was allocated.
    pub fn get_or_insert(&mut self, osm_id: OsmNodeId) -> (NodeId, bool) {
        if let Some(&handle) = self.handles.get(&osm_id) {
            return (handle, false);
        }
        let handle = NodeId::from_usize(self.osm_ids.len());
        self.osm_ids.push(osm_id);
        self.handles.insert(osm_id, handle);
        (handle, true)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.osm_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.osm_ids.is_empty()
    }

    /// Handle for an OSM id, if present.
    pub fn get(&self, osm_id: OsmNodeId) -> Option<NodeId> {
        self.handles.get(&osm_id).copied()
    }

    /// Handle for an OSM id, failing with `UnknownNode`.
    pub fn handle(&self, osm_id: OsmNodeId) -> GraphResult<NodeId> {
        self.get(osm_id).ok_or_else(|| GraphError::UnknownNode {
            node: osm_id.to_string(),
        })
    }

    /// OSM id for a handle.
    pub fn osm_id(&self, handle: NodeId) -> GraphResult<OsmNodeId> {
        self.osm_ids
            .get(handle.pos())
            .copied()
            .ok_or(GraphError::IdNotFound { what: "NodeId" })
    }

    /// All OSM ids in handle order.
    pub fn osm_ids(&self) -> &[OsmNodeId] {
        &self.osm_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_map_basic() {
        let mut idx = OsmIndex::new();
        let (a, new_a) = idx.get_or_insert(OsmNodeId::new(1001));
        let (b, new_b) = idx.get_or_insert(OsmNodeId::new(-5));
        let (a_again, new_again) = idx.get_or_insert(OsmNodeId::new(1001));

        assert!(new_a && new_b && !new_again);
        assert_eq!(a, a_again);
        assert_eq!(idx.len(), 2);

        // Round-trip
        assert_eq!(idx.osm_id(a).unwrap(), OsmNodeId::new(1001));
        assert_eq!(idx.handle(OsmNodeId::new(-5)).unwrap(), b);
    }

    #[test]
    fn index_map_invalid_id() {
        let mut idx = OsmIndex::new();
        idx.get_or_insert(OsmNodeId::new(1));

        assert!(matches!(
            idx.handle(OsmNodeId::new(999)),
            Err(GraphError::UnknownNode { .. })
        ));
        assert!(idx.osm_id(NodeId::from_index(999)).is_err());
    }

    #[test]
    fn index_map_contiguous() {
        let mut idx = OsmIndex::new();
        for osm in [30, 10, 20] {
            idx.get_or_insert(OsmNodeId::new(osm));
        }

        // All handles should be 0..N in insertion order
        assert_eq!(idx.handle(OsmNodeId::new(30)).unwrap().index(), 0);
        assert_eq!(idx.handle(OsmNodeId::new(10)).unwrap().index(), 1);
        assert_eq!(idx.handle(OsmNodeId::new(20)).unwrap().index(), 2);
        assert_eq!(
            idx.osm_ids(),
            &[OsmNodeId::new(30), OsmNodeId::new(10), OsmNodeId::new(20)]
        );
    }
}
