//! Grid topology: stations and cable distributors joined by branches.
//!
//! Entities attach electrical metadata to locations; connectivity is a plain
//! undirected multigraph over them, stored as an arena like [`crate::Graph`].

use core::fmt;
use std::collections::HashMap;

use lv_core::{Coord, EdgeId, NodeId, Real};
use tracing::warn;

use crate::error::{GraphError, GraphResult};
use crate::paths::RoutingIndex;

/// Identity of a topology node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridNodeKey {
    Station(u64),
    CableDistributor(u64),
}

impl fmt::Display for GridNodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridNodeKey::Station(id) => write!(f, "station_{id}"),
            GridNodeKey::CableDistributor(id) => write!(f, "cable_dist_{id}"),
        }
    }
}

/// Transformer ratings. Apparent powers in kVA, phase angle in degrees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transformer {
    /// Equipment type id of the transformer catalogue.
    pub equip_trans_id: Option<u32>,
    pub v_level: Option<u8>,
    pub s_max_longterm: Option<Real>,
    pub s_max_shortterm: Option<Real>,
    pub s_max_emergency: Option<Real>,
    pub phase_angle: Option<Real>,
    /// Off-nominal turns ratio.
    pub tap_ratio: Option<Real>,
}

/// MV/LV substation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Station {
    pub id: u64,
    pub location: Option<Coord>,
    pub peak_load: Option<Real>,
    transformers: Vec<Transformer>,
}

impl Station {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn at(mut self, location: Coord) -> Self {
        self.location = Some(location);
        self
    }

    /// Add a transformer unless an equal one is already installed.
    ///
    /// Equality is by value: two transformers with identical ratings count as
    /// the same unit, so a second identical unit cannot be installed this way.
    /// Returns `true` if it was added.
    pub fn add_transformer(&mut self, transformer: Transformer) -> bool {
        if self.transformers.contains(&transformer) {
            return false;
        }
        self.transformers.push(transformer);
        true
    }

    pub fn transformers(&self) -> impl Iterator<Item = &Transformer> {
        self.transformers.iter()
    }
}

/// Pass-through connection point without electrical transformation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CableDistributor {
    pub id: u64,
    pub location: Option<Coord>,
}

impl CableDistributor {
    pub fn new(id: u64) -> Self {
        Self { id, location: None }
    }

    pub fn at(mut self, location: Coord) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridNode {
    Station(Station),
    CableDistributor(CableDistributor),
}

impl GridNode {
    pub fn key(&self) -> GridNodeKey {
        match self {
            GridNode::Station(s) => GridNodeKey::Station(s.id),
            GridNode::CableDistributor(c) => GridNodeKey::CableDistributor(c.id),
        }
    }

    pub fn location(&self) -> Option<Coord> {
        match self {
            GridNode::Station(s) => s.location,
            GridNode::CableDistributor(c) => c.location,
        }
    }

    pub fn as_station(&self) -> Option<&Station> {
        match self {
            GridNode::Station(s) => Some(s),
            GridNode::CableDistributor(_) => None,
        }
    }
}

impl From<Station> for GridNode {
    fn from(station: Station) -> Self {
        GridNode::Station(station)
    }
}

impl From<CableDistributor> for GridNode {
    fn from(dist: CableDistributor) -> Self {
        GridNode::CableDistributor(dist)
    }
}

/// Line or cable. Length in meters; per-km electrical parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Branch {
    pub length: Real,
    /// Catalogue name of the cable/line type.
    pub line_type: Option<String>,
    pub r_ohm_per_km: Option<Real>,
    pub x_ohm_per_km: Option<Real>,
    pub c_nf_per_km: Option<Real>,
    /// Thermal current limit in A.
    pub i_max_th: Option<Real>,
    /// Apparent power limits in kVA.
    pub s_max_longterm: Option<Real>,
    pub s_max_shortterm: Option<Real>,
    pub s_max_emergency: Option<Real>,
}

impl Branch {
    pub fn new(length: Real) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    /// Long-term, short-term and emergency apparent power limits in kVA.
    pub fn with_apparent_power_limits(mut self, longterm: Real, shortterm: Real, emergency: Real) -> Self {
        self.s_max_longterm = Some(longterm);
        self.s_max_shortterm = Some(shortterm);
        self.s_max_emergency = Some(emergency);
        self
    }
}

/// Container of grid entities and the branches between them.
#[derive(Debug, Clone, Default)]
pub struct GridTopology {
    nodes: Vec<GridNode>,
    keys: HashMap<GridNodeKey, NodeId>,
    branches: Vec<(NodeId, NodeId, Branch)>,
}

impl GridTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node; a node whose key is already present is left untouched.
    pub fn add_node(&mut self, node: impl Into<GridNode>) -> NodeId {
        let node = node.into();
        let key = node.key();
        if let Some(&id) = self.keys.get(&key) {
            return id;
        }
        let id = NodeId::from_usize(self.nodes.len());
        self.nodes.push(node);
        self.keys.insert(key, id);
        id
    }

    /// Connect two existing nodes with a branch. Parallel branches are allowed.
    pub fn add_edge(&mut self, a: GridNodeKey, b: GridNodeKey, branch: Branch) -> GraphResult<EdgeId> {
        let ia = self.handle(a)?;
        let ib = self.handle(b)?;
        let id = EdgeId::from_usize(self.branches.len());
        if !branch.length.is_finite() || branch.length < 0.0 {
            return Err(GraphError::InvalidLength {
                edge: id,
                length: branch.length,
            });
        }
        self.branches.push((ia, ib, branch));
        Ok(id)
    }

    pub fn contains(&self, key: GridNodeKey) -> bool {
        self.keys.contains_key(&key)
    }

    pub fn node(&self, key: GridNodeKey) -> Option<&GridNode> {
        self.keys.get(&key).map(|id| &self.nodes[id.pos()])
    }

    pub fn node_mut(&mut self, key: GridNodeKey) -> Option<&mut GridNode> {
        let id = *self.keys.get(&key)?;
        self.nodes.get_mut(id.pos())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GridNode> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.branches.len()
    }

    /// Branches with their adjacent node keys, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = ((GridNodeKey, GridNodeKey), &Branch)> {
        self.branches
            .iter()
            .map(|(a, b, branch)| ((self.nodes[a.pos()].key(), self.nodes[b.pos()].key()), branch))
    }

    /// The grid's station (first one added).
    pub fn station(&self) -> Option<&Station> {
        self.nodes.iter().find_map(GridNode::as_station)
    }

    /// Sum of branch lengths along the length-weighted shortest path.
    pub fn path_length(&self, source: GridNodeKey, target: GridNodeKey) -> GraphResult<Real> {
        let s = self.handle(source)?;
        let t = self.handle(target)?;
        self.routing()
            .distance(s, t)
            .ok_or_else(|| GraphError::NoPath {
                source: source.to_string(),
                target: target.to_string(),
            })
    }

    /// Nodes without any branch.
    pub fn isolated_nodes(&self) -> Vec<GridNodeKey> {
        let connected = self.connected_mask();
        self.nodes
            .iter()
            .zip(connected)
            .filter(|(_, c)| !c)
            .map(|(n, _)| n.key())
            .collect()
    }

    /// Nodes that take part in electrical calculations.
    ///
    /// Isolated nodes are skipped with a warning.
    pub fn electrical_nodes(&self) -> Vec<&GridNode> {
        let connected = self.connected_mask();
        let mut out = Vec::with_capacity(self.nodes.len());
        for (node, is_connected) in self.nodes.iter().zip(connected) {
            if is_connected {
                out.push(node);
            } else {
                warn!(node = %node.key(), "node is not connected to the grid and will be omitted");
            }
        }
        out
    }

    fn handle(&self, key: GridNodeKey) -> GraphResult<NodeId> {
        self.keys
            .get(&key)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode {
                node: key.to_string(),
            })
    }

    fn connected_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.nodes.len()];
        for (a, b, _) in &self.branches {
            mask[a.pos()] = true;
            mask[b.pos()] = true;
        }
        mask
    }

    fn routing(&self) -> RoutingIndex {
        RoutingIndex::new(
            self.nodes.len(),
            self.branches.iter().map(|(a, b, br)| (*a, *b, br.length)),
        )
    }
}
