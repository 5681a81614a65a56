use core::fmt;
use core::num::NonZeroU32;

/// Compact arena handle used inside a built graph.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Create an Id from a `usize` position in an arena table.
    ///
    /// Panics if the position does not fit a `u32` handle.
    pub fn from_usize(index: usize) -> Self {
        let index = u32::try_from(index).expect("arena handle exceeds u32 range");
        Self::from_index(index)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as a table position.
    pub fn pos(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific handle aliases for clarity (no runtime cost).
pub type NodeId = Id;
pub type EdgeId = Id;

/// Opaque identifier coming from the way import (OSM node or way id).
///
/// Unlike [`Id`] these are not dense and may be negative (locally created
/// objects in OSM editors use negative ids).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OsmId(pub i64);

impl OsmId {
    #[inline]
    pub fn new(value: i64) -> Self {
        OsmId(value)
    }

    #[inline]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for OsmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OsmId({})", self.0)
    }
}

impl fmt::Display for OsmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OsmId {
    fn from(value: i64) -> Self {
        OsmId(value)
    }
}

pub type OsmNodeId = OsmId;
pub type OsmWayId = OsmId;
