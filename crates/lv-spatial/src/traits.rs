//! Nearest-node search strategy.

use lv_core::{Coord, CrsKind, NodeId, Real};

/// A built nearest-neighbour structure over the nodes of one graph snapshot.
///
/// Implementations are immutable once built and safe to query from several
/// threads at once.
pub trait SpatialIndex: Send + Sync {
    /// Metric class this index searches under.
    fn kind(&self) -> CrsKind;

    /// Number of indexed nodes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nearest node to `point` and its distance.
    ///
    /// Distance is in CRS units for projected indexes and meters for
    /// geographic ones. Among equally distant nodes the lowest handle wins.
    /// `None` only for an empty index.
    fn nearest(&self, point: Coord) -> Option<(NodeId, Real)>;
}

/// Pick the lowest handle among candidates sharing the minimal squared distance.
///
/// `candidates` must be ordered by non-decreasing distance.
pub(crate) fn lowest_handle_at_min<I>(mut candidates: I) -> Option<NodeId>
where
    I: Iterator<Item = (u32, Real)>,
{
    let (first, best) = candidates.next()?;
    let winner = candidates
        .take_while(|&(_, d2)| d2 == best)
        .map(|(idx, _)| idx)
        .fold(first, u32::min);
    Some(NodeId::from_index(winner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_breaks_to_lowest_handle() {
        let hits = vec![(4_u32, 1.0), (2, 1.0), (7, 1.0), (0, 2.0)];
        assert_eq!(lowest_handle_at_min(hits.into_iter()), Some(NodeId::from_index(2)));
    }

    #[test]
    fn single_and_empty() {
        assert_eq!(
            lowest_handle_at_min(vec![(3_u32, 0.5)].into_iter()),
            Some(NodeId::from_index(3))
        );
        assert_eq!(lowest_handle_at_min(std::iter::empty()), None);
    }
}
