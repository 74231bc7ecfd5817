use std::collections::{BTreeSet, HashMap};

use crate::foundation::core::GridPos;

/// Indices whose position is exactly one orthogonal step from `positions[index]`.
///
/// Diagonal cells (distance 2) are excluded, as is `index` itself. An out-of-range
/// `index` has no neighbours.
pub fn adjacent(index: usize, positions: &[GridPos]) -> BTreeSet<usize> {
    let Some(&here) = positions.get(index) else {
        return BTreeSet::new();
    };
    positions
        .iter()
        .enumerate()
        .filter(|&(j, &p)| j != index && here.manhattan(p) == 1)
        .map(|(j, _)| j)
        .collect()
}

/// Grid-bucket lookup answering the same queries as [`adjacent`] without a full scan.
#[derive(Clone, Debug, Default)]
pub struct NeighborIndex {
    positions: Vec<GridPos>,
    by_cell: HashMap<GridPos, Vec<usize>>,
}

impl NeighborIndex {
    /// Index a position list.
    pub fn build(positions: &[GridPos]) -> Self {
        let mut by_cell = HashMap::<GridPos, Vec<usize>>::with_capacity(positions.len());
        for (i, &p) in positions.iter().enumerate() {
            by_cell.entry(p).or_default().push(i);
        }
        Self {
            positions: positions.to_vec(),
            by_cell,
        }
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Return `true` when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Same result as `adjacent(index, positions)` for the indexed list.
    pub fn neighbors(&self, index: usize) -> BTreeSet<usize> {
        let Some(&here) = self.positions.get(index) else {
            return BTreeSet::new();
        };
        here.orthogonal_neighbors()
            .iter()
            .filter_map(|cell| self.by_cell.get(cell))
            .flatten()
            .copied()
            .filter(|&j| j != index)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/adjacency.rs"]
mod tests;
