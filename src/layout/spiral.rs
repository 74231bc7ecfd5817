//! Square-ring spiral placement.
//!
//! Index 0 sits at the origin. Ring `L` (for `L = 1, 2, ...`) first fills its right
//! edge top to bottom, `(L, 0) ..= (L, L - 1)`, then its bottom edge right to left,
//! `(L, L) ..= (0, L)`. After ring `L` completes exactly `(L + 1)^2` squares are placed.
//!
//! The sequence depends only on the index, so `compute_positions(n)` is always a
//! prefix of `compute_positions(n + 1)`.

use crate::foundation::core::GridPos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Origin,
    Right { y: i64 },
    Bottom { x: i64 },
}

/// Infinite iterator over spiral positions, in placement order.
#[derive(Clone, Debug)]
pub struct SpiralWalk {
    layer: i64,
    edge: Edge,
}

impl SpiralWalk {
    /// Start a walk at index 0.
    pub fn new() -> Self {
        Self {
            layer: 1,
            edge: Edge::Origin,
        }
    }
}

impl Default for SpiralWalk {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for SpiralWalk {
    type Item = GridPos;

    fn next(&mut self) -> Option<GridPos> {
        let pos = match self.edge {
            Edge::Origin => {
                self.edge = Edge::Right { y: 0 };
                GridPos::ORIGIN
            }
            Edge::Right { y } => {
                self.edge = if y + 1 < self.layer {
                    Edge::Right { y: y + 1 }
                } else {
                    Edge::Bottom { x: self.layer }
                };
                GridPos::new(self.layer, y)
            }
            Edge::Bottom { x } => {
                let pos = GridPos::new(x, self.layer);
                if x == 0 {
                    self.layer += 1;
                    self.edge = Edge::Right { y: 0 };
                } else {
                    self.edge = Edge::Bottom { x: x - 1 };
                }
                pos
            }
        };
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Positions for `count` squares; `result[i]` belongs to the `i`-th added square.
pub fn compute_positions(count: usize) -> Vec<GridPos> {
    SpiralWalk::new().take(count).collect()
}

/// Closed-form position of a single index, without walking its predecessors.
pub fn position_at(index: usize) -> GridPos {
    let i = index as u64;
    let layer = i.isqrt();
    let offset = i - layer * layer;
    let layer = layer as i64;
    let offset = offset as i64;
    if offset < layer {
        GridPos::new(layer, offset)
    } else {
        GridPos::new(layer - (offset - layer), layer)
    }
}

/// Number of grid columns and rows a position list occupies, counted from the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct GridExtent {
    /// `max(x) + 1`, or 0 when empty.
    pub cols: u64,
    /// `max(y) + 1`, or 0 when empty.
    pub rows: u64,
}

impl GridExtent {
    /// Measure a position list. Negative coordinates never occur in a spiral and are ignored.
    pub fn of(positions: &[GridPos]) -> Self {
        if positions.is_empty() {
            return Self::default();
        }
        let max_x = positions.iter().map(|p| p.x).max().unwrap_or(0).max(0);
        let max_y = positions.iter().map(|p| p.y).max().unwrap_or(0).max(0);
        Self {
            cols: max_x as u64 + 1,
            rows: max_y as u64 + 1,
        }
    }

    /// Pixel length of `cells` squares of `size` separated by `gap`, saturating at `u64::MAX`.
    pub fn span_px(cells: u64, size: u32, gap: u32) -> u64 {
        if cells == 0 {
            return 0;
        }
        cells.saturating_mul(u64::from(size) + u64::from(gap)) - u64::from(gap)
    }
}

/// Position list memoized by square count.
///
/// Growing reuses the existing prefix; shrinking truncates. Results are identical to
/// calling [`compute_positions`] every time.
#[derive(Clone, Debug, Default)]
pub struct LayoutCache {
    positions: Vec<GridPos>,
}

impl LayoutCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Positions for `count` squares.
    pub fn positions_for(&mut self, count: usize) -> &[GridPos] {
        let cached = self.positions.len();
        if count > cached {
            tracing::debug!(from = cached, to = count, "extending spiral layout");
            self.positions.extend((cached..count).map(position_at));
        } else if count < cached {
            self.positions.truncate(count);
        }
        &self.positions
    }

    /// Positions computed by the most recent call.
    pub fn current(&self) -> &[GridPos] {
        &self.positions
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spiral.rs"]
mod tests;
