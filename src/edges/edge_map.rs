use crate::image::Grid;

/// Labels used while classifying edges. The numeric values double as
/// display intensities when the map is written out as an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeState {
    Suppressed,
    Weak,
    /// Strong pixel waiting on the propagation stack.
    Pending,
    Edge,
}

impl EdgeState {
    #[inline]
    pub const fn value(self) -> f64 {
        match self {
            EdgeState::Suppressed => 0.0,
            EdgeState::Weak => 64.0,
            EdgeState::Pending => 128.0,
            EdgeState::Edge => 255.0,
        }
    }

    #[inline]
    pub fn from_value(v: f64) -> Option<Self> {
        [
            EdgeState::Suppressed,
            EdgeState::Weak,
            EdgeState::Pending,
            EdgeState::Edge,
        ]
        .into_iter()
        .find(|s| s.value() == v)
    }
}

/// Finalised binary edge map: every cell is 0 or 255.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeMap {
    grid: Grid,
}

impl EdgeMap {
    /// Wrap a label grid produced by hysteresis.
    pub(crate) fn from_labels(grid: Grid) -> Self {
        let (off, on) = (EdgeState::Suppressed.value(), EdgeState::Edge.value());
        debug_assert!(grid.data.iter().all(|&v| v == off || v == on));
        Self { grid }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.h
    }

    #[inline]
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y) == EdgeState::Edge.value()
    }

    /// Edge pixels as `(x, y)` in row-major scan order.
    pub fn edge_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.grid.w;
        self.grid
            .data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == EdgeState::Edge.value())
            .map(move |(i, _)| (i % w, i / w))
    }

    pub fn edge_count(&self) -> usize {
        self.edge_pixels().count()
    }

    pub fn as_grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_round_trip_through_display_values() {
        for s in [
            EdgeState::Suppressed,
            EdgeState::Weak,
            EdgeState::Pending,
            EdgeState::Edge,
        ] {
            assert_eq!(EdgeState::from_value(s.value()), Some(s));
        }
        assert_eq!(EdgeState::from_value(100.0), None);
    }

    #[test]
    fn edge_pixels_scan_row_major() {
        let mut labels = Grid::new(3, 2);
        labels.set(2, 0, 255.0);
        labels.set(0, 1, 255.0);
        let map = EdgeMap::from_labels(labels);
        assert_eq!(map.edge_pixels().collect::<Vec<_>>(), vec![(2, 0), (0, 1)]);
        assert_eq!(map.edge_count(), 2);
        assert_eq!(map.into_grid().sum(), 510.0);
    }
}
