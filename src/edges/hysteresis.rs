//! Double thresholding and hysteresis propagation.
//!
//! Classification is a small state machine over [`EdgeState`]:
//! `Suppressed`, `Weak`, `Pending` (strong, waiting on the stack) and `Edge`.
//! Seeds are processed last-in first-out; popping a seed finalises it and
//! promotes each 8-connected weak neighbour to `Pending`. Weak pixels never
//! reached are culled at the end.
use crate::edges::edge_map::{EdgeMap, EdgeState};
use crate::error::GhtError;
use crate::image::Grid;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Hysteresis thresholds on suppressed gradient magnitude.
///
/// Magnitudes `> high` seed edges, magnitudes in `(low, high]` are weak
/// candidates, everything else is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low: 50.0,
            high: 100.0,
        }
    }
}

impl Thresholds {
    pub fn new(low: f64, high: f64) -> Result<Self, GhtError> {
        let t = Self { low, high };
        t.validate()?;
        Ok(t)
    }

    pub fn validate(&self) -> Result<(), GhtError> {
        if !self.low.is_finite() || !self.high.is_finite() || self.low > self.high {
            return Err(GhtError::InvalidThresholds {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Output of the double-threshold pass.
pub(crate) struct Candidates {
    labels: Grid,
    seeds: Vec<(usize, usize)>,
    weak: HashSet<(usize, usize)>,
}

impl Candidates {
    pub(crate) fn weak_count(&self) -> usize {
        self.weak.len()
    }

    pub(crate) fn seed_count(&self) -> usize {
        self.seeds.len()
    }
}

/// Label suppressed magnitudes as `Pending` (seeded), `Weak` or `Suppressed`.
pub(crate) fn double_threshold(suppressed: &Grid, thresholds: Thresholds) -> Candidates {
    let mut labels = Grid::new(suppressed.w, suppressed.h);
    let mut seeds = Vec::new();
    let mut weak = HashSet::new();
    for y in 0..suppressed.h {
        for x in 0..suppressed.w {
            let m = suppressed.get(x, y);
            if m > thresholds.high {
                labels.set(x, y, EdgeState::Pending.value());
                seeds.push((x, y));
            } else if m > thresholds.low {
                labels.set(x, y, EdgeState::Weak.value());
                weak.insert((x, y));
            }
        }
    }
    Candidates {
        labels,
        seeds,
        weak,
    }
}

/// Grow edges from the seeds, then cull unreached weak pixels.
pub(crate) fn propagate(candidates: Candidates) -> EdgeMap {
    let Candidates {
        mut labels,
        mut seeds,
        mut weak,
    } = candidates;
    let weak_value = EdgeState::Weak.value();

    while let Some((x, y)) = seeds.pop() {
        labels.set(x, y, EdgeState::Edge.value());
        for &(dx, dy) in &NEIGHBORS_8 {
            let (nx, ny) = (x as isize + dx, y as isize + dy);
            if labels.get_checked(nx, ny) != Some(weak_value) {
                continue;
            }
            let n = (nx as usize, ny as usize);
            labels.set(n.0, n.1, EdgeState::Pending.value());
            weak.remove(&n);
            seeds.push(n);
        }
    }

    for (x, y) in weak {
        labels.set(x, y, EdgeState::Suppressed.value());
    }
    EdgeMap::from_labels(labels)
}
