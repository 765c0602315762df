use crate::diagnostics::TimingBreakdown;
use crate::ght::{Accumulator, DisplacementBounds, Peak};
use nalgebra::{Rotation2, Vector2};
use serde::Serialize;

/// Four box corners as `[x, y]` pixel coordinates, in drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrientedBox {
    pub corners: [[f64; 2]; 4],
}

impl OrientedBox {
    /// Closed polyline segments `(corner[i], corner[i + 1])`.
    pub fn edges(&self) -> impl Iterator<Item = ([f64; 2], [f64; 2])> + '_ {
        (0..4).map(move |i| (self.corners[i], self.corners[(i + 1) % 4]))
    }
}

/// One located instance of the trained shape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub row: usize,
    pub col: usize,
    pub rotation_deg: f64,
    pub scale: f64,
    pub score: f64,
    pub rotation_index: usize,
    pub scale_index: usize,
}

impl From<Peak> for Detection {
    fn from(p: Peak) -> Self {
        Self {
            row: p.row,
            col: p.col,
            rotation_deg: p.rotation_deg,
            scale: p.scale,
            score: p.score,
            rotation_index: p.rotation_index,
            scale_index: p.scale_index,
        }
    }
}

impl Detection {
    /// Template extent mapped through this detection's pose.
    ///
    /// Uses the same transform as voting, so a displacement `d` of the
    /// template lands at `(row, col) + scale · R(rotation) · d`.
    pub fn oriented_box(&self, bounds: &DisplacementBounds) -> OrientedBox {
        let rotation = Rotation2::new(self.rotation_deg.to_radians());
        let (r0, c0) = (self.row as f64, self.col as f64);
        let corner = |d_row: i32, d_col: i32| {
            let v = rotation * Vector2::new(d_row as f64, d_col as f64) * self.scale;
            [c0 + v.y, r0 + v.x]
        };
        OrientedBox {
            corners: [
                corner(bounds.min_row, bounds.min_col),
                corner(bounds.min_row, bounds.max_col),
                corner(bounds.max_row, bounds.max_col),
                corner(bounds.max_row, bounds.min_col),
            ],
        }
    }
}

/// Result of one detection call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub width: usize,
    pub height: usize,
    pub edge_count: usize,
    pub votes_cast: usize,
    pub detections: Vec<Detection>,
    pub timing: TimingBreakdown,
    /// Smoothed vote space the detections were read from.
    #[serde(skip)]
    pub accumulator: Accumulator,
}

impl DetectionReport {
    /// Highest scoring detection, if any.
    pub fn best(&self) -> Option<&Detection> {
        self.detections.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    fn detection(rotation_deg: f64, scale: f64) -> Detection {
        Detection {
            row: 10,
            col: 20,
            rotation_deg,
            scale,
            score: 1.0,
            rotation_index: 0,
            scale_index: 0,
        }
    }

    const BOUNDS: DisplacementBounds = DisplacementBounds {
        min_row: -2,
        max_row: 2,
        min_col: -4,
        max_col: 4,
    };

    #[test]
    fn identity_box_is_axis_aligned() {
        let b = detection(0.0, 1.0).oriented_box(&BOUNDS);
        assert!(approx(b.corners[0], [16.0, 8.0]));
        assert!(approx(b.corners[2], [24.0, 12.0]));
        assert_eq!(b.edges().count(), 4);
    }

    #[test]
    fn quarter_turn_swaps_extent() {
        let b = detection(90.0, 2.0).oriented_box(&BOUNDS);
        // (d_row, d_col) = (-2, -4) rotates to (4, -2), scaled by 2
        assert!(approx(b.corners[0], [16.0, 18.0]));
        let xs: Vec<f64> = b.corners.iter().map(|c| c[0]).collect();
        let width = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        assert!((width - 8.0).abs() < 1e-9);
    }
}
