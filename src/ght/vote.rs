//! Generalized Hough voting over position, rotation and scale.
//!
//! Every finalised edge pixel looks up its orientation bucket and, for each
//! stored displacement and each (rotation, scale) hypothesis, votes for the
//! reference location
//!
//! ```text
//! (row', col') = (i, j) − s · R(r) · (d_row, d_col)
//! R(r) = [[cos r, −sin r], [sin r, cos r]]
//! ```
//!
//! weighted by the bucket entry. Votes outside the image are dropped.
//!
//! With rotation compensation (default) the lookup key for hypothesis `r` is
//! the orientation shifted by `+r`, i.e. the orientation the edge had in the
//! un-rotated template. For `r = 0` both modes are identical.
//!
//! Cost is O(edges × entries per bucket × |rotations| × |scales|) and
//! dominates the pipeline. Slices are voted in parallel, one task per
//! (rotation, scale), so results do not depend on scheduling.
use super::accumulator::Accumulator;
use super::rtable::{OrientationKey, RTable};
use crate::edges::{EdgeMap, GradientField};
use crate::error::GhtError;
use log::{debug, warn};
use nalgebra::{Rotation2, Vector2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How fractional vote coordinates map to accumulator cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CoordinateRounding {
    /// Round half away from zero.
    #[default]
    Nearest,
    /// Drop the fractional part (toward zero).
    Truncate,
}

impl CoordinateRounding {
    #[inline]
    fn apply(self, v: f64) -> f64 {
        match self {
            CoordinateRounding::Nearest => v.round(),
            CoordinateRounding::Truncate => v.trunc(),
        }
    }
}

/// Pose hypotheses and voting policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoteParams {
    /// Candidate rotations in degrees.
    pub rotations_deg: Vec<f64>,
    /// Candidate scale factors (> 0).
    pub scales: Vec<f64>,
    pub rounding: CoordinateRounding,
    /// Shift the lookup orientation by the hypothesised rotation.
    pub compensate_rotation: bool,
}

impl Default for VoteParams {
    fn default() -> Self {
        Self {
            rotations_deg: vec![0.0],
            scales: vec![1.0],
            rounding: CoordinateRounding::Nearest,
            compensate_rotation: true,
        }
    }
}

impl VoteParams {
    pub fn new(rotations_deg: Vec<f64>, scales: Vec<f64>) -> Self {
        Self {
            rotations_deg,
            scales,
            ..Default::default()
        }
    }

    pub fn with_rounding(mut self, rounding: CoordinateRounding) -> Self {
        self.rounding = rounding;
        self
    }

    pub fn with_rotation_compensation(mut self, enabled: bool) -> Self {
        self.compensate_rotation = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), GhtError> {
        if self.rotations_deg.is_empty() {
            return Err(GhtError::EmptyHypotheses {
                parameter: "rotations",
            });
        }
        if self.scales.is_empty() {
            return Err(GhtError::EmptyHypotheses {
                parameter: "scales",
            });
        }
        if let Some(&degrees) = self.rotations_deg.iter().find(|r| !r.is_finite()) {
            return Err(GhtError::InvalidRotation { degrees });
        }
        if let Some(&scale) = self.scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(GhtError::InvalidScale { scale });
        }
        Ok(())
    }
}

struct EdgeSample {
    row: f64,
    col: f64,
    orientation: f64,
}

/// Cast votes from a classified image into a fresh accumulator.
///
/// Returns the accumulator and the number of in-bounds votes cast.
pub fn cast_votes(
    edges: &EdgeMap,
    field: &GradientField,
    table: &RTable,
    params: &VoteParams,
) -> Result<(Accumulator, usize), GhtError> {
    params.validate()?;
    let (rows, cols) = (edges.height(), edges.width());
    if rows == 0 || cols == 0 {
        return Err(GhtError::EmptyImage {
            stage: "hough voting",
        });
    }
    let field_size = (field.width(), field.height());
    if field_size != (cols, rows) {
        return Err(GhtError::ShapeMismatch {
            stage: "hough voting",
            expected: (cols, rows),
            found: field_size,
        });
    }
    let mut acc = Accumulator::new(
        rows,
        cols,
        params.rotations_deg.clone(),
        params.scales.clone(),
    );
    if table.is_empty() {
        warn!("hough voting: r-table is empty, accumulator stays zero");
        return Ok((acc, 0));
    }

    let samples: Vec<EdgeSample> = edges
        .edge_pixels()
        .map(|(x, y)| EdgeSample {
            row: y as f64,
            col: x as f64,
            orientation: field.orientation.get(x, y),
        })
        .collect();

    let n_scales = params.scales.len();
    let slice_len = rows * cols;
    let (rows_f, cols_f) = (rows as f64, cols as f64);
    let votes: usize = acc
        .data_mut()
        .par_chunks_mut(slice_len)
        .enumerate()
        .map(|(k, slice)| {
            let rotation_deg = params.rotations_deg[k / n_scales];
            let scale = params.scales[k % n_scales];
            let rotation = Rotation2::new(rotation_deg.to_radians());
            let lookup_shift = if params.compensate_rotation {
                rotation_deg
            } else {
                0.0
            };
            let mut cast = 0usize;
            for e in &samples {
                let key = OrientationKey::from_degrees(e.orientation + lookup_shift);
                let Some(bucket) = table.bucket(key) else {
                    continue;
                };
                for (d, &weight) in bucket {
                    let v = rotation * Vector2::new(d.d_row as f64, d.d_col as f64) * scale;
                    let r = params.rounding.apply(e.row - v.x);
                    let c = params.rounding.apply(e.col - v.y);
                    if r < 0.0 || c < 0.0 || r >= rows_f || c >= cols_f {
                        continue;
                    }
                    slice[r as usize * cols + c as usize] += weight;
                    cast += 1;
                }
            }
            cast
        })
        .sum();

    debug!(
        "hough voting: {} edges, {} hypotheses, {} votes",
        samples.len(),
        acc.slice_count(),
        votes
    );
    Ok((acc, votes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{detect_edges, CannyParams};
    use crate::filters::GaussianParams;
    use crate::ght::rtable::{build_rtable, ReferencePoint};
    use crate::image::Grid;

    fn square(size: usize, lo: usize, hi: usize) -> Grid {
        Grid::from_fn(size, size, |x, y| {
            if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
                255.0
            } else {
                0.0
            }
        })
    }

    fn canny() -> CannyParams {
        CannyParams::default().with_blur(GaussianParams::none())
    }

    fn square_table(img: &Grid) -> RTable {
        build_rtable(
            std::slice::from_ref(img),
            ReferencePoint::new(10, 10),
            &canny(),
        )
        .unwrap()
    }

    #[test]
    fn hypotheses_are_validated() {
        assert!(VoteParams::default().validate().is_ok());
        assert_eq!(
            VoteParams::new(vec![], vec![1.0]).validate().unwrap_err(),
            GhtError::EmptyHypotheses {
                parameter: "rotations"
            }
        );
        assert_eq!(
            VoteParams::new(vec![0.0], vec![]).validate().unwrap_err(),
            GhtError::EmptyHypotheses {
                parameter: "scales"
            }
        );
        assert_eq!(
            VoteParams::new(vec![0.0], vec![1.0, 0.0])
                .validate()
                .unwrap_err(),
            GhtError::InvalidScale { scale: 0.0 }
        );
        assert!(matches!(
            VoteParams::new(vec![f64::NAN], vec![1.0]).validate(),
            Err(GhtError::InvalidRotation { .. })
        ));
    }

    #[test]
    fn identity_pose_concentrates_on_reference() {
        let img = square(20, 5, 15);
        let table = square_table(&img);
        let out = detect_edges(&img, &canny()).unwrap();
        let params = VoteParams::default();
        let (acc, votes) = cast_votes(&out.edges, &out.field, &table, &params).unwrap();
        assert!(votes > 0);
        let best = acc.global_max().unwrap();
        assert_eq!((best.row, best.col), (10, 10));
        // every edge pixel votes for the reference with its own weight
        let self_votes: f64 = out
            .edges
            .edge_pixels()
            .map(|(x, y)| out.field.magnitude.get(x, y))
            .sum();
        assert!(acc.get(10, 10, 0, 0) >= self_votes - 1e-6);
    }

    #[test]
    fn unmatched_orientations_cast_nothing() {
        let img = square(20, 5, 15);
        let table = square_table(&img);
        // a vertical stripe only has 0° and 180° gradients; shifted by 30° they
        // land on keys the axis-aligned square never produces
        let stripe = Grid::from_fn(20, 20, |x, _| {
            if (8..12).contains(&x) {
                255.0
            } else {
                0.0
            }
        });
        let out = detect_edges(&stripe, &canny()).unwrap();
        assert!(out.edges.edge_count() > 0);
        let params = VoteParams::new(vec![30.0], vec![1.0]);
        let (acc, _) = cast_votes(&out.edges, &out.field, &table, &params).unwrap();
        assert_eq!(acc.total(), 0.0);
    }

    #[test]
    fn empty_table_yields_zero_accumulator() {
        let img = square(12, 3, 9);
        let out = detect_edges(&img, &canny()).unwrap();
        let flat = Grid::filled(12, 12, 5.0);
        let blank = build_rtable(&[flat], ReferencePoint::new(6, 6), &canny()).unwrap();
        assert!(blank.is_empty());
        let params = VoteParams::default();
        let (acc, votes) = cast_votes(&out.edges, &out.field, &blank, &params).unwrap();
        assert_eq!(votes, 0);
        assert_eq!(acc.total(), 0.0);
    }

    #[test]
    fn gradient_field_must_match_edge_map() {
        let img = square(20, 5, 15);
        let table = square_table(&img);
        let out = detect_edges(&img, &canny()).unwrap();
        let small = detect_edges(&square(5, 1, 4), &canny()).unwrap();
        let params = VoteParams::default();
        let err = cast_votes(&out.edges, &small.field, &table, &params).unwrap_err();
        assert_eq!(
            err,
            GhtError::ShapeMismatch {
                stage: "hough voting",
                expected: (20, 20),
                found: (5, 5),
            }
        );
    }

    #[test]
    fn integer_displacements_ignore_rounding_policy() {
        let img = square(20, 5, 15);
        let table = square_table(&img);
        let out = detect_edges(&img, &canny()).unwrap();
        let params = VoteParams::default();
        let nearest = cast_votes(&out.edges, &out.field, &table, &params).unwrap();
        let truncate = params.with_rounding(CoordinateRounding::Truncate);
        let truncated = cast_votes(&out.edges, &out.field, &table, &truncate).unwrap();
        assert_eq!(nearest, truncated);
    }

    #[test]
    fn truncation_biases_toward_lower_indices() {
        assert_eq!(CoordinateRounding::Nearest.apply(2.6), 3.0);
        assert_eq!(CoordinateRounding::Truncate.apply(2.6), 2.0);
        assert_eq!(CoordinateRounding::Truncate.apply(-0.5), 0.0);
    }
}
