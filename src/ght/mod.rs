//! Generalized Hough Transform: shape model training and pose voting.
//!
//! Training ([`rtable`]) turns the edge pixels of one or more template
//! images into an R-table keyed by gradient orientation. Detection
//! ([`vote`]) lets every edge pixel of a query image vote for the reference
//! point under each (rotation, scale) hypothesis; [`peaks`] then thresholds
//! and smooths the [`Accumulator`] so neighbouring votes merge into peaks.
//!
//! Data flows forward only:
//!
//! ```text
//! query grid ─ canny ─► edges + field ─ cast_votes ─► Accumulator
//!                                                        │
//!                                         extract_peaks ─┴─► smoothed ─► Peak list
//! ```

pub mod accumulator;
pub mod peaks;
pub mod rtable;
pub mod vote;

pub use accumulator::{Accumulator, Peak};
pub use peaks::{extract_peaks, select_peaks, PeakParams};
pub use rtable::{
    build_rtable, Displacement, DisplacementBounds, OrientationKey, RTable, RTableBuilder,
    ReferencePoint,
};
pub use vote::{cast_votes, CoordinateRounding, VoteParams};

use crate::edges::{detect_edges, CannyOutput, CannyParams};
use crate::error::GhtError;
use crate::image::Grid;

/// Extract edges from `image` and vote them against `table`.
///
/// Returns the raw accumulator, the number of votes cast and the edge
/// extraction products.
pub fn hough_accumulator(
    image: &Grid,
    table: &RTable,
    canny: &CannyParams,
    params: &VoteParams,
) -> Result<(Accumulator, usize, CannyOutput), GhtError> {
    params.validate()?;
    let out = detect_edges(image, canny)?;
    let (acc, votes) = cast_votes(&out.edges, &out.field, table, params)?;
    Ok((acc, votes, out))
}
