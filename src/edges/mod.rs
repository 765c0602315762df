//! Canny edge extraction: gradients, non-maximum suppression and hysteresis.
//!
//! - [`grad::gradient_field`] computes Sobel magnitude and orientation in
//!   degrees over a mirrored one-pixel margin.
//! - [`nms::suppress_non_maxima`] zeroes magnitudes that are smaller than
//!   either neighbour along the gradient direction.
//! - [`hysteresis`] double-thresholds the survivors and grows strong seeds
//!   through 8-connected weak pixels with an explicit stack.
//! - [`canny`] wires the stages together behind [`classify_edges`] and
//!   [`detect_edges`].
//!
//! Conventions
//! - `(x, y)` = (column, row); orientation is `atan2(dy, dx)` in (−180°, 180°].
//! - Every pixel, including the outer frame, goes through suppression;
//!   neighbours outside the grid are ignored.
//! - Suppression keeps ties (`<` suppresses), so two-pixel-wide step
//!   responses survive on both sides.

pub mod canny;
pub mod edge_map;
pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use canny::{classify_edges, detect_edges, CannyOutput, CannyParams};
pub use edge_map::{EdgeMap, EdgeState};
pub use grad::{gradient_field, GradientField};
pub use hysteresis::Thresholds;
pub use nms::suppress_non_maxima;
