#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;

// Pipeline stages – public for tools and tests that inspect intermediates.
pub mod angle;
pub mod edges;
pub mod filters;
pub mod ght;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectorParams, ShapeDetector};
pub use crate::error::GhtError;
pub use crate::types::{Detection, DetectionReport, OrientedBox};

// Shape model and pose hypotheses.
pub use crate::ght::{
    build_rtable, CoordinateRounding, PeakParams, RTable, RTableBuilder, ReferencePoint,
    VoteParams,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ght_detector::prelude::*;
///
/// # fn main() -> Result<(), GhtError> {
/// let template = Grid::from_fn(20, 20, |x, y| {
///     if (5..15).contains(&x) && (5..15).contains(&y) { 255.0 } else { 0.0 }
/// });
/// let params = DetectorParams {
///     vote: VoteParams::new(vec![0.0, 90.0], vec![1.0, 1.5]),
///     ..Default::default()
/// };
/// let det = ShapeDetector::train(
///     std::slice::from_ref(&template),
///     ReferencePoint::center_of(&template),
///     &CannyParams::default(),
///     params,
/// )?;
/// let report = det.detect(&template)?;
/// println!("detections={} latency_ms={:.3}", report.detections.len(), report.timing.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::edges::CannyParams;
    pub use crate::image::Grid;
    pub use crate::{DetectorParams, GhtError, ReferencePoint, ShapeDetector, VoteParams};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::diagnostics::{StageTiming, TimingBreakdown};
    pub use crate::edges::{
        classify_edges, detect_edges, gradient_field, suppress_non_maxima, CannyOutput, EdgeMap,
        GradientField, Thresholds,
    };
    pub use crate::filters::{blur, convolve, extend, gaussian_kernel, BorderFill, BorderPolicy};
    pub use crate::ght::{
        cast_votes, extract_peaks, hough_accumulator, select_peaks, Accumulator, Peak,
    };
}
