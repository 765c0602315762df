//! Detector pipeline orchestrating training and end-to-end detection.
//!
//! Typical usage:
//! ```no_run
//! use ght_detector::{DetectorParams, ReferencePoint, ShapeDetector};
//! use ght_detector::edges::CannyParams;
//! use ght_detector::image::Grid;
//!
//! # fn example(template: Grid, query: Grid) -> Result<(), ght_detector::GhtError> {
//! let reference = ReferencePoint::center_of(&template);
//! let detector = ShapeDetector::train(
//!     &[template],
//!     reference,
//!     &CannyParams::default(),
//!     DetectorParams::default(),
//! )?;
//! let report = detector.detect(&query)?;
//! if let Some(best) = report.best() {
//!     println!("found at ({}, {}) score {:.1}", best.row, best.col, best.score);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::DetectorParams;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::TimingBreakdown;
use crate::edges::{detect_edges, CannyParams};
use crate::error::GhtError;
use crate::ght::{build_rtable, cast_votes, select_peaks, RTable, ReferencePoint};
use crate::image::Grid;
use crate::types::{Detection, DetectionReport};
use log::{debug, warn};
use std::time::Instant;

/// A trained shape model plus the parameters used to search for it.
///
/// The R-table is read-only after construction, so one detector can serve
/// any number of queries (also from several threads).
#[derive(Clone, Debug)]
pub struct ShapeDetector {
    params: DetectorParams,
    table: RTable,
}

impl ShapeDetector {
    /// Wrap an existing (e.g. deserialized) R-table.
    pub fn new(table: RTable, params: DetectorParams) -> Result<Self, GhtError> {
        params.validate()?;
        Ok(Self { params, table })
    }

    /// Train an R-table from `images` and wrap it.
    pub fn train(
        images: &[Grid],
        reference: ReferencePoint,
        training: &CannyParams,
        params: DetectorParams,
    ) -> Result<Self, GhtError> {
        params.validate()?;
        let table = build_rtable(images, reference, training)?;
        Ok(Self { params, table })
    }

    pub fn table(&self) -> &RTable {
        &self.table
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn set_params(&mut self, params: DetectorParams) -> Result<(), GhtError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Locate the trained shape in `image`.
    pub fn detect(&self, image: &Grid) -> Result<DetectionReport, GhtError> {
        let total_start = Instant::now();
        let mut timing = TimingBreakdown::default();

        let canny = detect_edges(image, &self.params.canny)?;
        timing.push("blur", canny.blur_ms);
        timing.push("gradient", canny.gradient_ms);
        timing.push("classify", canny.classify_ms);
        let edge_count = canny.edges.edge_count();
        if edge_count == 0 {
            warn!("detect: no edges in {}x{} query image", image.w, image.h);
        }

        let vote_start = Instant::now();
        let (raw, votes_cast) = cast_votes(
            &canny.edges,
            &canny.field,
            &self.table,
            &self.params.vote,
        )?;
        timing.push_since("vote", vote_start);

        let peaks_start = Instant::now();
        let (accumulator, peaks) = select_peaks(&raw, &self.params.peaks)?;
        timing.push_since("peaks", peaks_start);

        timing.total_ms = elapsed_ms(total_start);
        let detections: Vec<Detection> = peaks.into_iter().map(Detection::from).collect();
        debug!(
            "detect: edges={} votes={} detections={} total={:.2}ms",
            edge_count,
            votes_cast,
            detections.len(),
            timing.total_ms
        );

        Ok(DetectionReport {
            width: image.w,
            height: image.h,
            edge_count,
            votes_cast,
            detections,
            timing,
            accumulator,
        })
    }
}
