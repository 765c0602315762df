//! Parameter types configuring the detector stages.
//!
//! Defaults reproduce the classic setup: 5×5 σ=1 blur, hysteresis
//! thresholds (50, 100), a single identity pose hypothesis and the single
//! strongest peak.
use crate::edges::CannyParams;
use crate::error::GhtError;
use crate::ght::{PeakParams, VoteParams};
use serde::{Deserialize, Serialize};

/// Detector-wide parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Edge extraction for the query image. Training uses the parameters
    /// supplied to [`ShapeDetector::train`](super::ShapeDetector::train).
    pub canny: CannyParams,
    /// Pose hypotheses and voting policy.
    pub vote: VoteParams,
    /// Thresholding and peak selection.
    pub peaks: PeakParams,
}

impl DetectorParams {
    pub fn validate(&self) -> Result<(), GhtError> {
        self.canny.validate()?;
        self.vote.validate()?;
        self.peaks.validate()
    }
}
