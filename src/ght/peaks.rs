//! Thresholding and per-slice smoothing of the vote space.
use super::accumulator::{Accumulator, Peak};
use crate::error::GhtError;
use crate::filters::{convolve, gaussian_kernel, BorderFill};
use crate::image::Grid;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Side length of the vote smoothing kernel.
pub const SMOOTHING_SIZE: usize = 5;
/// Sigma of the vote smoothing kernel.
pub const SMOOTHING_SIGMA: f64 = 1.0;

/// Peak extraction and selection settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeakParams {
    /// Raw votes below this are zeroed before smoothing.
    pub vote_threshold: f64,
    /// Smoothed local maxima must score above this to be reported.
    pub min_score: f64,
    pub max_peaks: usize,
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            vote_threshold: 0.0,
            min_score: 0.0,
            max_peaks: 1,
        }
    }
}

impl PeakParams {
    pub fn validate(&self) -> Result<(), GhtError> {
        if !self.vote_threshold.is_finite() {
            return Err(GhtError::InvalidPeakParams {
                parameter: "voteThreshold",
                value: self.vote_threshold,
            });
        }
        if !self.min_score.is_finite() {
            return Err(GhtError::InvalidPeakParams {
                parameter: "minScore",
                value: self.min_score,
            });
        }
        Ok(())
    }
}

/// Zero every cell below `vote_threshold`, then smooth each
/// (rotation, scale) slice with a 5×5, σ=1 Gaussian.
///
/// Smoothing treats everything outside the slice as zero votes.
pub fn extract_peaks(acc: &Accumulator, vote_threshold: f64) -> Result<Accumulator, GhtError> {
    if !vote_threshold.is_finite() {
        return Err(GhtError::InvalidPeakParams {
            parameter: "voteThreshold",
            value: vote_threshold,
        });
    }
    let kernel = gaussian_kernel(SMOOTHING_SIZE, SMOOTHING_SIGMA)?;
    let mut out = acc.clone();
    let (rows, cols) = (acc.rows(), acc.cols());
    let slice_len = acc.slice_len();
    if slice_len == 0 {
        return Ok(out);
    }

    out.data_mut().par_chunks_mut(slice_len).for_each(|slice| {
        let thresholded = Grid {
            w: cols,
            h: rows,
            stride: cols,
            data: slice
                .iter()
                .map(|&v| if v >= vote_threshold { v } else { 0.0 })
                .collect(),
        };
        let smoothed = convolve(&thresholded, &kernel, BorderFill::Zero);
        slice.copy_from_slice(&smoothed.data);
    });
    debug!(
        "peaks: smoothed {} slices of {}x{} (threshold {})",
        out.slice_count(),
        cols,
        rows,
        vote_threshold
    );
    Ok(out)
}

/// Smooth, then pick up to `max_peaks` local maxima above `min_score`.
pub fn select_peaks(
    acc: &Accumulator,
    params: &PeakParams,
) -> Result<(Accumulator, Vec<Peak>), GhtError> {
    params.validate()?;
    let smoothed = extract_peaks(acc, params.vote_threshold)?;
    let peaks = smoothed.local_maxima(params.min_score, params.max_peaks);
    debug!("peaks: {} selected", peaks.len());
    Ok((smoothed, peaks))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn below_threshold_votes_vanish() {
        let mut acc = Accumulator::new(9, 9, vec![0.0], vec![1.0]);
        acc.add(4, 4, 0, 0, 3.0);
        let out = extract_peaks(&acc, 5.0).unwrap();
        assert_eq!(out.total(), 0.0);
        // threshold is inclusive
        let out = extract_peaks(&acc, 3.0).unwrap();
        assert!(out.total() > 0.0);
    }

    #[test]
    fn interior_mass_is_preserved_and_peak_stays_put() {
        let mut acc = Accumulator::new(11, 11, vec![0.0, 90.0], vec![1.0]);
        acc.add(5, 5, 1, 0, 10.0);
        let out = extract_peaks(&acc, 0.0).unwrap();
        assert!(approx_eq(out.total(), 10.0));
        let best = out.global_max().unwrap();
        assert_eq!((best.row, best.col, best.rotation_index), (5, 5, 1));
        assert!(best.score < 10.0);
        // neighbouring cells pick up weight symmetrically
        assert!(approx_eq(out.get(4, 5, 1, 0), out.get(6, 5, 1, 0)));
        assert!(approx_eq(out.get(5, 4, 1, 0), out.get(5, 6, 1, 0)));
        assert_eq!(out.slice(0, 0).iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn corner_votes_do_not_gain_weight_from_the_frame() {
        let mut acc = Accumulator::new(6, 6, vec![0.0], vec![1.0]);
        acc.add(0, 0, 0, 0, 8.0);
        acc.add(3, 3, 0, 0, 8.0);
        let out = extract_peaks(&acc, 1.0).unwrap();
        assert!(out.get(0, 0, 0, 0) < 8.0);
        assert!(out.total() < 16.0);
    }

    #[test]
    fn selection_respects_limits() {
        let mut acc = Accumulator::new(20, 20, vec![0.0], vec![1.0, 2.0]);
        acc.add(5, 5, 0, 0, 10.0);
        acc.add(14, 12, 0, 1, 20.0);
        let params = PeakParams {
            max_peaks: 5,
            ..Default::default()
        };
        let (_, peaks) = select_peaks(&acc, &params).unwrap();
        assert_eq!(peaks.len(), 2);
        let top = &peaks[0];
        assert_eq!((top.row, top.col, top.scale_index), (14, 12, 1));
        assert_eq!((peaks[1].row, peaks[1].col), (5, 5));

        let (_, peaks) = select_peaks(&acc, &PeakParams::default()).unwrap();
        assert_eq!(peaks.len(), 1);
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        let acc = Accumulator::new(3, 3, vec![0.0], vec![1.0]);
        assert!(matches!(
            extract_peaks(&acc, f64::NAN),
            Err(GhtError::InvalidPeakParams { .. })
        ));
    }
}
