//! Linear filtering primitives: border extension, square-kernel convolution
//! and Gaussian kernels.
//!
//! - [`border::extend`] pads a grid with zeros or mirrored samples.
//! - [`convolve::convolve`] is a direct sum-of-products over a padded copy,
//!   with the fill policy chosen per call ([`BorderFill`]).
//! - [`gaussian::gaussian_kernel`] builds normalised kernels; a size of 1 or
//!   sigma of 0 degrades to the 3×3 identity delta.
//!
//! Complexity: O(W·H·K²) per convolution, rows processed in parallel.

pub mod border;
pub mod convolve;
pub mod gaussian;

pub use border::{extend, BorderPolicy};
pub use convolve::{convolve, BorderFill};
pub use gaussian::{gaussian_kernel, GaussianParams, Kernel};

use crate::error::GhtError;
use crate::image::Grid;

/// Smooth `grid` with the Gaussian described by `params`.
///
/// Uses mirrored borders so the image frame does not read as an edge. An
/// identity kernel returns an unchanged copy.
pub fn blur(grid: &Grid, params: &GaussianParams) -> Result<Grid, GhtError> {
    if grid.is_empty() {
        return Err(GhtError::EmptyImage { stage: "blur" });
    }
    let kernel = params.kernel()?;
    if kernel.is_identity() {
        return Ok(grid.clone());
    }
    Ok(convolve(grid, &kernel, BorderFill::Replicate))
}
