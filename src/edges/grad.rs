//! Sobel gradients with magnitude and orientation in degrees.
//!
//! - Mirrors the input by one pixel, then applies the 3×3 Sobel pair
//!   (`X` and its transpose `Y`) at every original pixel, so the output has
//!   the input's shape.
//! - Outputs `mag = sqrt(dx² + dy²)` and `atan2(dy, dx)` in (−180°, 180°].
//!
//! Complexity: O(W·H) per pass; rows are processed in parallel.
use crate::angle::orientation_degrees;
use crate::error::GhtError;
use crate::filters::{extend, BorderPolicy};
use crate::image::{Grid, ImageView};
use rayon::prelude::*;

type Kernel3 = [[f64; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient magnitude and orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientField {
    /// Euclidean magnitude, `>= 0`
    pub magnitude: Grid,
    /// Orientation in degrees, (−180, 180]
    pub orientation: Grid,
}

impl GradientField {
    #[inline]
    pub fn width(&self) -> usize {
        self.magnitude.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.magnitude.h
    }
}

/// Compute the Sobel gradient field of `grid`.
pub fn gradient_field(grid: &Grid) -> Result<GradientField, GhtError> {
    if grid.is_empty() {
        return Err(GhtError::EmptyImage { stage: "gradient" });
    }
    let (w, h) = (grid.w, grid.h);
    let padded = extend(grid, 1, BorderPolicy::Replicate);
    let mut magnitude = Grid::new(w, h);
    let mut orientation = Grid::new(w, h);

    magnitude
        .data
        .par_chunks_mut(w)
        .zip(orientation.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (mag_row, ori_row))| {
            // padded rows y, y+1, y+2 surround original row y
            let rows = [padded.row(y), padded.row(y + 1), padded.row(y + 2)];
            for x in 0..w {
                let mut dx = 0.0;
                let mut dy = 0.0;
                for (ky, row) in rows.iter().enumerate() {
                    let kx_row = &SOBEL_KERNEL_X[ky];
                    let ky_row = &SOBEL_KERNEL_Y[ky];
                    dx += row[x] * kx_row[0] + row[x + 1] * kx_row[1] + row[x + 2] * kx_row[2];
                    dy += row[x] * ky_row[0] + row[x + 1] * ky_row[1] + row[x + 2] * ky_row[2];
                }
                mag_row[x] = (dx * dx + dy * dy).sqrt();
                ori_row[x] = orientation_degrees(dx, dy);
            }
        });

    Ok(GradientField {
        magnitude,
        orientation,
    })
}
