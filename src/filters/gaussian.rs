use crate::error::GhtError;
use serde::{Deserialize, Serialize};

/// Square kernel of real weights stored row-major.
///
/// The anchor sits at `size / 2` on both axes: the exact centre for odd
/// sizes, biased one sample towards the end for even sizes.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Kernel {
    pub fn from_vec(size: usize, weights: Vec<f64>) -> Result<Self, GhtError> {
        if size == 0 {
            return Err(GhtError::InvalidKernelSize { size });
        }
        if weights.len() != size * size {
            return Err(GhtError::DataLengthMismatch {
                expected: size * size,
                found: weights.len(),
            });
        }
        Ok(Self { size, weights })
    }

    /// 3×3 delta: centre weight 1, all others 0.
    pub fn identity() -> Self {
        let mut weights = vec![0.0; 9];
        weights[4] = 1.0;
        Self { size: 3, weights }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn center(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.size + col]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// Gaussian blur parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianParams {
    /// Kernel side length (>= 1). `1` disables blurring.
    pub size: usize,
    /// Standard deviation in pixels (>= 0). `0` disables blurring.
    pub sigma: f64,
}

impl Default for GaussianParams {
    fn default() -> Self {
        Self {
            size: 5,
            sigma: 1.0,
        }
    }
}

impl GaussianParams {
    pub fn new(size: usize, sigma: f64) -> Self {
        Self { size, sigma }
    }

    /// Parameters that leave the image untouched.
    pub fn none() -> Self {
        Self::new(1, 0.0)
    }

    pub fn kernel(&self) -> Result<Kernel, GhtError> {
        gaussian_kernel(self.size, self.sigma)
    }
}

/// Build a normalised `size × size` Gaussian.
///
/// `size == 1` or `sigma == 0` return [`Kernel::identity`]. Weights are
/// centred on the geometric centre `(size - 1) / 2`, so even sizes stay
/// symmetric, then divided by their total.
pub fn gaussian_kernel(size: usize, sigma: f64) -> Result<Kernel, GhtError> {
    if size == 0 {
        return Err(GhtError::InvalidKernelSize { size });
    }
    if size == 1 {
        return Ok(Kernel::identity());
    }
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(GhtError::InvalidSigma { sigma });
    }
    if sigma == 0.0 {
        return Ok(Kernel::identity());
    }

    let peak = 1.0 / (2.0 * std::f64::consts::PI * sigma * sigma);
    let denom = 2.0 * sigma * sigma;
    let c = (size as f64 - 1.0) / 2.0;
    let mut weights = Vec::with_capacity(size * size);
    for i in 0..size {
        let di = i as f64 - c;
        for j in 0..size {
            let dj = j as f64 - c;
            weights.push(peak * (-(di * di + dj * dj) / denom).exp());
        }
    }
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    Ok(Kernel { size, weights })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_kernels_sum_to_one() {
        for size in [3, 5, 7, 9, 11] {
            for sigma in [0.3, 1.0, 1.5, 4.0] {
                let k = gaussian_kernel(size, sigma).unwrap();
                assert!((k.sum() - 1.0).abs() < 1e-9, "size={size} sigma={sigma}");
            }
        }
    }

    #[test]
    fn degenerate_parameters_yield_identity() {
        assert!(gaussian_kernel(1, 3.0).unwrap().is_identity());
        assert!(gaussian_kernel(1, 0.0).unwrap().is_identity());
        assert!(gaussian_kernel(7, 0.0).unwrap().is_identity());
        assert!(gaussian_kernel(4, 0.0).unwrap().is_identity());
    }

    #[test]
    fn odd_kernel_peaks_at_centre_and_is_symmetric() {
        let k = gaussian_kernel(5, 1.0).unwrap();
        let c = k.center();
        assert_eq!(c, 2);
        let centre = k.get(c, c);
        assert!(k.weights().iter().all(|&w| w <= centre));
        for i in 0..5 {
            for j in 0..5 {
                assert!((k.get(i, j) - k.get(4 - i, 4 - j)).abs() < 1e-15);
                assert!((k.get(i, j) - k.get(j, i)).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn even_kernel_is_normalised_and_symmetric() {
        let k = gaussian_kernel(4, 1.0).unwrap();
        assert_eq!(k.center(), 2);
        assert!((k.sum() - 1.0).abs() < 1e-9);
        assert!((k.get(1, 1) - k.get(2, 2)).abs() < 1e-15);
        assert!((k.get(0, 0) - k.get(3, 3)).abs() < 1e-15);
    }

    #[test]
    fn malformed_parameters_are_rejected() {
        assert_eq!(
            gaussian_kernel(0, 1.0).unwrap_err(),
            GhtError::InvalidKernelSize { size: 0 }
        );
        assert!(matches!(
            gaussian_kernel(5, -1.0),
            Err(GhtError::InvalidSigma { .. })
        ));
        assert!(matches!(
            Kernel::from_vec(2, vec![1.0; 3]),
            Err(GhtError::DataLengthMismatch { .. })
        ));
    }
}
