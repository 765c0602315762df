//! Error taxonomy for malformed input.
//!
//! Only malformed parameters are errors. Coordinates that fall outside a grid
//! during neighbour lookup or voting are skipped, and degenerate Gaussian
//! parameters resolve to the identity kernel.

/// Reasons why a pipeline stage refuses to run.
#[derive(Clone, Debug, PartialEq)]
pub enum GhtError {
    /// Kernel side length must be at least 1.
    InvalidKernelSize { size: usize },
    /// Gaussian sigma must be finite and non-negative.
    InvalidSigma { sigma: f64 },
    /// The stage received a grid with zero rows or columns.
    EmptyImage { stage: &'static str },
    /// Backing buffer length does not match the declared dimensions.
    DataLengthMismatch { expected: usize, found: usize },
    /// Two grids that must describe the same image differ in size.
    /// Sizes are `(width, height)`.
    ShapeMismatch {
        stage: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Hysteresis thresholds must be finite with `low <= high`.
    InvalidThresholds { low: f64, high: f64 },
    /// R-table construction needs at least one image.
    NoTrainingImages,
    /// A hypothesis set (rotations or scales) is empty.
    EmptyHypotheses { parameter: &'static str },
    /// Scale hypotheses must be finite and strictly positive.
    InvalidScale { scale: f64 },
    /// Rotation hypotheses must be finite.
    InvalidRotation { degrees: f64 },
    /// Peak extraction parameters must be finite.
    InvalidPeakParams { parameter: &'static str, value: f64 },
}

impl std::fmt::Display for GhtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GhtError::InvalidKernelSize { size } => {
                write!(f, "kernel size must be >= 1 (got {size})")
            }
            GhtError::InvalidSigma { sigma } => {
                write!(f, "gaussian sigma must be finite and >= 0 (got {sigma})")
            }
            GhtError::EmptyImage { stage } => write!(f, "{stage}: input image is empty"),
            GhtError::DataLengthMismatch { expected, found } => {
                write!(f, "buffer length mismatch ({found} != {expected})")
            }
            GhtError::ShapeMismatch {
                stage,
                expected,
                found,
            } => write!(
                f,
                "{stage}: grid is {}x{}, expected {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            GhtError::InvalidThresholds { low, high } => write!(
                f,
                "edge thresholds must be finite with low <= high (low={low}, high={high})"
            ),
            GhtError::NoTrainingImages => {
                write!(f, "r-table training requires at least one image")
            }
            GhtError::EmptyHypotheses { parameter } => {
                write!(f, "hough voting: `{parameter}` must not be empty")
            }
            GhtError::InvalidScale { scale } => {
                write!(f, "hough voting: scale must be positive (got {scale})")
            }
            GhtError::InvalidRotation { degrees } => {
                write!(f, "hough voting: non-finite rotation {degrees}°")
            }
            GhtError::InvalidPeakParams { parameter, value } => {
                write!(f, "peak extraction: `{parameter}` is not finite ({value})")
            }
        }
    }
}

impl std::error::Error for GhtError {}
