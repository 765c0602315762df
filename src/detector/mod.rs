//! Shape detector tying edge extraction, R-table training and Hough voting
//! together.
//!
//! Overview
//! - Training runs blur → Sobel gradients → non-maximum suppression →
//!   hysteresis on each template image and accumulates the surviving edge
//!   pixels into an [`RTable`](crate::ght::RTable) relative to a shared
//!   reference point.
//! - Detection runs the same edge pipeline on the query image, casts votes
//!   for every (rotation, scale) hypothesis, zeroes weak cells, smooths each
//!   slice and reports the strongest local maxima as [`Detection`]s.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the [`ShapeDetector`] implementation.
//!
//! [`Detection`]: crate::types::Detection

pub mod params;
mod pipeline;

pub use params::DetectorParams;
pub use pipeline::ShapeDetector;
