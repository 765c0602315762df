use super::edge_map::EdgeMap;
use super::grad::{gradient_field, GradientField};
use super::hysteresis::{double_threshold, propagate, Thresholds};
use super::nms::suppress_non_maxima;
use crate::error::GhtError;
use crate::filters::{blur, GaussianParams};
use crate::image::Grid;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters for the blur → gradient → classify pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    pub blur: GaussianParams,
    pub thresholds: Thresholds,
}

impl CannyParams {
    pub fn new(blur: GaussianParams, thresholds: Thresholds) -> Self {
        Self { blur, thresholds }
    }

    pub fn with_blur(mut self, blur: GaussianParams) -> Self {
        self.blur = blur;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Fail fast on malformed kernel or threshold settings.
    pub fn validate(&self) -> Result<(), GhtError> {
        self.thresholds.validate()?;
        self.blur.kernel().map(|_| ())
    }
}

/// Intermediate products of one edge extraction.
#[derive(Clone, Debug)]
pub struct CannyOutput {
    pub blurred: Grid,
    pub field: GradientField,
    pub edges: EdgeMap,
    pub blur_ms: f64,
    pub gradient_ms: f64,
    pub classify_ms: f64,
}

/// Suppress, double-threshold and propagate a gradient field into a binary
/// edge map.
pub fn classify_edges(field: &GradientField, thresholds: Thresholds) -> Result<EdgeMap, GhtError> {
    thresholds.validate()?;
    if field.magnitude.is_empty() {
        return Err(GhtError::EmptyImage {
            stage: "edge classification",
        });
    }
    let suppressed = suppress_non_maxima(field);
    let candidates = double_threshold(&suppressed, thresholds);
    let (seeds, weak) = (candidates.seed_count(), candidates.weak_count());
    let edges = propagate(candidates);
    debug!(
        "edges: {}x{} seeds={} weak={} final={}",
        field.width(),
        field.height(),
        seeds,
        weak,
        edges.edge_count()
    );
    Ok(edges)
}

/// Run blur, Sobel gradients and edge classification on `image`.
pub fn detect_edges(image: &Grid, params: &CannyParams) -> Result<CannyOutput, GhtError> {
    params.validate()?;

    let blur_start = Instant::now();
    let blurred = blur(image, &params.blur)?;
    let blur_ms = blur_start.elapsed().as_secs_f64() * 1000.0;

    let gradient_start = Instant::now();
    let field = gradient_field(&blurred)?;
    let gradient_ms = gradient_start.elapsed().as_secs_f64() * 1000.0;

    let classify_start = Instant::now();
    let edges = classify_edges(&field, params.thresholds)?;
    let classify_ms = classify_start.elapsed().as_secs_f64() * 1000.0;

    Ok(CannyOutput {
        blurred,
        field,
        edges,
        blur_ms,
        gradient_ms,
        classify_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, lo: usize, hi: usize) -> Grid {
        Grid::from_fn(size, size, |x, y| {
            if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
                255.0
            } else {
                0.0
            }
        })
    }

    #[test]
    fn classification_is_idempotent_on_binary_maps() {
        let img = square(20, 5, 15);
        let params = CannyParams::default().with_blur(GaussianParams::none());
        let out = detect_edges(&img, &params).unwrap();
        assert!(out.edges.edge_count() > 0);

        let binary = GradientField {
            magnitude: out.edges.as_grid().clone(),
            orientation: out.field.orientation.clone(),
        };
        let again = classify_edges(&binary, params.thresholds).unwrap();
        assert_eq!(again, out.edges);
    }

    #[test]
    fn square_outline_is_closed_and_two_pixels_wide() {
        let img = square(20, 5, 15);
        let params = CannyParams::default().with_blur(GaussianParams::none());
        let out = detect_edges(&img, &params).unwrap();
        for y in 6..14 {
            assert!(out.edges.is_edge(4, y) && out.edges.is_edge(5, y));
            assert!(out.edges.is_edge(14, y) && out.edges.is_edge(15, y));
            assert!(!out.edges.is_edge(10, y));
        }
        for x in 6..14 {
            assert!(out.edges.is_edge(x, 4) && out.edges.is_edge(x, 5));
        }
        assert!(!out.edges.is_edge(0, 0));
    }

    #[test]
    fn flat_image_has_no_edges() {
        let img = Grid::filled(16, 16, 128.0);
        let out = detect_edges(&img, &CannyParams::default()).unwrap();
        assert_eq!(out.edges.edge_count(), 0);
    }

    #[test]
    fn malformed_thresholds_fail_before_work() {
        let img = Grid::filled(4, 4, 1.0);
        let params = CannyParams::default().with_thresholds(Thresholds {
            low: 10.0,
            high: 5.0,
        });
        assert!(matches!(
            detect_edges(&img, &params),
            Err(GhtError::InvalidThresholds { .. })
        ));
    }
}
