//! R-table: quantized edge orientation → displacement → accumulated weight.
//!
//! Orientation buckets are fixed-point keys (degrees × 10, rounded), so the
//! quantization used at training time is bit-for-bit the one used when
//! voting. Displacements point from the reference point to the edge pixel,
//! `(row − ref_row, col − ref_col)`, and weights are summed gradient
//! magnitudes.
//!
//! The table serializes as a flat list of records for persistence.
use crate::angle::quantize_tenths;
use crate::edges::{detect_edges, CannyOutput, CannyParams};
use crate::error::GhtError;
use crate::image::Grid;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Orientation bucket in tenths of a degree, range (−1800, 1800].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrientationKey(i32);

impl OrientationKey {
    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self(quantize_tenths(deg))
    }

    /// Rebuild a key from its stored tenths, re-normalising if needed.
    pub fn from_tenths(tenths: i32) -> Self {
        Self::from_degrees(tenths as f64 / 10.0)
    }

    #[inline]
    pub fn tenths(self) -> i32 {
        self.0
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

/// Integer offset from the reference point to an edge pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Displacement {
    pub d_row: i32,
    pub d_col: i32,
}

impl Displacement {
    pub fn new(d_row: i32, d_col: i32) -> Self {
        Self { d_row, d_col }
    }
}

/// Pixel the displacements are measured from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub row: i32,
    pub col: i32,
}

impl ReferencePoint {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// `(h / 2, w / 2)` of `grid`.
    pub fn center_of(grid: &Grid) -> Self {
        Self::new((grid.h / 2) as i32, (grid.w / 2) as i32)
    }
}

/// Axis-aligned extent of all displacements in a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplacementBounds {
    pub min_row: i32,
    pub max_row: i32,
    pub min_col: i32,
    pub max_col: i32,
}

type Bucket = BTreeMap<Displacement, f64>;

/// Trained shape model. Immutable once built; shared read-only by detections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "RTableFile", from = "RTableFile")]
pub struct RTable {
    reference: ReferencePoint,
    image_count: usize,
    buckets: BTreeMap<OrientationKey, Bucket>,
}

impl RTable {
    fn empty(reference: ReferencePoint) -> Self {
        Self {
            reference,
            image_count: 0,
            buckets: BTreeMap::new(),
        }
    }

    /// Insert-or-accumulate `weight` at `(key, displacement)`.
    fn accumulate(&mut self, key: OrientationKey, displacement: Displacement, weight: f64) {
        *self
            .buckets
            .entry(key)
            .or_default()
            .entry(displacement)
            .or_insert(0.0) += weight;
    }

    pub fn reference(&self) -> ReferencePoint {
        self.reference
    }

    /// Number of training images that contributed.
    pub fn image_count(&self) -> usize {
        self.image_count
    }

    #[inline]
    pub fn bucket(&self, key: OrientationKey) -> Option<&BTreeMap<Displacement, f64>> {
        self.buckets.get(&key)
    }

    pub fn weight(&self, key: OrientationKey, displacement: Displacement) -> Option<f64> {
        self.bucket(key)?.get(&displacement).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = OrientationKey> + '_ {
        self.buckets.keys().copied()
    }

    /// `(key, displacement, weight)` in key then displacement order.
    pub fn entries(&self) -> impl Iterator<Item = (OrientationKey, Displacement, f64)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(&k, bucket)| bucket.iter().map(move |(&d, &w)| (k, d, w)))
    }

    /// Number of orientation buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of `(orientation, displacement)` entries.
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn bucket_weight(&self, key: OrientationKey) -> f64 {
        self.bucket(key).map_or(0.0, |b| b.values().sum())
    }

    pub fn total_weight(&self) -> f64 {
        self.buckets.values().flat_map(BTreeMap::values).sum()
    }

    pub fn bounds(&self) -> Option<DisplacementBounds> {
        let mut it = self.entries().map(|(_, d, _)| d);
        let first = it.next()?;
        let init = DisplacementBounds {
            min_row: first.d_row,
            max_row: first.d_row,
            min_col: first.d_col,
            max_col: first.d_col,
        };
        Some(it.fold(init, |b, d| DisplacementBounds {
            min_row: b.min_row.min(d.d_row),
            max_row: b.max_row.max(d.d_row),
            min_col: b.min_col.min(d.d_col),
            max_col: b.max_col.max(d.d_col),
        }))
    }
}

/// Flat on-disk form of an [`RTable`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RTableFile {
    reference: ReferencePoint,
    image_count: usize,
    entries: Vec<RTableRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RTableRecord {
    orientation_tenths: i32,
    d_row: i32,
    d_col: i32,
    weight: f64,
}

impl From<RTable> for RTableFile {
    fn from(table: RTable) -> Self {
        let entries = table
            .entries()
            .map(|(k, d, w)| RTableRecord {
                orientation_tenths: k.tenths(),
                d_row: d.d_row,
                d_col: d.d_col,
                weight: w,
            })
            .collect();
        Self {
            reference: table.reference,
            image_count: table.image_count,
            entries,
        }
    }
}

impl From<RTableFile> for RTable {
    fn from(file: RTableFile) -> Self {
        let mut table = RTable::empty(file.reference);
        table.image_count = file.image_count;
        for r in file.entries {
            table.accumulate(
                OrientationKey::from_tenths(r.orientation_tenths),
                Displacement::new(r.d_row, r.d_col),
                r.weight,
            );
        }
        table
    }
}

/// Accumulates edge pixels from one or more training images into an
/// [`RTable`].
#[derive(Clone, Debug)]
pub struct RTableBuilder {
    params: CannyParams,
    table: RTable,
}

impl RTableBuilder {
    pub fn new(reference: ReferencePoint, params: CannyParams) -> Result<Self, GhtError> {
        params.validate()?;
        Ok(Self {
            params,
            table: RTable::empty(reference),
        })
    }

    /// Record every finalised edge pixel of an already extracted image.
    /// Returns the number of pixels added.
    pub fn add_edges(&mut self, canny: &CannyOutput) -> usize {
        let reference = self.table.reference;
        let mut added = 0usize;
        for (x, y) in canny.edges.edge_pixels() {
            let key = OrientationKey::from_degrees(canny.field.orientation.get(x, y));
            let displacement =
                Displacement::new(y as i32 - reference.row, x as i32 - reference.col);
            self.table
                .accumulate(key, displacement, canny.field.magnitude.get(x, y));
            added += 1;
        }
        self.table.image_count += 1;
        added
    }

    /// Extract edges from `image` and add them. The intermediate products
    /// are returned for inspection.
    pub fn add_image(&mut self, image: &Grid) -> Result<CannyOutput, GhtError> {
        let canny = detect_edges(image, &self.params)?;
        let added = self.add_edges(&canny);
        debug!(
            "r-table: image {} ({}x{}) added {} edge pixels",
            self.table.image_count, image.w, image.h, added
        );
        Ok(canny)
    }

    /// Extract edges from all images in parallel and merge them in order.
    pub fn add_images(&mut self, images: &[Grid]) -> Result<(), GhtError> {
        let outputs = images
            .par_iter()
            .map(|img| detect_edges(img, &self.params))
            .collect::<Result<Vec<_>, _>>()?;
        for canny in &outputs {
            self.add_edges(canny);
        }
        Ok(())
    }

    pub fn build(self) -> Result<RTable, GhtError> {
        if self.table.image_count == 0 {
            return Err(GhtError::NoTrainingImages);
        }
        debug!(
            "r-table: {} images, {} buckets, {} entries",
            self.table.image_count,
            self.table.bucket_count(),
            self.table.entry_count()
        );
        Ok(self.table)
    }
}

/// Train an R-table from `images` in one call.
pub fn build_rtable(
    images: &[Grid],
    reference: ReferencePoint,
    params: &CannyParams,
) -> Result<RTable, GhtError> {
    if images.is_empty() {
        return Err(GhtError::NoTrainingImages);
    }
    let mut builder = RTableBuilder::new(reference, *params)?;
    builder.add_images(images)?;
    builder.build()
}
