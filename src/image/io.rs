//! I/O helpers for grayscale images, detection overlays and JSON.
//!
//! - `load_grayscale_image`: decode a PNG/JPEG/etc. into a [`Grid`] of 0–255 intensities.
//! - `save_grid_png`: write a grid (intensity, magnitude or edge map) as a grayscale PNG.
//! - `save_orientation_png`: write an orientation grid shifted by +180° into 8 bits.
//! - `save_detections_rgb`: draw oriented boxes in red on top of a grid.
//! - `write_json_file` / `read_json_file`: serde JSON to and from disk.
use super::{Grid, ImageU8};
use crate::types::OrientedBox;
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

const BOX_COLOR: Rgb<u8> = Rgb([255, 0, 0]);

/// Load an image from disk, convert to 8-bit grayscale and widen to `f64`.
pub fn load_grayscale_image(path: &Path) -> Result<Grid, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    let view = ImageU8::packed(w, h, img.as_raw())
        .map_err(|e| format!("Failed to load {}: {e}", path.display()))?;
    Ok(view.to_grid())
}

fn to_gray(grid: &Grid, map: impl Fn(f64) -> f64) -> GrayImage {
    let mut out = GrayImage::new(grid.w as u32, grid.h as u32);
    for y in 0..grid.h {
        for x in 0..grid.w {
            let v = map(grid.get(x, y)).round().clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out
}

/// Save a grid to a grayscale PNG, clamping values to [0, 255].
pub fn save_grid_png(grid: &Grid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    to_gray(grid, |v| v)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an orientation grid in degrees, mapping (−180, 180] to (0, 360]
/// before clamping so that both signs stay visible.
pub fn save_orientation_png(orientation: &Grid, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    to_gray(orientation, |deg| deg + 180.0)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Draw each box outline in red over a grayscale rendering of `grid`.
pub fn save_detections_rgb(grid: &Grid, boxes: &[OrientedBox], path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut canvas: RgbImage = image::DynamicImage::ImageLuma8(to_gray(grid, |v| v)).into_rgb8();
    for b in boxes {
        for (start, end) in b.edges() {
            draw_line_segment_mut(
                &mut canvas,
                (start[0] as f32, start[1] as f32),
                (end[0] as f32, end[1] as f32),
                BOX_COLOR,
            );
        }
    }
    canvas
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
