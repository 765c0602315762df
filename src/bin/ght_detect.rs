use ght_detector::config::detect::load_config;
use ght_detector::edges::detect_edges;
use ght_detector::ght::RTable;
use ght_detector::image::io::{
    load_grayscale_image, read_json_file, save_detections_rgb, save_grid_png, write_json_file,
};
use ght_detector::types::OrientedBox;
use ght_detector::ShapeDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let query = load_grayscale_image(&config.input)?;
    let table: RTable = read_json_file(&config.rtable)?;
    let detector = ShapeDetector::new(table, config.detector).map_err(|e| e.to_string())?;
    let report = detector.detect(&query).map_err(|e| e.to_string())?;

    write_json_file(&config.output.result_json, &report)?;
    println!(
        "{} detections from {} votes ({} edges) in {:.2} ms, saved to {}",
        report.detections.len(),
        report.votes_cast,
        report.edge_count,
        report.timing.total_ms,
        config.output.result_json.display()
    );
    for d in &report.detections {
        println!(
            "  ({}, {}) rotation {:.1}° scale {:.2} score {:.1}",
            d.row, d.col, d.rotation_deg, d.scale, d.score
        );
    }

    if let Some(path) = &config.output.annotated_image {
        let boxes: Vec<OrientedBox> = match detector.table().bounds() {
            Some(bounds) => report
                .detections
                .iter()
                .map(|d| d.oriented_box(&bounds))
                .collect(),
            None => Vec::new(),
        };
        save_detections_rgb(&query, &boxes, path)?;
        println!("Saved annotated image to {}", path.display());
    }
    if let Some(path) = &config.output.edges_image {
        let canny = detect_edges(&query, &detector.params().canny).map_err(|e| e.to_string())?;
        save_grid_png(canny.edges.as_grid(), path)?;
        println!("Saved query edges to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: ght_detect <config.json>".to_string()
}
