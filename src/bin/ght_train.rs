use ght_detector::config::train::load_config;
use ght_detector::edges::CannyOutput;
use ght_detector::ght::{RTableBuilder, ReferencePoint};
use ght_detector::image::io::{
    load_grayscale_image, save_grid_png, save_orientation_png, write_json_file,
};
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
    if config.inputs.is_empty() {
        return Err("Config lists no training images".to_string());
    }

    let templates = config
        .inputs
        .iter()
        .map(|p| load_grayscale_image(p))
        .collect::<Result<Vec<_>, _>>()?;
    let reference = config
        .reference
        .unwrap_or_else(|| ReferencePoint::center_of(&templates[0]));

    let mut builder = RTableBuilder::new(reference, config.canny).map_err(|e| e.to_string())?;
    for (index, (path, template)) in config.inputs.iter().zip(&templates).enumerate() {
        let canny = builder.add_image(template).map_err(|e| e.to_string())?;
        println!(
            "{}: {} edge pixels",
            path.display(),
            canny.edges.edge_count()
        );
        if let Some(dir) = &config.output.edges_dir {
            dump_edges(dir, index, &canny)?;
        }
    }
    let table = builder.build().map_err(|e| e.to_string())?;

    write_json_file(&config.output.rtable_json, &table)?;
    println!(
        "Saved r-table ({} buckets, {} entries, reference ({}, {})) to {}",
        table.bucket_count(),
        table.entry_count(),
        reference.row,
        reference.col,
        config.output.rtable_json.display()
    );
    Ok(())
}

fn dump_edges(dir: &Path, index: usize, canny: &CannyOutput) -> Result<(), String> {
    let edges_path = dir.join(format!("edges_{index}.png"));
    save_grid_png(canny.edges.as_grid(), &edges_path)?;
    let magnitude_path = dir.join(format!("magnitude_{index}.png"));
    save_grid_png(&canny.field.magnitude, &magnitude_path)?;
    let orientation_path = dir.join(format!("orientation_{index}.png"));
    save_orientation_png(&canny.field.orientation, &orientation_path)
}

fn usage() -> String {
    "Usage: ght_train <config.json>".to_string()
}
