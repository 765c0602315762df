use crate::detector::DetectorParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DetectToolConfig {
    pub input: PathBuf,
    /// R-table written by `ght_train`.
    pub rtable: PathBuf,
    #[serde(default)]
    pub detector: DetectorParams,
    pub output: DetectOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct DetectOutputConfig {
    #[serde(rename = "result_json")]
    pub result_json: PathBuf,
    #[serde(default, rename = "annotated_image")]
    pub annotated_image: Option<PathBuf>,
    #[serde(default, rename = "edges_image")]
    pub edges_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DetectToolConfig, String> {
    super::load_json(path)
}
