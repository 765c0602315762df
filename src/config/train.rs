use crate::edges::CannyParams;
use crate::ght::ReferencePoint;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct TrainToolConfig {
    /// Template images; all share the same reference point.
    pub inputs: Vec<PathBuf>,
    /// Defaults to the centre of the first template.
    #[serde(default)]
    pub reference: Option<ReferencePoint>,
    #[serde(default)]
    pub canny: CannyParams,
    pub output: TrainOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct TrainOutputConfig {
    #[serde(rename = "rtable_json")]
    pub rtable_json: PathBuf,
    /// Per-template edge, magnitude and orientation PNGs are written here.
    #[serde(default, rename = "edges_dir")]
    pub edges_dir: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<TrainToolConfig, String> {
    super::load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses() {
        let cfg: TrainToolConfig = serde_json::from_str(
            r#"{
                "inputs": ["a.png", "b.png"],
                "reference": { "row": 10, "col": 12 },
                "canny": { "thresholds": { "low": 20.0, "high": 60.0 } },
                "output": { "rtable_json": "out/rtable.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.inputs.len(), 2);
        assert_eq!(cfg.reference, Some(ReferencePoint::new(10, 12)));
        assert_eq!(cfg.canny.thresholds.high, 60.0);
        assert_eq!(cfg.canny.blur.size, 5);
        assert!(cfg.output.edges_dir.is_none());
    }
}
