use crate::error::{CliError, Result};
use episcan::structure::OverlayStyle;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileScoringConfig {
    pub window: Option<usize>,
    pub threshold: Option<f64>,
    #[serde(rename = "locate-known-epitopes")]
    pub locate_known_epitopes: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileStructureConfig {
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
    #[serde(rename = "cache-dir")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileViewerConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    #[serde(rename = "backbone-color")]
    pub backbone_color: Option<String>,
    #[serde(rename = "highlight-scheme")]
    pub highlight_scheme: Option<String>,
    #[serde(rename = "script-url")]
    pub script_url: Option<String>,
}

impl FileViewerConfig {
    /// Fills unset fields from the default viewer style.
    pub fn into_style(self) -> OverlayStyle {
        let defaults = OverlayStyle::default();
        OverlayStyle {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            backbone_color: self.backbone_color.unwrap_or(defaults.backbone_color),
            highlight_scheme: self.highlight_scheme.unwrap_or(defaults.highlight_scheme),
            script_url: self.script_url.unwrap_or(defaults.script_url),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub format: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub scoring: Option<FileScoringConfig>,
    pub structure: Option<FileStructureConfig>,
    pub viewer: Option<FileViewerConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
