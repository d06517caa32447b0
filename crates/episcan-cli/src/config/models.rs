use episcan::core::io::report::ReportFormat;
use episcan::engine::config::PredictionConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Where and how structures are downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureSettings {
    pub base_url: String,
    pub timeout: Duration,
    /// Overrides the cache directory resolved by the structure store.
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub prediction: PredictionConfig,
    pub structure: StructureSettings,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}
