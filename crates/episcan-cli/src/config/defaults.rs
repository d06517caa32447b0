use episcan::core::io::report::ReportFormat;
use episcan::core::scoring::{DEFAULT_THRESHOLD, DEFAULT_WINDOW};

pub const DEFAULT_STRUCTURE_BASE_URL: &str = "https://files.rcsb.org/download";

/// Threshold range accepted on the command line.
pub const MIN_THRESHOLD: f64 = 0.1;
pub const MAX_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct DefaultsConfig {
    pub window: usize,
    pub threshold: f64,
    pub format: ReportFormat,
    pub structure_base_url: String,
    pub structure_timeout_secs: u64,
    pub locate_known_epitopes: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
            format: ReportFormat::Text,
            structure_base_url: DEFAULT_STRUCTURE_BASE_URL.to_string(),
            structure_timeout_secs: 30,
            locate_known_epitopes: true,
        }
    }
}
