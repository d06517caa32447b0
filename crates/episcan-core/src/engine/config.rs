use crate::core::scoring::{DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use crate::structure::viewer::OverlayStyle;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Window size must be a positive integer (got {0})")]
    InvalidWindow(usize),
    #[error("Threshold must be a finite number (got {0})")]
    InvalidThreshold(f64),
    #[error("Viewer dimensions must be non-zero (got {width}x{height})")]
    InvalidViewerSize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub window: usize,
    pub threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionConfig {
    pub scoring: ScoringConfig,
    pub overlay: OverlayStyle,
    pub locate_known_epitopes: bool,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            overlay: OverlayStyle::default(),
            locate_known_epitopes: true,
        }
    }
}

#[derive(Default)]
pub struct PredictionConfigBuilder {
    window: Option<usize>,
    threshold: Option<f64>,
    overlay: Option<OverlayStyle>,
    locate_known_epitopes: Option<bool>,
}

impl PredictionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, window: usize) -> Self {
        self.window = Some(window);
        self
    }
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
    pub fn overlay(mut self, style: OverlayStyle) -> Self {
        self.overlay = Some(style);
        self
    }
    pub fn locate_known_epitopes(mut self, enabled: bool) -> Self {
        self.locate_known_epitopes = Some(enabled);
        self
    }

    pub fn build(self) -> Result<PredictionConfig, ConfigError> {
        let window = self.window.unwrap_or(DEFAULT_WINDOW);
        if window == 0 {
            return Err(ConfigError::InvalidWindow(window));
        }

        let threshold = self.threshold.unwrap_or(DEFAULT_THRESHOLD);
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        let overlay = self.overlay.unwrap_or_default();
        if overlay.width == 0 || overlay.height == 0 {
            return Err(ConfigError::InvalidViewerSize {
                width: overlay.width,
                height: overlay.height,
            });
        }

        Ok(PredictionConfig {
            scoring: ScoringConfig { window, threshold },
            overlay,
            locate_known_epitopes: self.locate_known_epitopes.unwrap_or(true),
        })
    }
}
