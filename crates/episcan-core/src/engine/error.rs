use super::config::ConfigError;
use crate::core::scoring::ScoringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Epitope scoring failed: {source}")]
    Scoring {
        #[from]
        source: ScoringError,
    },
}
