pub mod app_config;
pub mod config;
pub mod selectors;
pub mod snapshot;

use thiserror::Error;

pub use app_config::{AppConfig, Viewport};
pub use config::{load_app_config, load_app_config_from_env};
pub use selectors::{load_selectors, FieldSelectors, RegionSelectors, SelectorMap};
pub use snapshot::{ExtractedField, ProductSnapshot, ScrapeRequest};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid scrape request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read selectors file {path}: {source}")]
    SelectorsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse selectors file: {0}")]
    SelectorsFileParse(#[from] serde_yaml::Error),

    #[error("selector validation failed: {0}")]
    Validation(String),
}
