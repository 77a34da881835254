pub mod app_config;
mod config;
pub mod json_scan;
pub mod products;
pub mod retailers;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{Product, PriceBand, PriceBands};
pub use retailers::{load_retailers, RetailerConfig, RetailerRegistry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read retailers file {path}: {source}")]
    RetailersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse retailers file {path}: {source}")]
    RetailersFileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid retailers config: {0}")]
    RetailersValidation(String),
}
