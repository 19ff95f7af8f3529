pub mod app_config;
pub mod config;
pub mod fields;
pub mod menu;
pub mod wine;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use fields::{load_header_aliases, FieldKind, HeaderAliases, WineField};
pub use menu::{Category, GroupedWineData, LoadStatus};
pub use wine::{ProductKey, Vintage, WineRecord, NON_VINTAGE_LITERAL};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read header aliases file {path}: {source}")]
    AliasesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse header aliases file: {0}")]
    AliasesFileParse(#[source] serde_yaml::Error),

    #[error("header aliases validation error: {0}")]
    Validation(String),
}
