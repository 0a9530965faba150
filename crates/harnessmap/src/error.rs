use std::path::PathBuf;

/// Errors from the fallible edges of the crate: file IO, parsing and config.
///
/// Routing and migration themselves never fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid diagram JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("could not determine config directory")]
    ConfigDir,

    #[error("unknown config key: {key}. Valid keys: {valid}")]
    UnknownConfigKey { key: String, valid: String },

    #[error("invalid value for {key}: {value} ({reason})")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
