use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("results file path must not be empty or whitespace")]
    InvalidPath,

    #[error("results file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read results file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("results file is not valid JSON: {path}")]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("results file has no `rows` array: {0}")]
    MissingRows(PathBuf),

    #[error("parse cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}
