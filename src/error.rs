use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("could not parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl StorageError {
    pub fn io(path: &std::path::Path, err: impl ToString) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub fn parse(path: &std::path::Path, err: impl ToString) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("project #{index} has an empty title")]
    EmptyTitle { index: usize },

    #[error("could not read catalog: {0}")]
    Read(String),

    #[error("catalog is not valid JSON: {0}")]
    Json(String),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContactError {
    #[error("missing API key: set {0}")]
    MissingApiKey(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("relay rejected the message with status {0}")]
    Rejected(u16),

    #[error("relay worker disconnected")]
    Disconnected,
}

impl From<reqwest::Error> for ContactError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
