use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("no such file {0}")]
    NotFound(PathBuf),

    #[error("invalid stack file {path}: {reason}")]
    Format { path: PathBuf, reason: String },

    #[error("missing metadata key {0}")]
    MissingKey(String),

    #[error("invalid value {value:?} for metadata key {key}")]
    InvalidValue { key: String, value: String },

    #[error("epoch {0} not present in time series")]
    MissingEpoch(String),

    #[error("shape mismatch, expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}
