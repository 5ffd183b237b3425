use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading and cleaning the source table.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("data source {path:?} is unavailable")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data source")]
    Csv(#[from] csv::Error),
    #[error("row {row}: expected {expected} attributes, found {found}")]
    SchemaMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row}: invalid value {value:?} for attribute '{column}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Failures while fitting a model or predicting with it.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("training split needs at least 2 distinct classes, found {found}")]
    InsufficientClassDiversity { found: usize },
    #[error("expected {expected} feature values, found {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("{model} failed: {message}")]
    Model { model: &'static str, message: String },
}

impl DataError {
    /// `true` for errors caused by the source being absent or unreadable
    /// rather than by its contents.
    pub fn is_unavailable(&self) -> bool {
        match self {
            DataError::DataUnavailable { .. } => true,
            DataError::Csv(e) => e.is_io_error(),
            _ => false,
        }
    }
}
