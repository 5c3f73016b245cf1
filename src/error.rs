//! Error types for loading, labeling and persisting GNSS observations.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Failed to read input {path}: {source}")]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid input: row {row}, column '{column}' is not numeric: {value:?}")]
    NonNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Invalid input: no observation rows")]
    EmptyInput,

    #[error("Invalid input: malformed CSV: {0}")]
    MalformedCsv(#[from] csv::Error),

    #[error("Invalid input: row {row} has unknown label {value:?}")]
    UnknownLabel { row: usize, value: String },

    #[error("Failed to write output {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LabelError {
    /// True for every failure raised before labeling starts.
    pub fn is_input_error(&self) -> bool {
        !self.is_output_error()
    }

    pub fn is_output_error(&self) -> bool {
        matches!(self, LabelError::Output { .. })
    }

    pub(crate) fn output(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        LabelError::Output {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;
