// File: crates/story-core/src/error.rs
// Summary: Error type shared by loading, configuration and output.

use std::path::PathBuf;

use crate::sources::ChartId;

pub type StoryResult<T> = Result<T, StoryError>;

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("failed to read {path}: {source}")]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read csv {path}: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("{path}: column `{column}` not found")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}:{line}: `{value}` in column `{column}` is not a number")]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    #[error("no output target configured for chart `{0}`")]
    MissingTarget(ChartId),

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
