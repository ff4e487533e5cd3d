use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn the source file into a table.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("reading CSV {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV {} has no header row", .0.display())]
    MissingHeader(PathBuf),
}

/// Required columns absent after cleaning.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("missing required columns: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<String>,
}

/// Structural failure inside the feature pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("column '{column}' required by {step} is absent")]
    MissingColumn { step: &'static str, column: String },
}

/// Bad user input to one of the filters. Non-fatal.
#[derive(Error, Debug, Clone)]
pub enum FilterError {
    #[error("invalid title pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Blocking failure while preparing a session's table.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to load data from {}; check the file path and try again", .0.display())]
    EmptySource(PathBuf),

    #[error("data validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("feature derivation failed: {0}")]
    Feature(#[from] FeatureError),
}
