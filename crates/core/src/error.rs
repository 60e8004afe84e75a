//! Error types for ingestion, configuration, and classification.

use thiserror::Error;

/// Errors surfaced by the sentiment signal library crates.
///
/// Recoverable scoring conditions (undersized batches, missing confidences,
/// malformed timestamps) are not errors; they resolve to ordinary signal
/// results. These variants cover caller bugs and collaborator failures.
#[derive(Error, Debug)]
pub enum SignalError {
    /// A required column is absent from the input table.
    #[error("Column '{0}' not found in input data")]
    MissingColumn(String),

    /// A row has no value in a required column.
    #[error("Row {row} has no value for required column '{column}'")]
    MissingValue { column: String, row: usize },

    /// A sentiment label outside positive/negative/neutral.
    #[error("Row {row}: unknown sentiment label '{value}'")]
    InvalidLabel { value: String, row: usize },

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The external sentiment classifier failed.
    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

