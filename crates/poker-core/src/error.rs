use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the poker stats pipeline.
///
/// Only the grid acquisition boundary fails. Parsing and aggregation degrade
/// malformed cells to zero / skipped records instead of returning an error.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A grid export could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A Sheets-style JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A CSV export could not be decoded.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// A source format name is not one of the recognised formats.
    #[error("Unsupported source format: {0}")]
    UnsupportedSource(String),

    /// No input grid was given and none was remembered from a previous run.
    #[error("No input given; pass --input with a CSV or JSON export")]
    NoInput,

    /// No player matched the requested slug.
    #[error("No stats found for {0}")]
    PlayerNotFound(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the poker crates.
pub type Result<T> = std::result::Result<T, StatsError>;
