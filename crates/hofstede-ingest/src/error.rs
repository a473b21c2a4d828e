//! Error types for dataset ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the country dataset.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("CSV file {path} is {size} bytes, larger than the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Network Errors ===
    /// Remote dataset could not be downloaded.
    #[error("failed to download {url}: {message}")]
    Http { url: String, message: String },

    /// Remote dataset exceeds the size limit.
    #[error("download from {url} is {size} bytes, larger than the {max_size} byte limit")]
    DownloadTooLarge {
        url: String,
        size: u64,
        max_size: u64,
    },

    // === CSV Parsing Errors ===
    /// Byte-order mark of an encoding other than UTF-8.
    #[error("unsupported encoding {encoding} in {origin} (only UTF-8 is supported)")]
    UnsupportedEncoding {
        origin: String,
        encoding: &'static str,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },

    // === Schema Errors ===
    /// Required column not found after header normalization.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: String, origin: String },

    /// No usable rows remain after filtering.
    #[error("dataset {origin} has no complete rows ({dropped} dropped)")]
    EmptyDataset { origin: String, dropped: usize },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
