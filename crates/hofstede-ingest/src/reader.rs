//! Raw CSV reading into string-typed DataFrames.
//!
//! Every column is read as `String` so that sentinel cells such as `#NULL!`
//! survive parsing and can be filtered row by row afterwards.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};

/// Maximum dataset size (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reject UTF-16 byte-order marks. A UTF-8 BOM is accepted.
pub fn check_encoding(prefix: &[u8], origin: &str) -> Result<()> {
    if prefix.len() >= 2 {
        if prefix[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                origin: origin.to_string(),
                encoding: "UTF-16 LE",
            });
        }
        if prefix[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                origin: origin.to_string(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Detect encoding of a file from its first bytes.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    check_encoding(&buffer[..bytes_read], &path.display().to_string())
}

fn read_options() -> CsvReadOptions {
    // Schema inference over zero rows reads every column as String.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Read a CSV file with a single header row.
pub fn read_csv_file(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;
    validate_encoding(path)?;

    let origin = path.display().to_string();
    let df = read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            origin: origin.clone(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin,
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read CSV file"
    );
    Ok(df)
}

/// Read CSV content already held in memory (e.g. a download).
pub fn read_csv_bytes(bytes: Vec<u8>, origin: &str) -> Result<DataFrame> {
    check_encoding(&bytes[..bytes.len().min(4)], origin)?;

    let df = read_options()
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        origin,
        rows = df.height(),
        columns = df.width(),
        "read CSV content"
    );
    Ok(df)
}
