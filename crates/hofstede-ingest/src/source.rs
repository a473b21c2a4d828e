//! Dataset locations and the load entry point.

use std::convert::Infallible;
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::info_span;

use crate::error::{IngestError, Result};
use crate::reader::{MAX_CSV_FILE_SIZE, read_csv_bytes, read_csv_file};
use crate::table::CountryTable;

/// Published Hofstede dimension data matrix, exported as CSV.
pub const DEFAULT_DATASET_URL: &str = "https://docs.google.com/spreadsheet/ccc?key=16xeWRWQgh-7NGsaTOz4EnZkH9662Gy9T51K5lOBvW2E&output=csv";

/// Where the country dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Local CSV file.
    File(PathBuf),
    /// CSV served over HTTP(S).
    Url(String),
}

impl Default for DatasetSource {
    fn default() -> Self {
        Self::Url(DEFAULT_DATASET_URL.to_string())
    }
}

impl FromStr for DatasetSource {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(trimmed.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Load and validate the country table.
///
/// Call once at startup and hand the resulting table to scoring; calling it
/// again re-reads the source.
pub fn load_dataset(source: &DatasetSource) -> Result<CountryTable> {
    let origin = source.to_string();
    let span = info_span!("load_dataset", source = %origin);
    let _guard = span.enter();

    let raw = match source {
        DatasetSource::File(path) => read_csv_file(path)?,
        DatasetSource::Url(url) => read_csv_bytes(download(url)?, url)?,
    };
    let table = CountryTable::from_raw(raw, &origin)?;
    tracing::info!(countries = table.len(), "loaded dataset");
    Ok(table)
}

fn download(url: &str) -> Result<Vec<u8>> {
    let http_error = |e: reqwest::Error| IngestError::Http {
        url: url.to_string(),
        message: e.to_string(),
    };

    let response = reqwest::blocking::get(url)
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(http_error)?;

    let mut bytes = Vec::new();
    response
        .take(MAX_CSV_FILE_SIZE + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| IngestError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let size = bytes.len() as u64;
    if size > MAX_CSV_FILE_SIZE {
        return Err(IngestError::DownloadTooLarge {
            url: url.to_string(),
            size,
            max_size: MAX_CSV_FILE_SIZE,
        });
    }
    tracing::debug!(url, bytes = size, "downloaded dataset");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_str() {
        assert_eq!(
            "https://example.org/data.csv".parse::<DatasetSource>().unwrap(),
            DatasetSource::Url("https://example.org/data.csv".to_string())
        );
        assert_eq!(
            "data/hofstede.csv".parse::<DatasetSource>().unwrap(),
            DatasetSource::File(PathBuf::from("data/hofstede.csv"))
        );
    }

    #[test]
    fn test_default_source_is_published_matrix() {
        assert_eq!(
            DatasetSource::default().to_string(),
            DEFAULT_DATASET_URL
        );
    }
}
