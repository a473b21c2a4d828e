//! Country dataset ingestion.
//!
//! This crate provides the dataset side of Hofstede matching: reading the
//! published dimension matrix from a local CSV file or a URL, dropping rows
//! with unavailable values, and producing an immutable [`CountryTable`] whose
//! six dimension columns are integer-typed with no nulls.
//!
//! # Example
//!
//! ```ignore
//! use hofstede_ingest::{DatasetSource, load_dataset};
//!
//! let source: DatasetSource = "data/hofstede.csv".parse()?;
//! let table = load_dataset(&source)?;
//! println!("{} countries", table.len());
//! ```

mod error;
mod reader;
mod source;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{
    MAX_CSV_FILE_SIZE, check_encoding, check_file_size, check_file_size_with_limit,
    read_csv_bytes, read_csv_file, validate_encoding,
};

// === Sources ===
pub use source::{DEFAULT_DATASET_URL, DatasetSource, load_dataset};

// === Country Table ===
pub use table::{CountryTable, NULL_SENTINEL, canonical_column_name, parse_dimension_value};
