//! Error types for similarity scoring.

use std::fmt;

use hofstede_model::DimensionError;
use thiserror::Error;

/// Broad category of a [`ScoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing column or missing/unknown vector key.
    Schema,
    /// Null, NaN or non-numeric dimension value; empty table.
    DataIntegrity,
    /// Caller-supplied weights or preferences cannot be scored.
    Configuration,
    /// A requested country is not in the table.
    NotFound,
    /// Underlying DataFrame failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Schema => "schema error",
            Self::DataIntegrity => "data integrity error",
            Self::Configuration => "configuration error",
            Self::NotFound => "not found",
            Self::Internal => "internal error",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while scoring or comparing countries.
#[derive(Debug, Error)]
pub enum ScoreError {
    // === Schema Errors ===
    /// Table lacks a required column.
    #[error("table is missing required column '{column}'")]
    MissingColumn { column: String },

    /// Preference or weight input could not be turned into a vector.
    #[error("invalid {vector}: {source}")]
    InvalidVector {
        vector: &'static str,
        #[source]
        source: DimensionError,
    },

    // === Data Integrity Errors ===
    /// A dimension cell is null.
    #[error("column '{column}' has a null value at row {row}")]
    NullValue { column: String, row: usize },

    /// A dimension cell is NaN or infinite.
    #[error("column '{column}' has a non-finite value at row {row}")]
    NonFiniteValue { column: String, row: usize },

    /// A dimension cell has a fractional part.
    #[error("column '{column}' has a non-integer value {value} at row {row}")]
    NonIntegralValue { column: String, row: usize, value: f64 },

    /// A dimension column is not numeric.
    #[error("column '{column}' is not numeric (found {dtype})")]
    NonNumeric { column: String, dtype: String },

    /// Nothing to score.
    #[error("table has no rows to score")]
    EmptyTable,

    // === Configuration Errors ===
    /// All weights are zero.
    #[error("at least one dimension must carry positive weight")]
    ZeroWeightSum,

    // === Lookup Errors ===
    /// Country name not present in the table.
    #[error("country '{name}' not found in table")]
    CountryNotFound { name: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl ScoreError {
    /// Category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingColumn { .. } => ErrorKind::Schema,
            Self::InvalidVector { source, .. } => {
                if source.is_schema() {
                    ErrorKind::Schema
                } else {
                    ErrorKind::Configuration
                }
            }
            Self::NullValue { .. }
            | Self::NonFiniteValue { .. }
            | Self::NonIntegralValue { .. }
            | Self::NonNumeric { .. }
            | Self::EmptyTable => ErrorKind::DataIntegrity,
            Self::ZeroWeightSum => ErrorKind::Configuration,
            Self::CountryNotFound { .. } => ErrorKind::NotFound,
            Self::DataFrame { .. } => ErrorKind::Internal,
        }
    }
}

impl From<polars::prelude::PolarsError> for ScoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for scoring operations.
pub type Result<T> = std::result::Result<T, ScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_vector_errors() {
        let schema = ScoreError::InvalidVector {
            vector: "weights",
            source: DimensionError::MissingKey { key: "pdi" },
        };
        assert_eq!(schema.kind(), ErrorKind::Schema);
        assert_eq!(schema.to_string(), "invalid weights: missing value for dimension 'pdi'");

        let config = ScoreError::InvalidVector {
            vector: "weights",
            source: DimensionError::NegativeWeight {
                dimension: hofstede_model::Dimension::Pdi,
                value: -1.0,
            },
        };
        assert_eq!(config.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::DataIntegrity.to_string(), "data integrity error");
        assert_eq!(ScoreError::ZeroWeightSum.kind(), ErrorKind::Configuration);
    }
}
