//! Data model for Hofstede cultural-dimension matching.
//!
//! # Module Organization
//!
//! - [`dimension`]: The six dimensions, their keys, labels and loss columns
//! - [`vector`]: Per-dimension vectors, [`Preference`] and [`Weights`]
//! - [`record`]: Country records and scored country records
//! - [`error`]: Errors raised while building vectors

pub mod dimension;
pub mod error;
pub mod record;
pub mod vector;

pub use dimension::Dimension;
pub use error::{DimensionError, Result};
pub use record::{CountryRecord, DimensionScores, ScoredCountry};
pub use vector::{DEFAULT_PREFERENCE, DEFAULT_WEIGHT, DimensionVector, Preference, Weights};

/// Column holding the country code (raw header `ctr`).
pub const COUNTRY_CODE_COLUMN: &str = "country_code";

/// Column holding the country name (raw header `country`).
pub const COUNTRY_NAME_COLUMN: &str = "country_name";

/// Sum of the per-dimension loss columns.
pub const TOTAL_LOSS_COLUMN: &str = "total_loss";

/// Normalized similarity, 100 = perfect match.
pub const SIMILARITY_SCORE_COLUMN: &str = "similarity_score";
