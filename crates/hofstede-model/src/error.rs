//! Error types for dimension vectors.

use thiserror::Error;

use crate::dimension::Dimension;

/// Errors raised while building preference or weight vectors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    // === Schema Errors ===
    /// A required dimension key is absent.
    #[error("missing value for dimension '{key}'")]
    MissingKey { key: &'static str },

    /// A key that is not one of the six dimensions.
    #[error("unknown dimension '{key}' (expected one of pdi, idv, mas, uai, ltowvs, ivr)")]
    UnknownKey { key: String },

    /// The same dimension was given twice.
    #[error("dimension '{key}' given more than once")]
    DuplicateKey { key: &'static str },

    // === Value Errors ===
    /// NaN or infinite value.
    #[error("value for dimension '{dimension}' must be a finite number, got {value}")]
    NonFinite { dimension: Dimension, value: f64 },

    /// Weights must be non-negative.
    #[error("weight for dimension '{dimension}' must be non-negative, got {value}")]
    NegativeWeight { dimension: Dimension, value: f64 },
}

impl DimensionError {
    /// Whether the error concerns the set of keys rather than their values.
    #[must_use]
    pub fn is_schema(&self) -> bool {
        matches!(
            self,
            Self::MissingKey { .. } | Self::UnknownKey { .. } | Self::DuplicateKey { .. }
        )
    }
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, DimensionError>;
