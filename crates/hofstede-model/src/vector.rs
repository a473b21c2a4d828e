//! Per-dimension value vectors: preferences and weights.
//!
//! A [`DimensionVector`] always holds exactly one value per dimension, so the
//! "identical key set" invariant is carried by the type. Key/value input
//! (TOML tables, JSON objects, CLI pairs) goes through
//! [`DimensionVector::from_pairs`], which rejects missing, unknown and
//! duplicate keys.

use std::collections::BTreeMap;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::error::{DimensionError, Result};

/// One `f64` per dimension, stored in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, f64>",
    into = "BTreeMap<String, f64>"
)]
pub struct DimensionVector([f64; Dimension::COUNT]);

impl DimensionVector {
    /// Build from values in canonical order.
    #[must_use]
    pub const fn new(values: [f64; Dimension::COUNT]) -> Self {
        Self(values)
    }

    /// Same value for every dimension.
    #[must_use]
    pub const fn splat(value: f64) -> Self {
        Self([value; Dimension::COUNT])
    }

    /// Build from key/value pairs. Every dimension must appear exactly once.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut slots: [Option<f64>; Dimension::COUNT] = [None; Dimension::COUNT];
        for (key, value) in pairs {
            let key = key.as_ref();
            let dimension = Dimension::from_key(key).ok_or_else(|| DimensionError::UnknownKey {
                key: key.to_string(),
            })?;
            let slot = &mut slots[dimension.index()];
            if slot.is_some() {
                return Err(DimensionError::DuplicateKey {
                    key: dimension.key(),
                });
            }
            *slot = Some(value);
        }

        let mut values = [0.0; Dimension::COUNT];
        for dimension in Dimension::ALL {
            values[dimension.index()] =
                slots[dimension.index()].ok_or(DimensionError::MissingKey {
                    key: dimension.key(),
                })?;
        }
        Ok(Self(values))
    }

    /// Value for one dimension.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0[dimension.index()]
    }

    /// Copy with one dimension replaced.
    #[must_use]
    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        self.0[dimension.index()] = value;
        self
    }

    /// Values in canonical order.
    #[must_use]
    pub const fn values(&self) -> &[f64; Dimension::COUNT] {
        &self.0
    }

    /// `(dimension, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    /// Sum over all dimensions, in canonical order.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    fn check_finite(&self) -> Result<()> {
        for (dimension, value) in self.iter() {
            if !value.is_finite() {
                return Err(DimensionError::NonFinite { dimension, value });
            }
        }
        Ok(())
    }
}

impl Index<Dimension> for DimensionVector {
    type Output = f64;

    fn index(&self, dimension: Dimension) -> &Self::Output {
        &self.0[dimension.index()]
    }
}

impl TryFrom<BTreeMap<String, f64>> for DimensionVector {
    type Error = DimensionError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self> {
        Self::from_pairs(map)
    }
}

impl From<DimensionVector> for BTreeMap<String, f64> {
    fn from(vector: DimensionVector) -> Self {
        vector
            .iter()
            .map(|(dimension, value)| (dimension.key().to_string(), value))
            .collect()
    }
}

/// Default preferred values: low power distance, high individualism, low
/// masculinity, low uncertainty avoidance, long-term orientation, indulgence.
pub const DEFAULT_PREFERENCE: [f64; Dimension::COUNT] = [20.0, 100.0, 20.0, 20.0, 80.0, 80.0];

/// Default weight applied to every dimension.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Target value per dimension.
///
/// Values are intended to lie in `[0, 100]` but are not clamped; they must be
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionVector", into = "DimensionVector")]
pub struct Preference(DimensionVector);

impl Preference {
    /// Validate and wrap a vector of preferred values.
    pub fn new(values: DimensionVector) -> Result<Self> {
        values.check_finite()?;
        Ok(Self(values))
    }

    /// Copy with one dimension replaced.
    pub fn with(self, dimension: Dimension, value: f64) -> Result<Self> {
        Self::new(self.0.with(dimension, value))
    }

    #[must_use]
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension)
    }

    #[must_use]
    pub const fn vector(&self) -> &DimensionVector {
        &self.0
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self(DimensionVector::new(DEFAULT_PREFERENCE))
    }
}

impl TryFrom<DimensionVector> for Preference {
    type Error = DimensionError;

    fn try_from(values: DimensionVector) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Preference> for DimensionVector {
    fn from(preference: Preference) -> Self {
        preference.0
    }
}

/// Importance multiplier per dimension.
///
/// Weights are intended to lie in `[0.0, 1.0]` but are not clamped; they must
/// be finite and non-negative. A vector whose weights sum to zero is valid
/// here and rejected by scoring, which needs at least one positive weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DimensionVector", into = "DimensionVector")]
pub struct Weights(DimensionVector);

impl Weights {
    /// Validate and wrap a vector of weights.
    pub fn new(values: DimensionVector) -> Result<Self> {
        values.check_finite()?;
        for (dimension, value) in values.iter() {
            if value < 0.0 {
                return Err(DimensionError::NegativeWeight { dimension, value });
            }
        }
        Ok(Self(values))
    }

    /// Copy with one dimension replaced.
    pub fn with(self, dimension: Dimension, value: f64) -> Result<Self> {
        Self::new(self.0.with(dimension, value))
    }

    #[must_use]
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(dimension)
    }

    #[must_use]
    pub const fn vector(&self) -> &DimensionVector {
        &self.0
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.sum()
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self(DimensionVector::splat(DEFAULT_WEIGHT))
    }
}

impl TryFrom<DimensionVector> for Weights {
    type Error = DimensionError;

    fn try_from(values: DimensionVector) -> Result<Self> {
        Self::new(values)
    }
}

impl From<Weights> for DimensionVector {
    fn from(weights: Weights) -> Self {
        weights.0
    }
}
