//! Country records and their scored form.

use serde::{Deserialize, Serialize};

use crate::dimension::Dimension;
use crate::vector::DimensionVector;

/// Integer dimension values of one country, conventionally in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DimensionScores {
    pub pdi: i64,
    pub idv: i64,
    pub mas: i64,
    pub uai: i64,
    pub ltowvs: i64,
    pub ivr: i64,
}

impl DimensionScores {
    /// Build by evaluating `f` for each dimension.
    pub fn from_fn(mut f: impl FnMut(Dimension) -> i64) -> Self {
        Self {
            pdi: f(Dimension::Pdi),
            idv: f(Dimension::Idv),
            mas: f(Dimension::Mas),
            uai: f(Dimension::Uai),
            ltowvs: f(Dimension::Ltowvs),
            ivr: f(Dimension::Ivr),
        }
    }

    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> i64 {
        match dimension {
            Dimension::Pdi => self.pdi,
            Dimension::Idv => self.idv,
            Dimension::Mas => self.mas,
            Dimension::Uai => self.uai,
            Dimension::Ltowvs => self.ltowvs,
            Dimension::Ivr => self.ivr,
        }
    }

    /// Values as floats in canonical order.
    #[must_use]
    pub fn to_vector(&self) -> DimensionVector {
        DimensionVector::new(Dimension::ALL.map(|d| self.get(d) as f64))
    }
}

/// One row of the country table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country_code: String,
    pub country_name: String,
    #[serde(flatten)]
    pub scores: DimensionScores,
}

/// A country record with the results of one scoring call attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCountry {
    #[serde(flatten)]
    pub country: CountryRecord,
    /// Weighted absolute deviation per dimension.
    pub losses: DimensionVector,
    pub total_loss: f64,
    pub similarity_score: f64,
}

impl ScoredCountry {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.country.country_name
    }

    #[must_use]
    pub fn loss(&self, dimension: Dimension) -> f64 {
        self.losses.get(dimension)
    }
}
