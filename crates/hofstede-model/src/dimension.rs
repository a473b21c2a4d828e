//! The six Hofstede cultural dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DimensionError;

/// One of the six cultural-value axes, each scored 0-100 per country.
///
/// The declaration order is the canonical dimension order used everywhere:
/// vector storage, loss column order, summation order and chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Power Distance Index.
    Pdi,
    /// Individualism v. Collectivism.
    Idv,
    /// Masculinity v. Femininity.
    Mas,
    /// Uncertainty Avoidance Index.
    Uai,
    /// Long- v. Short-Term Orientation.
    Ltowvs,
    /// Indulgence v. Restraint.
    Ivr,
}

impl Dimension {
    /// Number of dimensions.
    pub const COUNT: usize = 6;

    /// All dimensions in canonical order.
    pub const ALL: [Dimension; Self::COUNT] = [
        Self::Pdi,
        Self::Idv,
        Self::Mas,
        Self::Uai,
        Self::Ltowvs,
        Self::Ivr,
    ];

    /// Column key in the country table (`pdi`, `idv`, ...).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Pdi => "pdi",
            Self::Idv => "idv",
            Self::Mas => "mas",
            Self::Uai => "uai",
            Self::Ltowvs => "ltowvs",
            Self::Ivr => "ivr",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pdi => "Power Distance Index",
            Self::Idv => "Individualism v. Collectivism",
            Self::Mas => "Masculinity v. Femininity",
            Self::Uai => "Uncertainty Avoidance Index",
            Self::Ltowvs => "Long- v. Short-Term Orientation",
            Self::Ivr => "Indulgence v. Restraint",
        }
    }

    /// Name of the per-dimension loss column appended by scoring.
    #[must_use]
    pub const fn loss_column(self) -> &'static str {
        match self {
            Self::Pdi => "pdi_loss",
            Self::Idv => "idv_loss",
            Self::Mas => "mas_loss",
            Self::Uai => "uai_loss",
            Self::Ltowvs => "ltowvs_loss",
            Self::Ivr => "ivr_loss",
        }
    }

    /// Position in [`Dimension::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a dimension by key, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| DimensionError::UnknownKey { key: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let keys: Vec<_> = Dimension::ALL.iter().map(|d| d.key()).collect();
        assert_eq!(keys, vec!["pdi", "idv", "mas", "uai", "ltowvs", "ivr"]);
        for (idx, dimension) in Dimension::ALL.iter().enumerate() {
            assert_eq!(dimension.index(), idx);
        }
    }

    #[test]
    fn test_loss_column_names() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.loss_column(), format!("{}_loss", dimension.key()));
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("PDI".parse::<Dimension>().unwrap(), Dimension::Pdi);
        assert_eq!(" ltowvs ".parse::<Dimension>().unwrap(), Dimension::Ltowvs);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "gdp".parse::<Dimension>().unwrap_err();
        assert!(matches!(err, DimensionError::UnknownKey { ref key } if key == "gdp"));
    }
}
