//! Scoring profiles and settings resolution.
//!
//! A profile is a TOML file that can name a dataset and pin a full
//! preference or weight vector:
//!
//! ```toml
//! dataset = "data/hofstede.csv"
//!
//! [preference]
//! pdi = 20
//! idv = 100
//! mas = 20
//! uai = 20
//! ltowvs = 80
//! ivr = 80
//!
//! [weights]
//! pdi = 1.0
//! idv = 0.5
//! mas = 1.0
//! uai = 1.0
//! ltowvs = 1.0
//! ivr = 0.0
//! ```
//!
//! Precedence when resolving [`Settings`]: built-in defaults, then the
//! profile, then per-dimension command-line overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hofstede_ingest::DatasetSource;
use hofstede_model::{Dimension, DimensionError, Preference, Weights};

/// Errors raised while loading a profile or applying overrides.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Profile file could not be read.
    #[error("failed to read profile {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Profile is not valid TOML or has invalid contents.
    #[error("invalid profile {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A command-line override produced an invalid vector.
    #[error("invalid {vector} override: {source}")]
    Override {
        vector: &'static str,
        #[source]
        source: DimensionError,
    },
}

/// Contents of a profile file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Dataset path or URL. Relative paths resolve against the profile's
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,

    /// Complete preference vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,

    /// Complete weight vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Weights>,

    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Profile {
    /// Parse a profile from TOML text.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut profile = Self::from_toml_str(&content, path)?;
        profile.base_dir = path.parent().map(Path::to_path_buf);
        tracing::debug!(path = %path.display(), "loaded profile");
        Ok(profile)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Dataset source named by the profile, if any.
    #[must_use]
    pub fn dataset_source(&self) -> Option<DatasetSource> {
        let raw = self.dataset.as_deref()?;
        let source: DatasetSource = match raw.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        };
        Some(match (source, &self.base_dir) {
            (DatasetSource::File(path), Some(base)) if path.is_relative() => {
                DatasetSource::File(base.join(path))
            }
            (source, _) => source,
        })
    }
}

/// Per-dimension values given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub dataset: Option<DatasetSource>,
    pub preference: Vec<(Dimension, f64)>,
    pub weights: Vec<(Dimension, f64)>,
}

/// Fully resolved inputs for one command.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub source: DatasetSource,
    pub preference: Preference,
    pub weights: Weights,
}

impl Settings {
    /// Layer defaults, an optional profile and overrides.
    pub fn resolve(profile: Option<&Profile>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let source = overrides
            .dataset
            .clone()
            .or_else(|| profile.and_then(Profile::dataset_source))
            .unwrap_or_default();

        let mut preference = profile
            .and_then(|p| p.preference)
            .unwrap_or_default();
        for (dimension, value) in &overrides.preference {
            preference = preference
                .with(*dimension, *value)
                .map_err(|source| ConfigError::Override {
                    vector: "preference",
                    source,
                })?;
        }

        let mut weights = profile.and_then(|p| p.weights).unwrap_or_default();
        for (dimension, value) in &overrides.weights {
            weights = weights
                .with(*dimension, *value)
                .map_err(|source| ConfigError::Override {
                    vector: "weight",
                    source,
                })?;
        }

        Ok(Self {
            source,
            preference,
            weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_dataset_resolves_against_profile_dir() {
        let mut profile = Profile {
            dataset: Some("data/hofstede.csv".to_string()),
            ..Profile::default()
        };
        profile.base_dir = Some(PathBuf::from("/home/user/profiles"));
        assert_eq!(
            profile.dataset_source(),
            Some(DatasetSource::File(PathBuf::from(
                "/home/user/profiles/data/hofstede.csv"
            )))
        );
    }

    #[test]
    fn test_url_dataset_untouched() {
        let mut profile = Profile {
            dataset: Some("https://example.org/h.csv".to_string()),
            ..Profile::default()
        };
        profile.base_dir = Some(PathBuf::from("/tmp"));
        assert_eq!(
            profile.dataset_source(),
            Some(DatasetSource::Url("https://example.org/h.csv".to_string()))
        );
    }
}
