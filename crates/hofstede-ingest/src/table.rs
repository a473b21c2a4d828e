//! Validated country table.
//!
//! Raw datasets name their identity columns `ctr` and `country` and mark
//! unavailable scores with `#NULL!`. [`CountryTable::from_raw`] renames the
//! identity columns, drops every row with an empty, sentinel or non-integer
//! dimension cell, and types the six dimension columns as `Int64`.

use polars::prelude::{
    Column, DataFrame, DataType, IntoColumn, NamedFrom, PlSmallStr, Series, StringChunked,
};

use hofstede_model::{
    COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, CountryRecord, Dimension, DimensionScores,
};

use crate::error::{IngestError, Result};

/// Sentinel the published dataset uses for unavailable values.
pub const NULL_SENTINEL: &str = "#NULL!";

/// Map a raw header onto its canonical column name.
///
/// Matching is case-insensitive and ignores surrounding whitespace and a
/// leading byte-order mark.
#[must_use]
pub fn canonical_column_name(raw: &str) -> String {
    let trimmed = raw.trim().trim_start_matches('\u{feff}').trim();
    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "ctr" | "code" | "country_code" => COUNTRY_CODE_COLUMN.to_string(),
        "country" | "name" | "country_name" => COUNTRY_NAME_COLUMN.to_string(),
        _ => match Dimension::from_key(&lower) {
            Some(dimension) => dimension.key().to_string(),
            None => trimmed.to_string(),
        },
    }
}

/// Parse one dimension cell. Returns `None` for empty, sentinel or
/// non-integer values.
#[must_use]
pub fn parse_dimension_value(raw: &str) -> Option<i64> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NULL_SENTINEL) {
        return None;
    }
    if let Ok(parsed) = value.parse::<i64>() {
        return Some(parsed);
    }
    // Integral floats such as "35.0" are accepted.
    let parsed = value.parse::<f64>().ok()?;
    if parsed.is_finite() && parsed.fract() == 0.0 {
        Some(parsed as i64)
    } else {
        None
    }
}

fn parse_identity(raw: Option<&str>) -> Option<&str> {
    let value = raw?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NULL_SENTINEL) {
        None
    } else {
        Some(value)
    }
}

/// Immutable table of countries with complete integer dimension values.
///
/// Columns: `country_code`, `country_name`, then the six dimension keys in
/// canonical order.
#[derive(Debug, Clone)]
pub struct CountryTable {
    frame: DataFrame,
    dropped_rows: usize,
}

impl CountryTable {
    /// Normalize and validate a raw dataset.
    ///
    /// `origin` names the dataset in error messages.
    pub fn from_raw(mut raw: DataFrame, origin: &str) -> Result<Self> {
        for name in raw.get_column_names_owned() {
            let canonical = canonical_column_name(name.as_str());
            if canonical != name.as_str() {
                raw.rename(name.as_str(), PlSmallStr::from(canonical.as_str()))?;
            }
        }

        let required: Vec<&str> = [COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN]
            .into_iter()
            .chain(Dimension::ALL.iter().map(|d| d.key()))
            .collect();
        let mut string_columns: Vec<StringChunked> = Vec::with_capacity(required.len());
        for column in &required {
            let col = raw
                .column(column)
                .map_err(|_| IngestError::MissingColumn {
                    column: (*column).to_string(),
                    origin: origin.to_string(),
                })?
                .cast(&DataType::String)?;
            string_columns.push(col.str()?.clone());
        }
        let (identity, dimensions) = string_columns.split_at(2);

        let mut codes = Vec::with_capacity(raw.height());
        let mut names = Vec::with_capacity(raw.height());
        let mut values: Vec<Vec<i64>> = vec![Vec::with_capacity(raw.height()); Dimension::COUNT];
        let mut dropped_rows = 0usize;

        for idx in 0..raw.height() {
            let code = parse_identity(identity[0].get(idx));
            let name = parse_identity(identity[1].get(idx));
            let parsed: Vec<Option<i64>> = dimensions
                .iter()
                .map(|ca| ca.get(idx).and_then(parse_dimension_value))
                .collect();

            let (Some(code), Some(name)) = (code, name) else {
                dropped_rows += 1;
                tracing::debug!(row = idx, "dropping row without country code or name");
                continue;
            };
            if parsed.iter().any(Option::is_none) {
                dropped_rows += 1;
                tracing::debug!(
                    row = idx,
                    country = name,
                    "dropping row with missing dimension values"
                );
                continue;
            }

            codes.push(code.to_string());
            names.push(name.to_string());
            for (slot, value) in values.iter_mut().zip(parsed.into_iter().flatten()) {
                slot.push(value);
            }
        }

        if codes.is_empty() {
            return Err(IngestError::EmptyDataset {
                origin: origin.to_string(),
                dropped: dropped_rows,
            });
        }
        if dropped_rows > 0 {
            tracing::info!(
                origin,
                dropped = dropped_rows,
                kept = codes.len(),
                "dropped incomplete country rows"
            );
        }

        let mut columns: Vec<Column> = Vec::with_capacity(required.len());
        columns.push(Series::new(COUNTRY_CODE_COLUMN.into(), codes).into_column());
        columns.push(Series::new(COUNTRY_NAME_COLUMN.into(), names).into_column());
        for (dimension, column_values) in Dimension::ALL.iter().zip(values) {
            columns.push(Series::new(dimension.key().into(), column_values).into_column());
        }

        Ok(Self {
            frame: DataFrame::new(columns)?,
            dropped_rows,
        })
    }

    /// The validated frame handed to scoring.
    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Consume the table, returning its frame.
    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Number of countries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Rows removed during validation.
    #[must_use]
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    /// Country names in table order.
    pub fn country_names(&self) -> Result<Vec<String>> {
        let names = self.frame.column(COUNTRY_NAME_COLUMN)?.str()?;
        Ok(names
            .into_iter()
            .map(|name| name.unwrap_or_default().to_string())
            .collect())
    }

    /// Typed rows in table order.
    pub fn records(&self) -> Result<Vec<CountryRecord>> {
        let codes = self.frame.column(COUNTRY_CODE_COLUMN)?.str()?;
        let names = self.frame.column(COUNTRY_NAME_COLUMN)?.str()?;
        let mut dimension_columns = Vec::with_capacity(Dimension::COUNT);
        for dimension in Dimension::ALL {
            dimension_columns.push(self.frame.column(dimension.key())?.i64()?);
        }

        let mut records = Vec::with_capacity(self.len());
        for idx in 0..self.len() {
            records.push(CountryRecord {
                country_code: codes.get(idx).unwrap_or_default().to_string(),
                country_name: names.get(idx).unwrap_or_default().to_string(),
                scores: DimensionScores::from_fn(|d| {
                    dimension_columns[d.index()].get(idx).unwrap_or_default()
                }),
            });
        }
        Ok(records)
    }
}
