//! Weighted absolute-difference similarity scoring.
//!
//! For a country `c`, dimension `d`, preference `p` and weights `w`:
//!
//! ```text
//! loss(c, d)      = |p[d] - c[d]| * w[d]
//! total_loss(c)   = sum over d of loss(c, d)
//! similarity(c)   = round(((100 * sum(w)) - total_loss(c)) / sum(w), 1)
//! ```
//!
//! `100 * sum(w)` is the total loss of a country that differs by the full
//! 0-100 range on every dimension, so the score lands on a 0-100 axis where
//! 100 is a perfect match. Scores below zero are possible and kept.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, DataType, IdxCa, IdxSize, NamedFrom, Series};
use tracing::debug_span;

use hofstede_model::{
    Dimension, DimensionVector, Preference, SIMILARITY_SCORE_COLUMN, TOTAL_LOSS_COLUMN, Weights,
};

use crate::error::{Result, ScoreError};
use crate::ranked::RankedTable;

/// Round to `decimals` places, resolving halves to the even neighbour.
#[must_use]
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Similarity for a total loss under weights summing to `weight_total`.
///
/// `weight_total` must be positive; [`score`] guarantees this.
#[must_use]
pub fn similarity_score(total_loss: f64, weight_total: f64) -> f64 {
    // Adding zero turns a rounded -0.0 into 0.0.
    round_half_even(((100.0 * weight_total) - total_loss) / weight_total, 1) + 0.0
}

/// Score every country and rank the table.
///
/// Returns the input rows with `<dim>_loss` for each dimension, `total_loss`
/// and `similarity_score` appended, sorted **ascending** by
/// `similarity_score` (worst match first). Rows with equal scores keep their
/// input order. Use [`RankedTable::best_match`] or
/// [`RankedTable::rows_in`] with [`crate::RankOrder::Descending`] for
/// best-first access.
///
/// # Errors
///
/// - [`ScoreError::MissingColumn`] if a dimension column is absent
/// - [`ScoreError::ZeroWeightSum`] if no weight is positive
/// - [`ScoreError::EmptyTable`], [`ScoreError::NonNumeric`],
///   [`ScoreError::NullValue`], [`ScoreError::NonFiniteValue`] or
///   [`ScoreError::NonIntegralValue`] for tables
///   the dataset provider should not have produced
pub fn score(table: &DataFrame, preference: &Preference, weights: &Weights) -> Result<RankedTable> {
    let span = debug_span!("score", rows = table.height());
    let _guard = span.enter();

    let mut columns = Vec::with_capacity(Dimension::COUNT);
    for dimension in Dimension::ALL {
        columns.push(required_column(table, dimension.key())?);
    }

    let weight_total = weights.total();
    if weight_total <= 0.0 {
        return Err(ScoreError::ZeroWeightSum);
    }
    if table.height() == 0 {
        return Err(ScoreError::EmptyTable);
    }

    let mut dimension_values = Vec::with_capacity(Dimension::COUNT);
    for (dimension, column) in Dimension::ALL.iter().zip(columns) {
        dimension_values.push(read_dimension(*dimension, column)?);
    }

    let height = table.height();
    let mut losses: Vec<Vec<f64>> = Vec::with_capacity(Dimension::COUNT);
    let mut totals = vec![0.0; height];
    for (dimension, values) in Dimension::ALL.iter().zip(&dimension_values) {
        let target = preference.get(*dimension);
        let weight = weights.get(*dimension);
        let column_losses: Vec<f64> = values.iter().map(|v| (target - v).abs() * weight).collect();
        for (total, loss) in totals.iter_mut().zip(&column_losses) {
            *total += loss;
        }
        losses.push(column_losses);
    }
    let scores: Vec<f64> = totals
        .iter()
        .map(|total| similarity_score(*total, weight_total))
        .collect();

    let mut scored = table.clone();
    for (dimension, column_losses) in Dimension::ALL.iter().zip(losses) {
        scored.with_column(Series::new(dimension.loss_column().into(), column_losses))?;
    }
    scored.with_column(Series::new(TOTAL_LOSS_COLUMN.into(), totals))?;
    scored.with_column(Series::new(SIMILARITY_SCORE_COLUMN.into(), scores.clone()))?;

    let order = IdxCa::from_vec("order".into(), ascending_order(&scores));
    let ranked = scored.take(&order)?;
    tracing::debug!(weight_total, "scored countries");
    Ok(RankedTable::new(ranked))
}

/// [`score`] with preference and weights given as key/value maps.
///
/// Maps must name each of the six dimensions exactly once.
pub fn score_keyed(
    table: &DataFrame,
    preference: &BTreeMap<String, f64>,
    weights: &BTreeMap<String, f64>,
) -> Result<RankedTable> {
    let preference = DimensionVector::from_pairs(preference.iter().map(|(k, v)| (k, *v)))
        .and_then(Preference::new)
        .map_err(|source| ScoreError::InvalidVector {
            vector: "preference",
            source,
        })?;
    let weights = DimensionVector::from_pairs(weights.iter().map(|(k, v)| (k, *v)))
        .and_then(Weights::new)
        .map_err(|source| ScoreError::InvalidVector {
            vector: "weights",
            source,
        })?;
    score(table, &preference, &weights)
}

/// Stable ascending permutation of `scores`.
pub(crate) fn ascending_order(scores: &[f64]) -> Vec<IdxSize> {
    let mut order: Vec<IdxSize> = (0..scores.len() as IdxSize).collect();
    order.sort_by(|&a, &b| scores[a as usize].total_cmp(&scores[b as usize]));
    order
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

pub(crate) fn required_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column> {
    frame.column(name).map_err(|_| ScoreError::MissingColumn {
        column: name.to_string(),
    })
}

/// Values of one dimension column, checked the same way [`score`] checks
/// them: numeric, no nulls, finite and integral.
pub(crate) fn dimension_values(frame: &DataFrame, dimension: Dimension) -> Result<Vec<f64>> {
    read_dimension(dimension, required_column(frame, dimension.key())?)
}

fn read_dimension(dimension: Dimension, column: &Column) -> Result<Vec<f64>> {
    let name = dimension.key();
    if matches!(column.dtype(), DataType::Null) {
        return Err(ScoreError::NullValue {
            column: name.to_string(),
            row: 0,
        });
    }
    if !is_numeric(column.dtype()) {
        return Err(ScoreError::NonNumeric {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }

    let as_float = column.cast(&DataType::Float64)?;
    let ca = as_float.f64()?;
    let mut values = Vec::with_capacity(ca.len());
    for (row, value) in ca.into_iter().enumerate() {
        match value {
            Some(v) if v.is_finite() && v.fract() == 0.0 => values.push(v),
            Some(v) if v.is_finite() => {
                return Err(ScoreError::NonIntegralValue {
                    column: name.to_string(),
                    row,
                    value: v,
                });
            }
            Some(_) => {
                return Err(ScoreError::NonFiniteValue {
                    column: name.to_string(),
                    row,
                });
            }
            None => {
                return Err(ScoreError::NullValue {
                    column: name.to_string(),
                    row,
                });
            }
        }
    }
    Ok(values)
}
