//! Ranked output of a scoring call.

use polars::prelude::{DataFrame, DataType, IdxCa, IdxSize};

use hofstede_model::{
    COUNTRY_CODE_COLUMN, COUNTRY_NAME_COLUMN, CountryRecord, Dimension, DimensionScores,
    DimensionVector, SIMILARITY_SCORE_COLUMN, ScoredCountry, TOTAL_LOSS_COLUMN,
};

use crate::engine::{ascending_order, dimension_values, required_column};
use crate::error::{Result, ScoreError};

/// Row order for reading a [`RankedTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankOrder {
    /// Lowest similarity first. The order [`crate::score`] produces.
    #[default]
    Ascending,
    /// Highest similarity first. Equal scores keep their original order.
    Descending,
}

/// Scored country table, sorted ascending by `similarity_score`.
///
/// The first row is the *worst* match. Callers that want the best match use
/// [`RankedTable::best_match`]; callers that want best-first rows ask for
/// [`RankOrder::Descending`] explicitly.
#[derive(Debug, Clone)]
pub struct RankedTable {
    frame: DataFrame,
}

impl RankedTable {
    pub(crate) fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// The ascending frame with loss and score columns appended.
    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    #[must_use]
    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frame.height()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Similarity scores in ascending row order.
    pub fn similarity_scores(&self) -> Result<Vec<f64>> {
        let scores = self.frame.column(SIMILARITY_SCORE_COLUMN)?.f64()?;
        Ok(scores.into_iter().map(Option::unwrap_or_default).collect())
    }

    /// Frame in the requested order.
    pub fn frame_in(&self, order: RankOrder) -> Result<DataFrame> {
        match order {
            RankOrder::Ascending => Ok(self.frame.clone()),
            RankOrder::Descending => {
                let idx = IdxCa::from_vec("order".into(), self.descending_positions()?);
                Ok(self.frame.take(&idx)?)
            }
        }
    }

    /// Typed rows in the requested order.
    pub fn rows_in(&self, order: RankOrder) -> Result<Vec<ScoredCountry>> {
        let reader = RowReader::new(&self.frame)?;
        let positions: Vec<usize> = match order {
            RankOrder::Ascending => (0..self.len()).collect(),
            RankOrder::Descending => self
                .descending_positions()?
                .into_iter()
                .map(|idx| idx as usize)
                .collect(),
        };
        Ok(positions.into_iter().map(|idx| reader.row(idx)).collect())
    }

    /// Typed rows in ascending order.
    pub fn rows(&self) -> Result<Vec<ScoredCountry>> {
        self.rows_in(RankOrder::Ascending)
    }

    /// Country with the highest similarity score.
    ///
    /// Among equal top scores, the one that came first in the original table
    /// wins.
    pub fn best_match(&self) -> Result<ScoredCountry> {
        let scores = self.similarity_scores()?;
        let mut best: Option<(usize, f64)> = None;
        for (idx, score) in scores.into_iter().enumerate() {
            // Ties keep input order in the ascending frame, so the first of
            // an equal run is the earliest original row.
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        let (idx, _) = best.ok_or(ScoreError::EmptyTable)?;
        Ok(RowReader::new(&self.frame)?.row(idx))
    }

    /// Country with the lowest similarity score.
    pub fn worst_match(&self) -> Result<ScoredCountry> {
        if self.is_empty() {
            return Err(ScoreError::EmptyTable);
        }
        Ok(RowReader::new(&self.frame)?.row(0))
    }

    fn descending_positions(&self) -> Result<Vec<IdxSize>> {
        let negated: Vec<f64> = self.similarity_scores()?.into_iter().map(|s| -s).collect();
        Ok(ascending_order(&negated))
    }
}

/// Column accessors for turning frame rows into [`ScoredCountry`] values.
struct RowReader {
    codes: Vec<String>,
    names: Vec<String>,
    values: Vec<Vec<f64>>,
    losses: Vec<Vec<f64>>,
    totals: Vec<f64>,
    scores: Vec<f64>,
}

impl RowReader {
    fn new(frame: &DataFrame) -> Result<Self> {
        Ok(Self {
            codes: string_column(frame, COUNTRY_CODE_COLUMN)?,
            names: string_column(frame, COUNTRY_NAME_COLUMN)?,
            values: Dimension::ALL
                .iter()
                .map(|d| dimension_values(frame, *d))
                .collect::<Result<_>>()?,
            losses: Dimension::ALL
                .iter()
                .map(|d| float_column(frame, d.loss_column()))
                .collect::<Result<_>>()?,
            totals: float_column(frame, TOTAL_LOSS_COLUMN)?,
            scores: float_column(frame, SIMILARITY_SCORE_COLUMN)?,
        })
    }

    fn row(&self, idx: usize) -> ScoredCountry {
        ScoredCountry {
            country: CountryRecord {
                country_code: self.codes[idx].clone(),
                country_name: self.names[idx].clone(),
                // Integral by construction of `dimension_values`.
                scores: DimensionScores::from_fn(|d| self.values[d.index()][idx] as i64),
            },
            losses: DimensionVector::new(Dimension::ALL.map(|d| self.losses[d.index()][idx])),
            total_loss: self.totals[idx],
            similarity_score: self.scores[idx],
        }
    }
}

/// String cells of a required column. Nulls are a data-integrity error.
pub(crate) fn string_column(frame: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = required_column(frame, name)?.cast(&DataType::String)?;
    column
        .str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_string).ok_or_else(|| ScoreError::NullValue {
                column: name.to_string(),
                row,
            })
        })
        .collect()
}

fn float_column(frame: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = required_column(frame, name)?.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}
