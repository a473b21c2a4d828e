//! Radar comparison of two countries against the user's preference.
//!
//! Produces plot-ready data only: one trace per country and one for the
//! preference, each over the six dimension labels, plus the segment that
//! closes the polygon from the last axis back to the first.

use polars::prelude::DataFrame;
use serde::Serialize;

use hofstede_model::{COUNTRY_NAME_COLUMN, Dimension, Preference};

use crate::error::{Result, ScoreError};
use crate::engine::dimension_values;
use crate::ranked::string_column;

/// Radial axis range shared by every trace.
pub const RADIAL_RANGE: [f64; 2] = [0.0, 100.0];

/// Trace colors for the two compared countries.
pub const COUNTRY_COLORS: [&str; 2] = ["blue", "red"];

/// Trace color for the preference.
pub const PREFERENCE_COLOR: &str = "rgb(192,192,192)";

/// Name of the preference trace.
pub const PREFERENCE_TRACE_NAME: &str = "You";

/// What a trace represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceKind {
    Country,
    Preference,
}

/// Line from the last axis back to the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosingSegment {
    pub theta: [&'static str; 2],
    pub r: [f64; 2],
}

/// One polygon on the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarTrace {
    pub name: String,
    pub kind: TraceKind,
    pub color: &'static str,
    /// Country polygons are filled; the preference is an outline.
    pub fill: bool,
    /// Dimension labels in canonical order.
    pub theta: Vec<&'static str>,
    /// Values in canonical order.
    pub r: Vec<f64>,
    pub closing: ClosingSegment,
}

impl RadarTrace {
    fn new(
        name: String,
        kind: TraceKind,
        color: &'static str,
        values: [f64; Dimension::COUNT],
    ) -> Self {
        let first = Dimension::ALL[0];
        let last = Dimension::ALL[Dimension::COUNT - 1];
        Self {
            name,
            kind,
            color,
            fill: kind == TraceKind::Country,
            theta: Dimension::ALL.iter().map(|d| d.label()).collect(),
            r: values.to_vec(),
            closing: ClosingSegment {
                theta: [last.label(), first.label()],
                r: [values[last.index()], values[first.index()]],
            },
        }
    }

    /// Value on one axis.
    #[must_use]
    pub fn value(&self, dimension: Dimension) -> f64 {
        self.r[dimension.index()]
    }
}

/// Data for a two-country radar comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub radial_range: [f64; 2],
    /// Two country traces followed by the preference trace.
    pub traces: Vec<RadarTrace>,
}

impl RadarChart {
    /// Traces for the compared countries.
    pub fn countries(&self) -> impl Iterator<Item = &RadarTrace> {
        self.traces.iter().filter(|t| t.kind == TraceKind::Country)
    }

    /// Trace for the preference.
    #[must_use]
    pub fn preference(&self) -> Option<&RadarTrace> {
        self.traces.iter().find(|t| t.kind == TraceKind::Preference)
    }
}

/// Build radar data for two countries and the preference.
///
/// Country names match `country_name` ignoring case and surrounding
/// whitespace. The same country may be given twice.
///
/// # Errors
///
/// [`ScoreError::CountryNotFound`] for a name not in `table`;
/// [`ScoreError::MissingColumn`] if the name or a dimension column is absent;
/// a data-integrity error for a null name or an unusable dimension cell.
pub fn compare(
    table: &DataFrame,
    countries: [&str; 2],
    preference: &Preference,
) -> Result<RadarChart> {
    let names = string_column(table, COUNTRY_NAME_COLUMN)?;
    let mut columns = Vec::with_capacity(Dimension::COUNT);
    for dimension in Dimension::ALL {
        columns.push(dimension_values(table, dimension)?);
    }

    let mut traces = Vec::with_capacity(3);
    for (requested, color) in countries.into_iter().zip(COUNTRY_COLORS) {
        let wanted = requested.trim();
        let idx = names
            .iter()
            .position(|name| name.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ScoreError::CountryNotFound {
                name: requested.to_string(),
            })?;
        let values = Dimension::ALL.map(|d| columns[d.index()][idx]);
        traces.push(RadarTrace::new(
            names[idx].clone(),
            TraceKind::Country,
            color,
            values,
        ));
    }
    traces.push(RadarTrace::new(
        PREFERENCE_TRACE_NAME.to_string(),
        TraceKind::Preference,
        PREFERENCE_COLOR,
        *preference.vector().values(),
    ));

    tracing::debug!(
        first = %traces[0].name,
        second = %traces[1].name,
        "built radar comparison"
    );
    Ok(RadarChart {
        radial_range: RADIAL_RANGE,
        traces,
    })
}
