//! Similarity scoring over Hofstede country tables.
//!
//! The engine takes a country table (a Polars [`DataFrame`] with the six
//! dimension columns), a [`Preference`] and [`Weights`], and returns a
//! [`RankedTable`]: the same rows with per-dimension losses, `total_loss` and
//! `similarity_score` appended, sorted **ascending** by score.
//!
//! Scoring is a pure function of its inputs. Nothing is cached between calls
//! and the input frame is never modified.
//!
//! # Example
//!
//! ```ignore
//! use hofstede_model::{Preference, Weights};
//! use hofstede_score::{RankOrder, score};
//!
//! let ranked = score(table.frame(), &Preference::default(), &Weights::default())?;
//! let best = ranked.best_match()?;
//! let best_first = ranked.rows_in(RankOrder::Descending)?;
//! ```
//!
//! [`DataFrame`]: polars::prelude::DataFrame
//! [`Preference`]: hofstede_model::Preference
//! [`Weights`]: hofstede_model::Weights

mod engine;
mod error;
mod radar;
mod ranked;

pub use engine::{round_half_even, score, score_keyed, similarity_score};
pub use error::{ErrorKind, Result, ScoreError};
pub use radar::{
    COUNTRY_COLORS, ClosingSegment, PREFERENCE_COLOR, PREFERENCE_TRACE_NAME, RADIAL_RANGE,
    RadarChart, RadarTrace, TraceKind, compare,
};
pub use ranked::{RankOrder, RankedTable};
