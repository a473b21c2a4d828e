use std::io::{self, Write};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info, info_span};

use hofstede_cli::config::{Profile, Settings};
use hofstede_ingest::{CountryTable, load_dataset};
use hofstede_model::ScoredCountry;
use hofstede_score::{RankOrder, RankedTable, compare, score};

use crate::cli::{
    ChartFormatArg, CompareArgs, InputArgs, OrderArg, OutputFormatArg, PreferenceArgs, RankArgs,
    overrides,
};
use crate::summary::{best_match_line, comparison_table, dimensions_table, ranking_table};

pub fn run_dimensions() -> Result<()> {
    println!("{}", dimensions_table());
    Ok(())
}

pub fn run_rank(args: &RankArgs) -> Result<()> {
    let settings = resolve_settings(&args.input, &args.preference)?;
    let table = load_table(&settings)?;
    let ranked = score_table(&table, &settings)?;

    let order = rank_order(args.order);
    let best = ranked.best_match().context("select best match")?;

    let _render = info_span!("render", format = ?args.format, order = ?order).entered();
    match args.format {
        OutputFormatArg::Table => {
            let rows = top_rows(ranked.rows_in(order)?, order, args.top);
            println!("{}", ranking_table(&rows, args.color_by));
            println!("{}", best_match_line(&best));
        }
        OutputFormatArg::Json => {
            let rows = top_rows(ranked.rows_in(order)?, order, args.top);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &rows).context("write json")?;
            writeln!(stdout)?;
            eprintln!("{}", best_match_line(&best));
        }
        OutputFormatArg::Csv => {
            let mut frame = top_frame(ranked.frame_in(order)?, order, args.top);
            CsvWriter::new(&mut io::stdout().lock())
                .include_header(true)
                .finish(&mut frame)
                .context("write csv")?;
            eprintln!("{}", best_match_line(&best));
        }
    }
    Ok(())
}

pub fn run_compare(args: &CompareArgs) -> Result<()> {
    let settings = resolve_settings(&args.input, &args.preference)?;
    let table = load_table(&settings)?;

    let (first, second) = match (&args.country, &args.with) {
        (Some(first), Some(second)) => (first.clone(), second.clone()),
        (first, second) => {
            let ranked = score_table(&table, &settings)?;
            let first = match first {
                Some(name) => name.clone(),
                None => ranked.best_match()?.country.country_name,
            };
            let second = match second {
                Some(name) => name.clone(),
                None => ranked.worst_match()?.country.country_name,
            };
            (first, second)
        }
    };
    debug!(first = %first, second = %second, "comparing countries");

    let chart = compare(
        table.frame(),
        [first.as_str(), second.as_str()],
        &settings.preference,
    )
    .with_context(|| format!("compare {first} with {second}"))?;

    match args.format {
        ChartFormatArg::Table => println!("{}", comparison_table(&chart)),
        ChartFormatArg::Json => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &chart).context("write json")?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn resolve_settings(input: &InputArgs, preference: &PreferenceArgs) -> Result<Settings> {
    let profile = input
        .profile
        .as_deref()
        .map(Profile::load)
        .transpose()
        .context("load profile")?;
    let settings = Settings::resolve(profile.as_ref(), &overrides(input, preference))?;
    debug!(
        source = %settings.source,
        preference = ?settings.preference.vector().values(),
        weights = ?settings.weights.vector().values(),
        "resolved settings"
    );
    Ok(settings)
}

fn load_table(settings: &Settings) -> Result<CountryTable> {
    load_dataset(&settings.source)
        .with_context(|| format!("load dataset from {}", settings.source))
}

fn score_table(table: &CountryTable, settings: &Settings) -> Result<RankedTable> {
    let _span = info_span!("score", countries = table.len()).entered();
    let ranked = score(table.frame(), &settings.preference, &settings.weights)
        .context("score countries")?;
    info!(countries = ranked.len(), "scoring complete");
    Ok(ranked)
}

fn rank_order(order: OrderArg) -> RankOrder {
    match order {
        OrderArg::Asc => RankOrder::Ascending,
        OrderArg::Desc => RankOrder::Descending,
    }
}

/// Keep the `top` best rows of an already ordered list.
fn top_rows(
    mut rows: Vec<ScoredCountry>,
    order: RankOrder,
    top: Option<usize>,
) -> Vec<ScoredCountry> {
    let Some(top) = top else {
        return rows;
    };
    let top = top.min(rows.len());
    match order {
        RankOrder::Ascending => rows.split_off(rows.len() - top),
        RankOrder::Descending => {
            rows.truncate(top);
            rows
        }
    }
}

fn top_frame(frame: DataFrame, order: RankOrder, top: Option<usize>) -> DataFrame {
    match (top, order) {
        (None, _) => frame,
        (Some(top), RankOrder::Ascending) => frame.tail(Some(top)),
        (Some(top), RankOrder::Descending) => frame.head(Some(top)),
    }
}
