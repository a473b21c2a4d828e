//! CLI argument definitions for the Hofstede matcher.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use hofstede_cli::config::Overrides;
use hofstede_cli::logging::LogFormat;
use hofstede_ingest::DatasetSource;
use hofstede_model::Dimension;

#[derive(Parser)]
#[command(
    name = "hofstede",
    version,
    about = "Find the countries whose culture matches yours",
    long_about = "Rank countries by similarity to your preferred Hofstede cultural dimensions.\n\n\
                  Each country is scored 0-100 on six dimensions. Set a target value and a\n\
                  weight per dimension and get every country's similarity score, the best\n\
                  match and a radar comparison."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score every country and print the ranking.
    Rank(RankArgs),

    /// Compare two countries and your preference across all dimensions.
    Compare(CompareArgs),

    /// List the dimensions with their default preference.
    Dimensions,
}

/// Dataset and profile selection shared by scoring commands.
#[derive(Args)]
pub struct InputArgs {
    /// Dataset CSV: a local path or an http(s) URL (default: published matrix).
    #[arg(long = "data", value_name = "SOURCE")]
    pub data: Option<DatasetSource>,

    /// TOML profile with dataset, preference and weights.
    #[arg(long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,
}

/// Per-dimension preference and weight overrides.
#[derive(Args)]
#[command(next_help_heading = "Preference")]
pub struct PreferenceArgs {
    /// Preferred Power Distance Index.
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub pdi: Option<f64>,
    /// Preferred Individualism v. Collectivism.
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub idv: Option<f64>,
    /// Preferred Masculinity v. Femininity.
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub mas: Option<f64>,
    /// Preferred Uncertainty Avoidance Index.
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub uai: Option<f64>,
    /// Preferred Long- v. Short-Term Orientation.
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub ltowvs: Option<f64>,
    /// Preferred Indulgence v. Restraint.
    #[arg(long, value_name = "VALUE", allow_negative_numbers = true)]
    pub ivr: Option<f64>,

    /// Weight of the Power Distance Index.
    #[arg(
        long = "weight-pdi",
        value_name = "WEIGHT",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub weight_pdi: Option<f64>,
    /// Weight of Individualism v. Collectivism.
    #[arg(
        long = "weight-idv",
        value_name = "WEIGHT",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub weight_idv: Option<f64>,
    /// Weight of Masculinity v. Femininity.
    #[arg(
        long = "weight-mas",
        value_name = "WEIGHT",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub weight_mas: Option<f64>,
    /// Weight of the Uncertainty Avoidance Index.
    #[arg(
        long = "weight-uai",
        value_name = "WEIGHT",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub weight_uai: Option<f64>,
    /// Weight of Long- v. Short-Term Orientation.
    #[arg(
        long = "weight-ltowvs",
        value_name = "WEIGHT",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub weight_ltowvs: Option<f64>,
    /// Weight of Indulgence v. Restraint.
    #[arg(
        long = "weight-ivr",
        value_name = "WEIGHT",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub weight_ivr: Option<f64>,
}

impl PreferenceArgs {
    fn preference_value(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Pdi => self.pdi,
            Dimension::Idv => self.idv,
            Dimension::Mas => self.mas,
            Dimension::Uai => self.uai,
            Dimension::Ltowvs => self.ltowvs,
            Dimension::Ivr => self.ivr,
        }
    }

    fn weight_value(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Pdi => self.weight_pdi,
            Dimension::Idv => self.weight_idv,
            Dimension::Mas => self.weight_mas,
            Dimension::Uai => self.weight_uai,
            Dimension::Ltowvs => self.weight_ltowvs,
            Dimension::Ivr => self.weight_ivr,
        }
    }
}

/// Collect command-line overrides in dimension order.
pub fn overrides(input: &InputArgs, preference: &PreferenceArgs) -> Overrides {
    Overrides {
        dataset: input.data.clone(),
        preference: Dimension::ALL
            .into_iter()
            .filter_map(|d| preference.preference_value(d).map(|v| (d, v)))
            .collect(),
        weights: Dimension::ALL
            .into_iter()
            .filter_map(|d| preference.weight_value(d).map(|v| (d, v)))
            .collect(),
    }
}

#[derive(Args)]
pub struct RankArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub preference: PreferenceArgs,

    /// Row order of the ranking (asc lists the worst match first).
    #[arg(long = "order", value_enum, default_value = "asc")]
    pub order: OrderArg,

    /// Show only the N best matches, kept in the requested order.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Dimension shown next to the score in table output.
    #[arg(long = "color-by", value_name = "DIM", default_value = "pdi")]
    pub color_by: Dimension,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Args)]
pub struct CompareArgs {
    /// First country (default: best match).
    #[arg(value_name = "COUNTRY")]
    pub country: Option<String>,

    /// Second country (default: worst match).
    #[arg(long = "with", value_name = "COUNTRY")]
    pub with: Option<String>,

    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub preference: PreferenceArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ChartFormatArg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChartFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::ERROR,
            Self::Warn => LevelFilter::WARN,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
