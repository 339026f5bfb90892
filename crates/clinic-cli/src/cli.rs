//! CLI argument definitions for the patient history tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use clinic_format::parse_date;
use clinic_ingest::DEFAULT_DATA_DIR;
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clinic",
    version,
    about = "Patient history reports from a medical practice's CSV exports",
    long_about = "Look up patients and their procedure history from a practice's CSV exports.\n\n\
                  Reads patients.csv, procedures.csv and billing.csv (plus optional\n\
                  hospitals.csv and doctors.csv) from a data directory."
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

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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

    /// Allow patient-identifying values (names, IDs) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show a patient's details, summary and procedure history.
    History(HistoryArgs),

    /// List each dataset with its record count and columns.
    Datasets(DataArgs),

    /// Compare billed and paid totals with the previous period.
    Billing(BillingArgs),

    /// Print the percentage change between two values.
    Trend(TrendArgs),
}

#[derive(Args)]
pub struct DataArgs {
    /// Directory holding the CSV exports.
    #[arg(long = "data-dir", value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Part of the patient's "First Last" name, case-insensitive.
    #[arg(value_name = "QUERY")]
    pub query: String,

    #[command(flatten)]
    pub data: DataArgs,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Compute ages as of this date instead of today.
    #[arg(long = "as-of", value_name = "DATE", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Args)]
pub struct BillingArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Length of each compared period in days.
    #[arg(long = "days", default_value_t = 30)]
    pub days: u32,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// End the current period on this date instead of today.
    #[arg(long = "as-of", value_name = "DATE", value_parser = parse_as_of)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Args)]
pub struct TrendArgs {
    #[arg(value_name = "CURRENT", allow_negative_numbers = true)]
    pub current: f64,

    #[arg(value_name = "PREVIOUS", allow_negative_numbers = true)]
    pub previous: f64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
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

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_as_of(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("not a recognizable date: {value}"))
}
