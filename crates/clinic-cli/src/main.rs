//! Clinic patient history CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use clinic_cli::commands::{run_billing, run_datasets, run_history, run_trend};
use clinic_cli::logging::{LogConfig, LogFormat, init_logging};
use clinic_cli::render::{billing_table, datasets_table, render_history};
use clinic_format::today;
use clinic_ingest::IngestError;
use serde::Serialize;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{
    BillingArgs, Cli, Command, HistoryArgs, LogFormatArg, LogLevelArg, OutputFormatArg,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::History(args) => history(args),
        Command::Datasets(args) => run_datasets(&args.data_dir).map(|datasets| {
            println!("{}", datasets_table(&datasets));
            0
        }),
        Command::Billing(args) => billing(args),
        Command::Trend(args) => {
            println!("{}", run_trend(args.current, args.previous));
            Ok(0)
        }
    };
    let exit_code = match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn history(args: &HistoryArgs) -> Result<i32> {
    let today = args.as_of.unwrap_or_else(today);
    let (history, failures) = run_history(&args.data.data_dir, &args.query, today)?;
    report_failures(&failures);
    let Some(history) = history else {
        eprintln!("No patient matches \"{}\".", args.query);
        return Ok(1);
    };
    match args.format {
        OutputFormatArg::Table => print!("{}", render_history(&history)),
        OutputFormatArg::Json => print_json(&history)?,
    }
    Ok(0)
}

fn billing(args: &BillingArgs) -> Result<i32> {
    let today = args.as_of.unwrap_or_else(today);
    let (overview, failures) = run_billing(&args.data.data_dir, args.days, today)?;
    report_failures(&failures);
    match args.format {
        OutputFormatArg::Table => println!("{}", billing_table(&overview)),
        OutputFormatArg::Json => print_json(&overview)?,
    }
    Ok(0)
}

fn report_failures(failures: &[IngestError]) {
    for failure in failures {
        eprintln!("warning: {failure}");
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default().with_level(cli.verbosity.tracing_level_filter());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config = config.with_format(match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    });
    config = config
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
