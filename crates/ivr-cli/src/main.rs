//! IVR field mapping CLI.

use clap::{ColorChoice, Parser};
use serde_json::json;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod logging;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_lint, run_manufacturers, run_map};
use crate::logging::{LogConfig, LogFormat, init_logging};
use crate::summary::{print_lint_findings, print_manufacturers, print_map_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    init_logging(&log_config_from_cli(&cli));

    let exit_code = match &cli.command {
        Command::Map(args) => match run_map(args) {
            Ok(outcome) => {
                if args.json {
                    let payload = json!({
                        "result": outcome.result,
                        "destination_fields": outcome.destination_fields,
                    });
                    match serde_json::to_string_pretty(&payload) {
                        Ok(rendered) => println!("{rendered}"),
                        Err(error) => eprintln!("error: render result: {error}"),
                    }
                } else {
                    print_map_summary(&outcome);
                }
                if outcome.result.validation.valid { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Manufacturers(args) => match run_manufacturers(args) {
            Ok(summaries) => {
                print_manufacturers(&summaries);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Lint(args) => match run_lint(args) {
            Ok(findings) => {
                print_lint_findings(&findings);
                if findings.is_empty() { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        log_data: cli.log_data,
        ..LogConfig::default()
    };
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
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    config
}
