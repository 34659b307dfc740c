//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ivr_model::DocumentType;

#[derive(Parser)]
#[command(
    name = "ivr",
    version,
    about = "Manufacturer IVR field mapping engine",
    long_about = "Map clinical source records onto manufacturer document templates.\n\n\
                  Resolves configured field mappings (paths, expressions, fuzzy\n\
                  matches), validates the result, scores completeness, and emits\n\
                  the destination field list for document generation."
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

    /// Allow patient data values in log output (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map a source record for one manufacturer and print the result.
    Map(MapArgs),

    /// List the manufacturers found in a configuration directory.
    Manufacturers(ConfigDirArgs),

    /// Lint configured expressions and transforms for suspicious shapes.
    Lint(ConfigDirArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the source record (JSON object).
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Directory holding manufacturer configurations.
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: PathBuf,

    /// Manufacturer name (matched against slugs, keys, and config names).
    #[arg(long = "manufacturer", value_name = "NAME")]
    pub manufacturer: String,

    /// Document type to map for.
    #[arg(long = "document-type", value_enum, default_value = "ivr")]
    pub document_type: DocumentTypeArg,

    /// Run date used by date-based computations (default: today).
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Requesting provider name recorded by provider computations.
    #[arg(long = "provider", value_name = "NAME")]
    pub provider: Option<String>,

    /// Print the full mapping result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct ConfigDirArgs {
    /// Directory holding manufacturer configurations.
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DocumentTypeArg {
    Ivr,
    OrderForm,
}

impl From<DocumentTypeArg> for DocumentType {
    fn from(arg: DocumentTypeArg) -> Self {
        match arg {
            DocumentTypeArg::Ivr => Self::Ivr,
            DocumentTypeArg::OrderForm => Self::OrderForm,
        }
    }
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
