//! CLI argument definitions for the `freight` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use freight_model::RecordKind;

#[derive(Parser)]
#[command(
    name = "freight",
    version,
    about = "Map spreadsheet uploads onto delivery orders and run freight reports",
    long_about = "Map spreadsheet uploads onto delivery orders and run freight reports.\n\n\
                  `map` suggests a column mapping for a CSV upload and plans the import.\n\
                  `report` filters, sorts and pages a JSON record feed with summary stats."
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

    /// Configuration file (default: ./freight.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

    /// Allow customer values (names, phone numbers, search text) in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the delivery-order import fields.
    Fields,

    /// Suggest a column mapping for a CSV upload.
    Map(MapArgs),

    /// Filter, sort and page a report feed.
    Report(ReportArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// CSV upload to map.
    #[arg(value_name = "CSV")]
    pub upload: PathBuf,

    /// Start from a saved mapping template.
    #[arg(long = "template", value_name = "NAME")]
    pub template: Option<String>,

    /// Save the resulting mapping as a template.
    #[arg(long = "save-template", value_name = "NAME")]
    pub save_template: Option<String>,

    /// Directory holding mapping templates.
    #[arg(long = "templates-dir", value_name = "DIR", default_value = ".freight/templates")]
    pub templates_dir: PathBuf,

    /// Number of upload rows to show in the preview.
    #[arg(long = "sample-rows", value_name = "N", default_value_t = 5)]
    pub sample_rows: usize,

    /// Existing rows (JSON array of field maps) checked for duplicates.
    #[arg(long = "existing", value_name = "JSON", requires = "output")]
    pub existing: Option<PathBuf>,

    /// Write the import plan (create, update, skipped) as JSON.
    #[arg(long = "output", value_name = "JSON")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// JSON feed of report records.
    #[arg(value_name = "JSON")]
    pub feed: PathBuf,

    /// Record kind to report on.
    #[arg(long = "kind", value_enum)]
    pub kind: RecordKindArg,

    /// Case-insensitive search text.
    #[arg(long = "search", value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Field to search (repeatable; defaults to the kind's search fields).
    #[arg(long = "search-field", value_name = "FIELD")]
    pub search_fields: Vec<String>,

    /// Status filter; matches every spelling of the status group.
    #[arg(long = "status", value_name = "STATUS", default_value = "")]
    pub status: String,

    /// First day of the date range (YYYY-MM-DD).
    #[arg(long = "from", value_name = "DATE", requires = "to")]
    pub from: Option<String>,

    /// Last day of the date range (YYYY-MM-DD).
    #[arg(long = "to", value_name = "DATE", requires = "from")]
    pub to: Option<String>,

    /// Field equality filter as FIELD=VALUE (repeatable). Case-insensitive;
    /// numbers compare by value.
    #[arg(long = "where", value_name = "FIELD=VALUE")]
    pub equals: Vec<String>,

    /// Page to show, starting at 1.
    #[arg(long = "page", value_name = "N", default_value_t = 1)]
    pub page: usize,

    /// Rows per page (default from config, else 9).
    #[arg(long = "page-size", value_name = "N")]
    pub page_size: Option<usize>,

    /// Export every filtered row, in report order, to a CSV file.
    #[arg(long = "export", value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RecordKindArg {
    Carrier,
    Call,
    Target,
    Bid,
}

impl From<RecordKindArg> for RecordKind {
    fn from(arg: RecordKindArg) -> Self {
        match arg {
            RecordKindArg::Carrier => RecordKind::Carrier,
            RecordKindArg::Call => RecordKind::Call,
            RecordKindArg::Target => RecordKind::Target,
            RecordKindArg::Bid => RecordKind::Bid,
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
