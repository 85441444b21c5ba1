//! CLI argument definitions for the roster tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Roster tool - reconcile and search multi-source employee records",
    long_about = "Reconcile employee records from spreadsheet exports, scraped\n\
                  directory profiles, and machine inventory submissions into one\n\
                  canonical store, then search it with typo-tolerant fuzzy matching."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile all sources in a data folder into the canonical store.
    Reconcile(ReconcileArgs),

    /// Search a canonical store with fuzzy name matching and facet filters.
    Search(SearchArgs),

    /// Re-render the data-quality report from a previous reconcile run.
    Report(ReportArgs),
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Folder containing the source exports: tech_list.csv,
    /// employee_list.csv, gpu_inventory.csv, profiles/*.json,
    /// submissions/*.json. Missing sources are skipped.
    #[arg(value_name = "DATA_FOLDER")]
    pub data_folder: PathBuf,

    /// Output directory for the store and report (default: <DATA_FOLDER>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Minimum similarity for merging a record into an existing entry.
    ///
    /// Records scoring below this expand the roster as new entries instead
    /// of merging; raising it trades duplicates for fewer wrong merges.
    #[arg(long = "merge-threshold", value_name = "SCORE")]
    pub merge_threshold: Option<f64>,

    /// Reconcile and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Path to the canonical store (employees.json).
    #[arg(value_name = "STORE")]
    pub store: PathBuf,

    /// Query string; empty lists everyone passing the facet filters.
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Restrict results to these positions (repeatable).
    #[arg(long = "position", value_name = "POSITION")]
    pub positions: Vec<String>,

    /// Require membership in all of these projects (repeatable).
    #[arg(long = "project", value_name = "PROJECT")]
    pub projects: Vec<String>,

    /// Maximum number of results to print.
    #[arg(long = "limit", value_name = "N", default_value_t = 20)]
    pub limit: usize,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Path to a saved quality_report.json.
    #[arg(value_name = "REPORT")]
    pub report: PathBuf,
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
