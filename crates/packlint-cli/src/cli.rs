//! CLI argument definitions for packlint.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "packlint",
    version,
    about = "packlint - Validate security-automation content packs",
    long_about = "Validate security-automation content packs against the packlint rule set.\n\n\
                  Checks integrations, scripts, playbooks, release notes and packaging\n\
                  metadata, and reports violations with stable error codes."
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
    /// Validate content files, a change set, or the whole repository.
    Validate(ValidateArgs),

    /// List every registered rule with its codes, types and modes.
    Rules,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Content file or pack path to validate (repeatable).
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Validate the files changed relative to the git base ref.
    #[arg(short = 'g', long = "use-git")]
    pub use_git: bool,

    /// Base ref for git comparison.
    #[arg(long = "prev-ver", value_name = "REF", default_value = "HEAD")]
    pub prev_ver: String,

    /// Validate the entire repository.
    #[arg(short = 'a', long = "validate-all")]
    pub validate_all: bool,

    /// Only run the given error codes or code prefixes (comma separated,
    /// e.g. "RP101" or "RN,PA").
    #[arg(long = "run-specific-validations", value_name = "CODES")]
    pub run_specific_validations: Option<String>,

    /// Write a machine-readable JSON report to this path.
    #[arg(long = "json-report", value_name = "PATH")]
    pub json_report: Option<PathBuf>,

    /// Content repository root.
    #[arg(long = "repo-root", value_name = "DIR", default_value = ".")]
    pub repo_root: PathBuf,
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
