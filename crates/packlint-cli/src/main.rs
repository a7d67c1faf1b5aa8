//! packlint CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

use packlint_cli::logging::{LogConfig, LogFormat, init_logging};
use packlint_report::{EXIT_CONFIGURATION, EXIT_INVALID, exit_code};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_rules, run_validate, write_report};
use crate::summary::print_outcome;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_CONFIGURATION);
    }
    let exit = match cli.command {
        Command::Validate(args) => match run_validate(&args) {
            Ok(outcome) => {
                let mut exit = exit_code(&outcome);
                if let Some(path) = &args.json_report
                    && let Err(error) = write_report(&outcome, path)
                {
                    eprintln!("error: {error:#}");
                    exit = exit.max(EXIT_INVALID);
                }
                print_outcome(&outcome);
                exit
            }
            Err(error) => {
                eprintln!("error: {error}");
                EXIT_CONFIGURATION
            }
        },
        Command::Rules => {
            run_rules();
            0
        }
    };
    std::process::exit(exit);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
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
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
