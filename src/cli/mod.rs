//! CLI argument parsing for skaffix.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Skaffix: upgrade pipeline config files to the latest schema version.
///
/// Documents are decoded under the version named by their `apiVersion`,
/// upgraded one version at a time, and completed with the latest
/// version's defaults.
#[derive(Parser, Debug)]
#[command(name = "skaffix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log every upgrade hop.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for skaffix.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Upgrade a config file to the latest schema version.
    ///
    /// Prints the upgraded document to stdout unless `--overwrite` is given.
    Fix(FixArgs),

    /// List the known schema versions, oldest first.
    Versions,
}

/// Output encoding for upgraded documents.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the `fix` command.
#[derive(Args, Debug)]
pub struct FixArgs {
    /// Path to the config file.
    #[arg(default_value = "skaffold.yaml")]
    pub file: PathBuf,

    /// Replace the file in place instead of printing the result.
    #[arg(long)]
    pub overwrite: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
