//! Implementation of the `skaffix fix` command.
//!
//! # What `skaffix fix` does
//!
//! 1. Reads the config file
//! 2. Detects its `apiVersion` and upgrades it to the latest schema
//! 3. Leaves documents already on the latest version alone
//! 4. Prints the upgraded document, or atomically replaces the file with
//!    `--overwrite`
//!
//! Defaults are not applied: the written file only holds what the user
//! wrote, in the latest shape.

use crate::cli::{FixArgs, OutputFormat};
use skaffix::error::{Result, SchemaError};
use skaffix::fs::atomic_write_file;
use skaffix::migrate::{Migration, NoDefaults, migrate_with};
use skaffix::schema::latest;
use std::fs;
use std::path::Path;
use tracing::info;

/// What `fix` did with the file.
#[derive(Debug, PartialEq)]
pub enum FixOutcome {
    /// The file already declared the latest version.
    AlreadyLatest(&'static str),
    /// The upgraded document, to be printed.
    Rendered(String),
    /// The file was replaced in place.
    Overwritten { from: &'static str, to: String },
}

/// Execute the `skaffix fix` command.
pub fn cmd_fix(args: FixArgs) -> Result<()> {
    match fix_file(&args.file, args.overwrite, args.output)? {
        FixOutcome::AlreadyLatest(version) => {
            println!("config is already version {}", version);
        }
        FixOutcome::Rendered(document) => {
            print!("{}", document);
        }
        FixOutcome::Overwritten { from, to } => {
            println!(
                "Upgraded '{}' from {} to {}",
                args.file.display(),
                from,
                to
            );
        }
    }
    Ok(())
}

/// Upgrade the file at `path` without touching stdout.
pub fn fix_file(path: &Path, overwrite: bool, output: OutputFormat) -> Result<FixOutcome> {
    let bytes = fs::read(path).map_err(|e| {
        SchemaError::UserError(format!(
            "failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let Migration {
        config,
        source_version,
        hops,
    } = migrate_with(&bytes, &NoDefaults)?;

    if hops.is_empty() {
        return Ok(FixOutcome::AlreadyLatest(source_version));
    }

    let document = render(&config, output)?;

    if !overwrite {
        return Ok(FixOutcome::Rendered(document));
    }

    atomic_write_file(path, &document)?;
    info!(path = %path.display(), "config file replaced");

    Ok(FixOutcome::Overwritten {
        from: source_version,
        to: config.api_version,
    })
}

fn render(config: &latest::Config, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Yaml => config.to_yaml(),
        OutputFormat::Json => config.to_json().map(|mut json| {
            json.push('\n');
            json
        }),
    }
}
