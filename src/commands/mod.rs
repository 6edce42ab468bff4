//! Command implementations for skaffix.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod fix;
mod versions;

use crate::cli::Command;
use skaffix::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Fix(args) => fix::cmd_fix(args),
        Command::Versions => versions::cmd_versions(),
    }
}
