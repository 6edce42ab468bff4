//! Implementation of the `skaffix versions` command.

use skaffix::error::Result;
use skaffix::schema::registry;

/// Execute the `skaffix versions` command.
pub fn cmd_versions() -> Result<()> {
    for line in version_lines() {
        println!("{}", line);
    }
    Ok(())
}

fn version_lines() -> Vec<String> {
    registry::versions()
        .map(|schema| {
            if schema.is_latest() {
                format!("{} (latest)", schema.version)
            } else {
                schema.version.to_string()
            }
        })
        .collect()
}
