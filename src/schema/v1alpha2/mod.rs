//! Schema `skaffold/v1alpha2`.

mod types;
mod upgrade;

#[cfg(test)]
mod tests;

use crate::error::Result;

pub use types::*;
pub use upgrade::upgrade;

pub const VERSION: &str = "skaffold/v1alpha2";

/// Decode a YAML document written against this version.
pub fn decode(bytes: &[u8]) -> Result<Config> {
    let config: Config = super::decode_yaml(VERSION, bytes)?;
    super::check_header(VERSION, &config.api_version, &config.kind)?;
    Ok(config)
}
