//! Schema `skaffold/v1alpha3`, the latest version.

mod defaults;
mod types;


use crate::error::{Result, SchemaError};

pub use defaults::*;
pub use types::*;

pub const VERSION: &str = "skaffold/v1alpha3";

/// Decode a YAML document written against this version.
pub fn decode(bytes: &[u8]) -> Result<Config> {
    let config: Config = super::decode_yaml(VERSION, bytes)?;
    super::check_header(VERSION, &config.api_version, &config.kind)?;
    Ok(config)
}

impl Config {
    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            SchemaError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            SchemaError::UserError(format!("failed to serialize config to JSON: {}", e))
        })
    }
}
