//! skaffix: versioned pipeline config migration.
//!
//! Decodes a pipeline config written against any registered schema version
//! and upgrades it, one version at a time, to the latest schema.
//!
//! ```no_run
//! let yaml = std::fs::read("skaffold.yaml")?;
//! let config = skaffix::migrate::upgrade_to_latest(&yaml)?;
//! assert_eq!(config.api_version, skaffix::schema::LATEST_VERSION);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod migrate;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;
