//! Versioned pipeline config schemas.
//!
//! Each `vXalphaY` module holds the document types of one schema version, its
//! decoder, and (for all but the latest) the mapper to the next version. The
//! mappers only know their own two versions; this module is where the chain
//! is composed.

pub mod registry;
pub mod v1alpha1;
pub mod v1alpha2;
pub mod v1alpha3;
pub(crate) mod variant;

use crate::error::{Result, SchemaError};
use serde::de::DeserializeOwned;

pub use registry::{LATEST_VERSION, SchemaVersion, detect_version, lookup};

/// The latest schema. Callers only ever operate on this shape.
pub use v1alpha3 as latest;

/// The only accepted value of a document's `kind`.
pub const KIND: &str = "Config";

/// A decoded document of any registered version.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedConfig {
    V1Alpha1(v1alpha1::Config),
    V1Alpha2(v1alpha2::Config),
    V1Alpha3(v1alpha3::Config),
}

/// Result of a single upgrade hop.
#[derive(Debug, Clone, PartialEq)]
pub enum UpgradeStep {
    /// The document moved one version forward.
    Upgraded(VersionedConfig),
    /// The document was already on the latest version.
    Latest(latest::Config),
}

impl VersionedConfig {
    /// The schema version tag of this document.
    pub fn version(&self) -> &'static str {
        match self {
            VersionedConfig::V1Alpha1(_) => v1alpha1::VERSION,
            VersionedConfig::V1Alpha2(_) => v1alpha2::VERSION,
            VersionedConfig::V1Alpha3(_) => v1alpha3::VERSION,
        }
    }

    pub fn is_latest(&self) -> bool {
        self.version() == LATEST_VERSION
    }

    /// Perform one upgrade hop.
    pub fn upgrade(self) -> UpgradeStep {
        match self {
            VersionedConfig::V1Alpha1(config) => {
                UpgradeStep::Upgraded(VersionedConfig::V1Alpha2(v1alpha1::upgrade(config)))
            }
            VersionedConfig::V1Alpha2(config) => {
                UpgradeStep::Upgraded(VersionedConfig::V1Alpha3(v1alpha2::upgrade(config)))
            }
            VersionedConfig::V1Alpha3(config) => UpgradeStep::Latest(config),
        }
    }
}

/// Parse YAML bytes into the document type of `version`.
pub(crate) fn decode_yaml<T: DeserializeOwned>(version: &str, bytes: &[u8]) -> Result<T> {
    serde_yaml::from_slice(bytes).map_err(|e| SchemaError::decode(version, e))
}

/// Check the identity fields every document carries.
pub(crate) fn check_header(version: &str, api_version: &str, kind: &str) -> Result<()> {
    if api_version != version {
        return Err(SchemaError::decode(
            version,
            format!("document declares apiVersion '{}'", api_version),
        ));
    }
    if kind != KIND {
        return Err(SchemaError::decode(
            version,
            format!("kind must be '{}', found '{}'", KIND, kind),
        ));
    }
    Ok(())
}
