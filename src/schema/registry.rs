//! Registry of known schema versions.
//!
//! The table is a `static` slice of plain function pointers, in chain order
//! from oldest to latest. It is never mutated, so lookups are safe from any
//! number of threads.

use super::{VersionedConfig, v1alpha1, v1alpha2, v1alpha3};
use crate::error::{Result, SchemaError};
use serde::Deserialize;

/// The version every document is upgraded to.
pub const LATEST_VERSION: &str = v1alpha3::VERSION;

/// A registered schema version.
#[derive(Debug, Clone, Copy)]
pub struct SchemaVersion {
    /// The `apiVersion` tag, e.g. `skaffold/v1alpha2`.
    pub version: &'static str,
    /// Decode raw bytes into this version's document.
    pub decode: fn(&[u8]) -> Result<VersionedConfig>,
    /// The version this one upgrades to, `None` for the latest.
    pub next: Option<&'static str>,
}

impl SchemaVersion {
    pub fn is_latest(&self) -> bool {
        self.next.is_none()
    }
}

static SCHEMA_VERSIONS: &[SchemaVersion] = &[
    SchemaVersion {
        version: v1alpha1::VERSION,
        decode: decode_v1alpha1,
        next: Some(v1alpha2::VERSION),
    },
    SchemaVersion {
        version: v1alpha2::VERSION,
        decode: decode_v1alpha2,
        next: Some(v1alpha3::VERSION),
    },
    SchemaVersion {
        version: v1alpha3::VERSION,
        decode: decode_v1alpha3,
        next: None,
    },
];

fn decode_v1alpha1(bytes: &[u8]) -> Result<VersionedConfig> {
    v1alpha1::decode(bytes).map(VersionedConfig::V1Alpha1)
}

fn decode_v1alpha2(bytes: &[u8]) -> Result<VersionedConfig> {
    v1alpha2::decode(bytes).map(VersionedConfig::V1Alpha2)
}

fn decode_v1alpha3(bytes: &[u8]) -> Result<VersionedConfig> {
    v1alpha3::decode(bytes).map(VersionedConfig::V1Alpha3)
}

/// Find the registered schema for a version tag.
pub fn lookup(version: &str) -> Result<&'static SchemaVersion> {
    SCHEMA_VERSIONS
        .iter()
        .find(|schema| schema.version == version)
        .ok_or_else(|| SchemaError::UnknownVersion(version.to_string()))
}

/// All registered versions, oldest first.
pub fn versions() -> impl Iterator<Item = &'static SchemaVersion> {
    SCHEMA_VERSIONS.iter()
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Header {
    api_version: String,
}

/// Read the `apiVersion` of a document without decoding the rest.
///
/// A document without `apiVersion` yields an empty tag, which no schema is
/// registered under.
pub fn detect_version(bytes: &[u8]) -> Result<String> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(String::new());
    }
    let header: Header = serde_yaml::from_slice(bytes)
        .map_err(|e| SchemaError::decode("unversioned", format!("parsing api version: {}", e)))?;
    Ok(header.api_version)
}
