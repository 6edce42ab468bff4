//! Upgrade chain driver.
//!
//! Resolves a document's schema version, decodes it, walks it forward one
//! version at a time until it reaches the latest schema, and finally applies
//! the latest schema's defaults.
//!
//! # Pipeline
//!
//! 1. Look up the declared version in the registry (`UnknownVersion`)
//! 2. Decode the bytes for that version (`Decode`)
//! 3. Upgrade hop by hop until the latest version
//! 4. Apply defaults, also when no hop was needed
//!
//! Nothing here blocks or touches shared mutable state, so any number of
//! documents can be migrated concurrently.


use crate::error::Result;
use crate::schema::{UpgradeStep, VersionedConfig, detect_version, latest, lookup};
use tracing::{debug, info};

/// Fills unset optional fields of a terminal document.
///
/// Implementations must be idempotent and must not fail.
pub trait ApplyDefaults {
    fn apply_defaults(&self, config: &mut latest::Config);
}

/// The default rules of the latest schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDefaults;

impl ApplyDefaults for StandardDefaults {
    fn apply_defaults(&self, config: &mut latest::Config) {
        config.set_default_values();
    }
}

/// Leaves the terminal document exactly as the upgrade produced it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl ApplyDefaults for NoDefaults {
    fn apply_defaults(&self, _config: &mut latest::Config) {}
}

/// Outcome of a migration, including the versions that were traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    /// The terminal document, defaults applied.
    pub config: latest::Config,
    /// The version the input declared.
    pub source_version: &'static str,
    /// Every version reached by an upgrade hop, in order.
    pub hops: Vec<&'static str>,
}

impl Migration {
    /// True when the input was already on the latest version.
    pub fn was_latest(&self) -> bool {
        self.hops.is_empty()
    }
}

/// Decode `bytes` as `declared_version` and upgrade to the latest schema.
pub fn parse_and_upgrade_to_latest(bytes: &[u8], declared_version: &str) -> Result<latest::Config> {
    parse_and_upgrade_with(bytes, declared_version, &StandardDefaults)
}

/// Like [`parse_and_upgrade_to_latest`] with a caller-supplied default applier.
pub fn parse_and_upgrade_with<D: ApplyDefaults + ?Sized>(
    bytes: &[u8],
    declared_version: &str,
    defaults: &D,
) -> Result<latest::Config> {
    Ok(run(bytes, declared_version, defaults)?.config)
}

/// Detect the version from the document header, then upgrade to the latest
/// schema.
pub fn upgrade_to_latest(bytes: &[u8]) -> Result<latest::Config> {
    Ok(migrate(bytes)?.config)
}

/// Detect, decode and upgrade, reporting the traversed versions.
pub fn migrate(bytes: &[u8]) -> Result<Migration> {
    migrate_with(bytes, &StandardDefaults)
}

/// Like [`migrate`] with a caller-supplied default applier.
pub fn migrate_with<D: ApplyDefaults + ?Sized>(bytes: &[u8], defaults: &D) -> Result<Migration> {
    let version = detect_version(bytes)?;
    run(bytes, &version, defaults)
}

/// Walk a decoded document forward to the latest schema. No defaults are
/// applied.
pub fn upgrade_chain(config: VersionedConfig) -> latest::Config {
    walk(config, &mut Vec::new())
}

fn run<D: ApplyDefaults + ?Sized>(
    bytes: &[u8],
    declared_version: &str,
    defaults: &D,
) -> Result<Migration> {
    let schema = lookup(declared_version)?;
    let decoded = (schema.decode)(bytes)?;

    let mut hops = Vec::new();
    let mut config = walk(decoded, &mut hops);
    defaults.apply_defaults(&mut config);

    if !hops.is_empty() {
        info!(
            from = schema.version,
            to = config.api_version.as_str(),
            hops = hops.len(),
            "upgraded config"
        );
    }

    Ok(Migration {
        config,
        source_version: schema.version,
        hops,
    })
}

fn walk(mut current: VersionedConfig, hops: &mut Vec<&'static str>) -> latest::Config {
    loop {
        let from = current.version();
        match current.upgrade() {
            UpgradeStep::Upgraded(next) => {
                debug!(from, to = next.version(), "upgrade hop");
                hops.push(next.version());
                current = next;
            }
            UpgradeStep::Latest(config) => return config,
        }
    }
}
