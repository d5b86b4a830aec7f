//! Configuration types deserialized from `carton.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level configuration parsed from `carton.toml`.
///
/// Every section is optional; an empty file configures an in-memory-only
/// cache that can load no versioned packages and builds all packages.
#[derive(Debug, Default, Deserialize)]
pub struct CartonConfig {
    /// Build cache location.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Versioned package store location.
    #[serde(default)]
    pub store: StoreConfig,
    /// Build session settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Where built artifacts and their build-info sidecars are persisted.
#[derive(Debug, Default, Deserialize)]
pub struct CacheConfig {
    /// The cache directory. When unset, nothing is persisted and every
    /// local package is rebuilt each session.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Where prebuilt versioned packages are found.
#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Root of the package store. When unset, versioned packages cannot
    /// be loaded.
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Session-level build settings.
#[derive(Debug, Default, Deserialize)]
pub struct BuildConfig {
    /// Root packages to build. When empty, every package in the map is
    /// built.
    #[serde(default)]
    pub roots: Vec<String>,
}
