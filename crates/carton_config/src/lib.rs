//! Parsing and validation of `carton.toml` project configuration files.
//!
//! The configuration tells an embedding tool where the build cache lives,
//! where the versioned package store is rooted, and which root packages a
//! build should start from.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{BuildConfig, CacheConfig, CartonConfig, StoreConfig};
