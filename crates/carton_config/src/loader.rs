//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CartonConfig;
use std::path::Path;

/// Loads and validates a `carton.toml` configuration from a project
/// directory.
pub fn load_config(project_dir: &Path) -> Result<CartonConfig, ConfigError> {
    let config_path = project_dir.join("carton.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `carton.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CartonConfig, ConfigError> {
    let config: CartonConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are usable.
fn validate_config(config: &CartonConfig) -> Result<(), ConfigError> {
    if config.build.roots.iter().any(|name| name.is_empty()) {
        return Err(ConfigError::ValidationError(
            "empty root package name".to_string(),
        ));
    }
    Ok(())
}
