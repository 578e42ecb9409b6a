//! Configuration validation utilities.

use super::error::{ConfigError, ConfigResult};
use super::schema::{LogOutput, LoggingConfig, RuntimeConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &RuntimeConfig) -> ConfigResult<()> {
    validate_logging_config(&config.logging)?;
    for (name, options) in &config.groups {
        validate_group(name, options)?;
    }
    if !config.defaults.is_object() {
        return Err(ConfigError::validation("'defaults' must be a table of options"));
    }
    Ok(())
}

/// Validates logging settings.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }
    for module in logging.filters.keys() {
        if module.trim().is_empty() || module.contains(char::is_whitespace) {
            return Err(ConfigError::validation(format!(
                "Invalid logging filter target: '{module}'"
            )));
        }
    }
    Ok(())
}

/// Validates a single option group.
fn validate_group(name: &str, options: &serde_json::Value) -> ConfigResult<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::invalid_group(name, "group names cannot be blank"));
    }
    if name.contains(char::is_whitespace) || name.contains('.') {
        return Err(ConfigError::invalid_group(
            name,
            "group names cannot contain whitespace or dots",
        ));
    }
    if !options.is_object() {
        return Err(ConfigError::invalid_group(
            name,
            "a group must be a table of options",
        ));
    }
    Ok(())
}
