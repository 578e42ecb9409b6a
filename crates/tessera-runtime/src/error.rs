//! Runtime error types.

use tessera_core::CatalogError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building or reading configuration templates.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The requested group is not defined for the locale.
    #[error("'{group}' is not a valid group, available groups are: {}", available.join(", "))]
    UnknownGroup {
        group: String,
        available: Vec<String>,
    },

    /// A configured option name is not in the catalog.
    #[error("invalid option in group '{group}': {source}")]
    InvalidOption {
        group: String,
        #[source]
        source: CatalogError,
    },

    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl TemplateError {
    /// Creates an unknown group error.
    pub fn unknown_group(group: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownGroup {
            group: group.into(),
            available,
        }
    }
}

/// Result type for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_group_lists_groups() {
        let err = TemplateError::unknown_group(
            "nonexistent",
            vec!["admin".to_string(), "global".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "'nonexistent' is not a valid group, available groups are: admin, global"
        );
    }
}
