//! Error types for extensions and their composition.

use thiserror::Error;

use tessera_core::CoreError;

/// Errors raised by an extension while it builds its contribution.
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The table is configured in a way the extension cannot work with.
    #[error("{0}")]
    Configuration(String),

    /// A configuration generator failed.
    #[error("configuration generator failed: {0}")]
    Generator(String),

    #[error("unable to convert the configuration into JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The extension touched the table options in an invalid way.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ExtensionError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn generator(msg: impl Into<String>) -> Self {
        Self::Generator(msg.into())
    }
}

/// Result type for extension setup and generators.
pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// An extension could not be merged. Nothing it contributed was kept.
#[derive(Debug, Error)]
#[error("unable to load the extension '{extension}': {source}")]
pub struct CompositionError {
    pub extension: String,
    #[source]
    pub source: ExtensionError,
}

impl CompositionError {
    pub fn new(extension: impl Into<String>, source: ExtensionError) -> Self {
        Self {
            extension: extension.into(),
            source,
        }
    }
}

/// Result type for composition.
pub type CompositionResult<T> = Result<T, CompositionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_error_names_extension() {
        let err = CompositionError::new(
            "multiFilter",
            ExtensionError::configuration("a filter selector must be set"),
        );
        assert_eq!(
            err.to_string(),
            "unable to load the extension 'multiFilter': a filter selector must be set"
        );
    }
}
