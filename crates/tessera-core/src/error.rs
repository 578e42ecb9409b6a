//! Error types for the option catalog and the resolution pass.
//!
//! Catalog errors are raised while the catalog is assembled or queried and are
//! fatal for the operation that triggered them. [`ProcessingError`]s are raised
//! by a single value processor and only abort the option they belong to.

use thiserror::Error;

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors raised while registering or looking up options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// An option with the same normalized name is already registered.
    #[error("an option named '{name}' is already registered")]
    DuplicateKey {
        /// The normalized name that collided.
        name: String,
    },

    /// The requested option name is blank.
    #[error("option names cannot be blank")]
    BlankName,

    /// No option matches the requested name.
    #[error("'{name}' is not a valid option")]
    UnknownOption {
        /// The name as it was requested.
        name: String,
    },

    /// A family pattern failed to compile.
    #[error("invalid option family pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },
}

impl CatalogError {
    /// Creates a duplicate key error.
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateKey { name: name.into() }
    }

    /// Creates an unknown option error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownOption { name: name.into() }
    }

    /// Returns `true` for errors caused by malformed input rather than a
    /// catalog conflict.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::BlankName | Self::UnknownOption { .. })
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Processing Errors
// =============================================================================

/// A raw value could not be turned into a typed option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' is not a valid value for the option '{option}': {reason}")]
pub struct ProcessingError {
    /// Name of the option being processed.
    pub option: String,
    /// The raw string that was rejected.
    pub raw: String,
    /// Human readable explanation.
    pub reason: String,
}

impl ProcessingError {
    /// Creates a processing error for `option`.
    pub fn new(
        option: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            option: option.into(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for value processors.
pub type ProcessingResult<T> = Result<T, ProcessingError>;

// =============================================================================
// Core Errors
// =============================================================================

/// Errors raised by entity level operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Result type for entity level operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_error_message() {
        let err = ProcessingError::new("feature.info", "maybe", "expected true or false");
        assert_eq!(
            err.to_string(),
            "'maybe' is not a valid value for the option 'feature.info': expected true or false"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(CatalogError::BlankName.is_validation());
        assert!(CatalogError::unknown("foo").is_validation());
        assert!(!CatalogError::duplicate("foo").is_validation());
    }
}
