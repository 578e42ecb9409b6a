//! Configuration module for the Tessera runtime.
//!
//! This module provides figment-based loading and validation of the runtime
//! settings and of the user option groups.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, OptionSource};
pub use schema::{
    DEFAULT_OPTIONS, GLOBAL_GROUP, LogFormat, LogLevel, LogOutput, LoggingConfig, RuntimeConfig,
    SpanEventConfig, flatten_options, nest_options,
};
pub use validation::validate_config;
