//! Tessera Runtime - configuration, templates and logging.
//!
//! This crate provides:
//! - Figment based loading of the runtime settings and option groups
//!   ([`ConfigLoader`], [`RuntimeConfig`])
//! - The per-locale [`ConfigurationTemplateCache`] that resolves option
//!   groups once and hands out private copies
//! - Logging configuration ([`LoggingBuilder`], [`logging::init_from_config`])
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera_core::{OptionCatalog, TableConfiguration};
//! use tessera_runtime::{ConfigLoader, ConfigurationTemplateCache, logging};
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load()?;
//! logging::init_from_config(&config.logging);
//!
//! let catalog = Arc::new(OptionCatalog::standard()?);
//! let cache = ConfigurationTemplateCache::new(catalog.clone(), loader)
//!     .with_dev_mode(config.dev_mode);
//! let template = cache.resolve("en", "global")?;
//! let table = TableConfiguration::new("myTable", "en", "global", catalog, template);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod template;

pub use config::{
    ConfigError, ConfigLoader, ConfigResult, LoggingConfig, OptionSource, RuntimeConfig,
};
pub use error::{TemplateError, TemplateResult};
pub use logging::LoggingBuilder;
pub use template::ConfigurationTemplateCache;

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{ConfigLoader, ConfigurationTemplateCache, RuntimeConfig};
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
