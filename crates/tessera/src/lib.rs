//! # Tessera
//!
//! Option resolution and extension composition for data table scripts.
//!
//! ## Overview
//!
//! A table is described by string options (`feature.pageable = true`,
//! `css.theme = bootstrap3`, ...). Tessera validates and normalizes them,
//! layers per-group and per-table overrides, and lets extensions contribute
//! configuration and script fragments that are merged into one
//! initialization script.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐     ┌──────────────────┐     ┌────────────────┐     ┌──────────────┐
//! │ ConfigLoader  │────▶│ TemplateCache    │────▶│ Table options  │────▶│  Extension   │──▶ script
//! │ files + env   │     │ (locale, group)  │     │ + columns      │     │  Composer    │
//! └───────────────┘     └──────────────────┘     └────────────────┘     └──────────────┘
//! ```
//!
//! - **Catalog**: every known option and the processor that parses it
//! - **Templates**: option groups resolved once per locale and cloned per table
//! - **Extensions**: pure factories returning configuration and script fragments
//! - **Composer**: merges contributions with override, append and prepend rules
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera::prelude::*;
//!
//! let catalog = Arc::new(OptionCatalog::standard()?);
//! let cache = ConfigurationTemplateCache::new(catalog.clone(), ConfigLoader::new());
//! let mut table = TableConfiguration::new(
//!     "users", "en", "global", catalog, cache.resolve("en", "global")?,
//! );
//! table.configure([("feature.pageable", "false")])?;
//!
//! let mut config = MainConfigGenerator.generate(&table);
//! let mut script = ScriptBuffer::new();
//! let registry = ExtensionRegistry::discover();
//! let extensions = registry.resolve_enabled(&table.enabled_extension_names(), "");
//! ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
//! println!("{}", script.render(table.id(), &config));
//! ```
//!
//! ## Features
//!
//! - `toml-config`: TOML configuration files (default)
//! - `yaml-config`: YAML configuration files
//! - `json-log`: JSON log output

pub use tessera_core as core;
pub use tessera_framework as framework;
pub use tessera_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Options and tables
    pub use tessera_core::{
        ColumnConfiguration, ConfigurationStore, OptionCatalog, OptionKey, TableConfiguration,
        standard,
    };

    // Extensions and composition
    pub use tessera_framework::prelude::*;

    // Configuration and templates
    pub use tessera_runtime::{ConfigLoader, ConfigurationTemplateCache, RuntimeConfig};
}
