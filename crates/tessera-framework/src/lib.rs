//! # Tessera Framework
//!
//! Extensions and their composition into a table script.
//!
//! This layer provides:
//! - The [`Extension`] trait and the [`ExtensionContribution`] it returns
//! - Link time discovery through [`ExtensionRegistry`] and `#[register_extension]`
//! - [`ExtensionComposer`], merging contributions with [`MergeMode`] rules
//! - [`MainConfigGenerator`], seeding the configuration from the table options
//! - The built-in feature, plugin and theme extensions
//!
//! ```rust,ignore
//! use tessera_framework::prelude::*;
//!
//! let mut config = MainConfigGenerator.generate(&table);
//! let mut script = ScriptBuffer::new();
//! let extensions = registry.resolve_enabled(&table.enabled_extension_names(), "app");
//! let report = ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config);
//! println!("{}", script.render(table.id(), &config));
//! ```

extern crate self as tessera_framework;

pub mod builtin;
pub mod composer;
pub mod config;
pub mod error;
pub mod extension;
pub mod generator;
pub mod registry;
pub mod script;

pub use linkme;
pub use tessera_macros::register_extension;

pub use composer::{CompositionReport, ExtensionComposer};
pub use config::{ConfigMap, ConfigValue, JsFunction, MergeMode};
pub use error::{CompositionError, CompositionResult, ExtensionError, ExtensionResult};
pub use extension::{Callback, ConfigGenerator, Extension, ExtensionContribution, Parameter};
pub use generator::{ColumnFilteringGenerator, MainConfigGenerator};
pub use registry::{BUILTIN_EXTENSIONS, CUSTOM_EXTENSIONS, ExtensionDescriptor, ExtensionRegistry};
pub use script::{ScriptBuffer, Slot};

/// Commonly used types for writing and composing extensions.
pub mod prelude {
    pub use crate::register_extension;
    pub use crate::{
        Callback, ConfigGenerator, ConfigMap, ConfigValue, Extension, ExtensionComposer,
        ExtensionContribution, ExtensionError, ExtensionRegistry, ExtensionResult, JsFunction,
        MainConfigGenerator, MergeMode, ScriptBuffer, Slot,
    };
    pub use tessera_core::TableConfiguration;
}
