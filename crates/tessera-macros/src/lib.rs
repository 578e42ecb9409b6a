//! Procedural macros for Tessera.
//!
//! This crate provides:
//!
//! - `#[register_extension(builtin | custom)]` - Registers an extension at link time
//!
//! # Registering an extension
//!
//! ```rust,ignore
//! use tessera::prelude::*;
//!
//! #[derive(Default)]
//! #[register_extension(custom)]
//! pub struct Highlight;
//!
//! impl Extension for Highlight {
//!     fn name(&self) -> &str {
//!         "highlight"
//!     }
//!
//!     fn setup(&self, table: &TableConfiguration) -> ExtensionResult<ExtensionContribution> {
//!         Ok(ExtensionContribution::new())
//!     }
//! }
//! ```
//!
//! Custom extensions are only picked up when their module path lies under
//! the configured base package.

mod extension;

use proc_macro::TokenStream;

/// Registers a `Default` extension type in one of the extension slices.
///
/// - `builtin` - the extensions shipped with Tessera
/// - `custom` - application extensions, filtered by module path
///
/// The decorated item is left unchanged.
#[proc_macro_attribute]
pub fn register_extension(attr: TokenStream, item: TokenStream) -> TokenStream {
    extension::register_extension(attr, item)
}
