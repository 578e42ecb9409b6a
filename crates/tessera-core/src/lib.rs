//! # Tessera Core
//!
//! Typed, precedence ordered configuration for table widgets.
//!
//! - **Options**: [`OptionKey`]s registered in an [`OptionCatalog`], each
//!   with a [`ValueProcessor`] turning raw strings into [`OptionValue`]s.
//! - **Stores**: [`ConfigurationStore`] holds resolved values and runs
//!   resolution passes with two-phase commit of staged values.
//! - **Entities**: [`TableConfiguration`] and [`ColumnConfiguration`] layer
//!   per-request overrides over a cloned template.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tessera_core::prelude::*;
//!
//! let catalog = Arc::new(OptionCatalog::standard()?);
//! let mut table = TableConfiguration::new("users", "en", "global", catalog, ConfigurationStore::new());
//! table.configure([("feature.info", "false")])?;
//! assert_eq!(table.value(standard::FEATURE_INFO), Some(false));
//! ```

pub mod entity;
pub mod error;
pub mod option;
pub mod store;
pub mod value;

pub use entity::{ColumnConfiguration, TableConfiguration};
pub use error::{
    CatalogError, CatalogResult, CoreError, CoreResult, ProcessingError, ProcessingResult,
};
pub use option::standard;
pub use option::{
    OptionCatalog, OptionFamily, OptionKey, OptionScope, Opt, ProcessingContext, ValueProcessor,
};
pub use store::{ConfigurationStore, PassReport};
pub use value::{ExportConf, FromOptionValue, OptionValue};

pub mod prelude {
    pub use crate::entity::{ColumnConfiguration, TableConfiguration};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::option::standard;
    pub use crate::option::vocabulary::*;
    pub use crate::option::{OptionCatalog, OptionKey, OptionScope, Opt};
    pub use crate::store::{ConfigurationStore, PassReport};
    pub use crate::value::OptionValue;
}
