//! Option definitions: keys, the catalog, value processors and vocabularies.

pub mod catalog;
pub mod key;
pub mod processor;
pub mod standard;
pub mod vocabulary;

pub use catalog::{OptionCatalog, OptionFamily};
pub use key::{DEFAULT_PRECEDENCE, Opt, OptionKey, OptionScope, normalize_name};
pub use processor::{OptionMap, ProcessingContext, ValueProcessor};
pub use vocabulary::{
    FilterPlaceholder, FilterType, PaginationType, SortDirection, Theme, ThemeOption, Vocabulary,
};
