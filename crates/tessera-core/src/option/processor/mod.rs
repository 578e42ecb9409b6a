//! Value processors: raw string to typed value.
//!
//! Every [`OptionKey`] carries a [`ValueProcessor`]. During a resolution pass
//! the store runs each raw string through its key's processor with a
//! [`ProcessingContext`], which gives the processor three documented side
//! channels:
//!
//! - staging additional values ([`ProcessingContext::stage`]), applied only
//!   once the whole pass has completed,
//! - requesting an extension ([`ProcessingContext::register_extension`]),
//! - editing the export configuration ([`ProcessingContext::export_conf`]).
//!
//! Processors never read or write anything else.

mod basic;
mod column;
mod export;
mod table;

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::trace;

pub use basic::{
    BooleanProcessor, BufferProcessor, EmptyStringProcessor, ExtensionToggleProcessor,
    IntegerProcessor, NameListProcessor, StringProcessor, VocabularyProcessor,
};
pub use column::{FilterableProcessor, SortDirectionProcessor};
pub use export::{ExportEnabledFormatsProcessor, ExportField, ExportFormatProcessor};
pub use table::{
    AppearProcessor, FilterSelectorProcessor, LengthMenuProcessor, PaginationTypeProcessor,
    StripeClassesProcessor, ThemeProcessor, TriggerProcessor,
};

use super::catalog::OptionCatalog;
use super::key::OptionKey;
use crate::error::{ProcessingError, ProcessingResult};
use crate::value::{ExportConf, OptionValue};

/// Resolved values keyed by option.
pub type OptionMap = HashMap<OptionKey, OptionValue>;

/// Turns the raw string of one option into a typed value.
///
/// Returning `Ok(None)` leaves the option unset.
pub trait ValueProcessor: Send + Sync {
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>>;
}

impl<F> ValueProcessor for F
where
    F: Fn(&str, &mut ProcessingContext<'_>) -> ProcessingResult<Option<OptionValue>>
        + Send
        + Sync,
{
    fn process(
        &self,
        raw: &str,
        ctx: &mut ProcessingContext<'_>,
    ) -> ProcessingResult<Option<OptionValue>> {
        self(raw, ctx)
    }
}

// =============================================================================
// ProcessingContext
// =============================================================================

/// Everything a [`ValueProcessor`] may observe or touch while it runs.
pub struct ProcessingContext<'a> {
    pub(crate) key: &'a OptionKey,
    pub(crate) catalog: &'a OptionCatalog,
    pub(crate) entries: &'a OptionMap,
    pub(crate) raw_names: &'a HashSet<String>,
    pub(crate) staging: &'a mut OptionMap,
    pub(crate) exports: &'a mut BTreeMap<String, ExportConf>,
    pub(crate) extensions: &'a mut Vec<String>,
}

impl<'a> ProcessingContext<'a> {
    /// The option being processed, tagged with the concrete name in use.
    pub fn key(&self) -> &OptionKey {
        self.key
    }

    pub fn catalog(&self) -> &OptionCatalog {
        self.catalog
    }

    /// A value resolved earlier in this pass, or inherited from a template.
    pub fn resolved(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` has a raw value in the current pass.
    pub fn is_provided(&self, name: &str) -> bool {
        self.raw_names.contains(name)
    }

    /// Stages `value` for `name`; it becomes visible once the pass completes.
    pub fn stage(&mut self, name: &str, value: impl Into<OptionValue>) -> ProcessingResult<()> {
        let key = self
            .catalog
            .find_by_name(name)
            .ok_or_else(|| self.error(name, "cannot stage an unknown option"))?;
        trace!(option = %self.key, staged = %key, "Value staged");
        self.staging.insert(key, value.into());
        Ok(())
    }

    /// Stages `value` unless `name` is provided in this pass or already set.
    pub fn stage_if_absent(
        &mut self,
        name: &str,
        value: impl Into<OptionValue>,
    ) -> ProcessingResult<()> {
        if self.is_provided(name) || self.entries.contains_key(name) {
            return Ok(());
        }
        self.stage(name, value)
    }

    /// Requests that the named extension be activated for the entity.
    pub fn register_extension(&mut self, name: &str) {
        if !self
            .extensions
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name))
        {
            trace!(option = %self.key, extension = name, "Extension requested");
            self.extensions.push(name.to_string());
        }
    }

    /// The export configuration of `format`, created with defaults if needed.
    pub fn export_conf(&mut self, format: &str) -> &mut ExportConf {
        self.exports
            .entry(format.to_string())
            .or_insert_with(|| ExportConf::new(format))
    }

    /// Builds an error about `raw` for the option being processed.
    pub fn error(&self, raw: &str, reason: impl Into<String>) -> ProcessingError {
        ProcessingError::new(self.key.user_name(), raw, reason)
    }
}

/// Trims `raw` and maps blank input to `None`.
pub(crate) fn non_blank(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Owns every piece of state a [`ProcessingContext`] borrows.
    #[derive(Default)]
    pub struct Harness {
        pub catalog: OptionCatalog,
        pub entries: OptionMap,
        pub raw_names: HashSet<String>,
        pub staging: OptionMap,
        pub exports: BTreeMap<String, ExportConf>,
        pub extensions: Vec<String>,
    }

    impl Harness {
        pub fn standard() -> Self {
            Self {
                catalog: OptionCatalog::standard().unwrap(),
                ..Default::default()
            }
        }

        /// Runs the processor of `name` on `raw`.
        pub fn run(&mut self, name: &str, raw: &str) -> ProcessingResult<Option<OptionValue>> {
            let key = self.catalog.find_by_name(name).unwrap();
            let mut ctx = ProcessingContext {
                key: &key,
                catalog: &self.catalog,
                entries: &self.entries,
                raw_names: &self.raw_names,
                staging: &mut self.staging,
                exports: &mut self.exports,
                extensions: &mut self.extensions,
            };
            key.processor().process(raw, &mut ctx)
        }

        pub fn staged(&self, name: &str) -> Option<&OptionValue> {
            self.staging.get(name)
        }
    }
}
