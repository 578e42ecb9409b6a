//! Resolved option values of one template or entity.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::error::{ProcessingError, ProcessingResult};
use crate::option::catalog::OptionCatalog;
use crate::option::key::{Opt, OptionKey, OptionScope};
use crate::option::processor::{OptionMap, ProcessingContext};
use crate::value::{ExportConf, FromOptionValue, OptionValue};

// =============================================================================
// PassReport
// =============================================================================

/// Outcome of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    /// Number of options that received a value.
    pub resolved: usize,
    /// Number of options left unset by their processor.
    pub cleared: usize,
    /// Extensions requested during the pass, in request order.
    pub extensions: Vec<String>,
    /// Options whose raw value was rejected. They keep their previous value.
    pub errors: Vec<ProcessingError>,
}

impl PassReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// ConfigurationStore
// =============================================================================

/// A map of resolved option values.
///
/// Values staged by processors are kept apart until the resolution pass that
/// staged them completes. Cloning a store copies every value, so mutations of
/// a clone never reach the store it was cloned from.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    entries: OptionMap,
    staging: OptionMap,
    exports: BTreeMap<String, ExportConf>,
    requested_extensions: Vec<String>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The resolved value of `name`. Staged values are not visible.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    /// The resolved value of `opt`, if set and of the expected shape.
    pub fn value<T: FromOptionValue>(&self, opt: Opt<T>) -> Option<T> {
        self.get(opt.name()).and_then(T::from_option_value)
    }

    pub fn value_or<T: FromOptionValue>(&self, opt: Opt<T>, default: T) -> T {
        self.value(opt).unwrap_or(default)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn set(&mut self, key: OptionKey, value: impl Into<OptionValue>) {
        self.entries.insert(key, value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<OptionValue> {
        self.entries.remove(name)
    }

    /// Stages `value`; it becomes visible at the next [`commit_staging`].
    ///
    /// [`commit_staging`]: Self::commit_staging
    pub fn stage(&mut self, key: OptionKey, value: impl Into<OptionValue>) {
        self.staging.insert(key, value.into());
    }

    /// Returns `true` while staged values are pending.
    pub fn has_staged(&self) -> bool {
        !self.staging.is_empty()
    }

    /// Moves every staged value into the resolved entries.
    pub fn commit_staging(&mut self) {
        if !self.staging.is_empty() {
            debug!(count = self.staging.len(), "Committing staged values");
        }
        self.entries.extend(self.staging.drain());
    }

    /// Appends `text` to the accumulator of `key`, creating it if needed.
    ///
    /// Fails when the current value is not textual.
    pub fn append(&mut self, key: OptionKey, text: &str) -> ProcessingResult<()> {
        match self.entries.get_mut(key.name()) {
            Some(OptionValue::Buffer(buffer)) | Some(OptionValue::Text(buffer)) => {
                buffer.push_str(text);
                Ok(())
            }
            Some(_) => Err(ProcessingError::new(
                key.user_name(),
                text,
                "the current value cannot be appended to",
            )),
            None => {
                self.entries.insert(key, OptionValue::Buffer(text.to_string()));
                Ok(())
            }
        }
    }

    /// Export configurations collected from the `export.*` options.
    pub fn exports(&self) -> &BTreeMap<String, ExportConf> {
        &self.exports
    }

    /// Extensions requested by processors across every pass, in order.
    pub fn requested_extensions(&self) -> &[String] {
        &self.requested_extensions
    }

    /// Records an extension request, ignoring case-insensitive duplicates.
    pub fn request_extension(&mut self, name: &str) {
        if !self
            .requested_extensions
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(name))
        {
            self.requested_extensions.push(name.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every resolved value, sorted by option name.
    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &OptionValue)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.name().cmp(b.name()));
        entries.into_iter()
    }

    /// A JSON view of the resolved values, keyed by option name.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in self.iter() {
            map.insert(
                key.name().to_string(),
                serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
            );
        }
        if !self.exports.is_empty() {
            map.insert(
                "export".to_string(),
                serde_json::to_value(&self.exports).unwrap_or(serde_json::Value::Null),
            );
        }
        serde_json::Value::Object(map)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Runs one resolution pass over raw option strings.
    ///
    /// Entries are processed by precedence, then catalog registration order;
    /// repeated keys keep their input order. Options of another `scope` are
    /// rejected. A rejected option keeps its previous value and the pass
    /// goes on. Staged values are committed once, after every entry has been
    /// processed.
    pub fn resolve(
        &mut self,
        catalog: &OptionCatalog,
        raw: Vec<(OptionKey, String)>,
        scope: OptionScope,
    ) -> PassReport {
        let mut raw = raw;
        raw.sort_by_key(|(key, _)| key.resolution_order());

        let raw_names: HashSet<String> = raw
            .iter()
            .flat_map(|(key, _)| [key.name().to_string(), key.user_name().to_string()])
            .collect();

        let mut report = PassReport::default();
        for (key, value) in &raw {
            if key.scope() != scope {
                let expected = match scope {
                    OptionScope::Table => "a table option",
                    OptionScope::Column => "a column option",
                };
                let err = ProcessingError::new(key.user_name(), value, format!("not {expected}"));
                warn!(option = %key, error = %err, "Option rejected");
                report.errors.push(err);
                continue;
            }

            let mut ctx = ProcessingContext {
                key,
                catalog,
                entries: &self.entries,
                raw_names: &raw_names,
                staging: &mut self.staging,
                exports: &mut self.exports,
                extensions: &mut report.extensions,
            };
            match key.processor().process(value, &mut ctx) {
                Ok(Some(resolved)) => {
                    self.entries.insert(key.clone(), resolved);
                    report.resolved += 1;
                }
                Ok(None) => {
                    self.entries.remove(key.name());
                    report.cleared += 1;
                }
                Err(err) => {
                    warn!(option = %key, raw = %value, error = %err, "Option value rejected");
                    report.errors.push(err);
                }
            }
        }

        self.commit_staging();
        for name in &report.extensions {
            self.request_extension(name);
        }
        debug!(
            resolved = report.resolved,
            cleared = report.cleared,
            errors = report.errors.len(),
            extensions = ?report.extensions,
            "Resolution pass completed"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::processor::StringProcessor;
    use crate::option::standard;

    fn raw(catalog: &OptionCatalog, pairs: &[(&str, &str)]) -> Vec<(OptionKey, String)> {
        pairs
            .iter()
            .map(|(name, value)| (catalog.find_by_name(name).unwrap(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_staging_invisible_until_commit() {
        let mut store = ConfigurationStore::new();
        store.stage(OptionKey::new("feature.dom", StringProcessor), "lfrtip");
        assert!(store.has_staged());
        assert!(store.get("feature.dom").is_none());

        store.commit_staging();
        assert!(!store.has_staged());
        assert_eq!(store.get("feature.dom"), Some(&OptionValue::from("lfrtip")));
    }

    #[test]
    fn test_append_creates_then_extends() {
        let key = OptionKey::new("css.style", StringProcessor);
        let mut store = ConfigurationStore::new();
        store.append(key.clone(), "width:100%;").unwrap();
        store.append(key.clone(), "display:none;").unwrap();
        assert_eq!(
            store.get("css.style"),
            Some(&OptionValue::Buffer("width:100%;display:none;".into()))
        );

        store.set(key.clone(), true);
        assert!(store.append(key, "x").is_err());
    }

    #[test]
    fn test_clone_is_independent() {
        let key = OptionKey::new("css.class", StringProcessor);
        let mut template = ConfigurationStore::new();
        template.append(key.clone(), "display").unwrap();

        let mut entity = template.clone();
        entity.append(key, " compact").unwrap();
        assert_eq!(template.get("css.class").unwrap().as_text(), Some("display"));
        assert_eq!(
            entity.get("css.class").unwrap().as_text(),
            Some("display compact")
        );
    }

    #[test]
    fn test_resolve_typed_values() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        let report = store.resolve(
            &catalog,
            raw(
                &catalog,
                &[("feature.info", "false"), ("feature.displaylength", "20")],
            ),
            OptionScope::Table,
        );
        assert!(report.is_ok());
        assert_eq!(report.resolved, 2);
        assert_eq!(store.value(standard::FEATURE_INFO), Some(false));
        assert_eq!(store.value(standard::FEATURE_DISPLAY_LENGTH), Some(20));
        assert!(store.value_or(standard::FEATURE_SORTABLE, true));
    }

    #[test]
    fn test_resolve_continues_after_error() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        let report = store.resolve(
            &catalog,
            raw(
                &catalog,
                &[("feature.info", "maybe"), ("feature.dom", "lfrtip")],
            ),
            OptionScope::Table,
        );
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].option, "feature.info");
        assert_eq!(report.errors[0].raw, "maybe");
        assert!(store.get("feature.info").is_none());
        assert_eq!(store.value(standard::FEATURE_DOM).as_deref(), Some("lfrtip"));
    }

    #[test]
    fn test_resolve_commits_staged_values() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        store.resolve(
            &catalog,
            raw(&catalog, &[("feature.appear", "fadein,500")]),
            OptionScope::Table,
        );
        assert!(!store.has_staged());
        assert_eq!(store.value(standard::FEATURE_APPEAR_DURATION), Some(500));
        assert_eq!(store.requested_extensions(), ["appear".to_string()]);
    }

    #[test]
    fn test_resolve_orders_by_precedence() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        let report = store.resolve(
            &catalog,
            raw(
                &catalog,
                &[("ajax.pipelining", "true"), ("ajax.serverside", "true")],
            ),
            OptionScope::Table,
        );
        assert_eq!(
            report.extensions,
            vec!["serverSide".to_string(), "pipelining".to_string()]
        );
    }

    #[test]
    fn test_resolve_blank_clears_inherited_value() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        store.resolve(
            &catalog,
            raw(&catalog, &[("ajax.source", "/data")]),
            OptionScope::Table,
        );
        let report = store.resolve(
            &catalog,
            raw(&catalog, &[("ajax.source", " ")]),
            OptionScope::Table,
        );
        assert_eq!(report.cleared, 1);
        assert!(store.get("ajax.source").is_none());
    }

    #[test]
    fn test_resolve_rejects_other_scope() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        let report = store.resolve(
            &catalog,
            raw(&catalog, &[("filterable", "true")]),
            OptionScope::Table,
        );
        assert_eq!(report.errors.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_resolve_export_families() {
        let catalog = OptionCatalog::standard().unwrap();
        let mut store = ConfigurationStore::new();
        store.resolve(
            &catalog,
            raw(
                &catalog,
                &[
                    ("export.csv.label", "CSV file"),
                    ("export.xls.label", "Excel"),
                    ("export.enabled.formats", "csv,xls"),
                ],
            ),
            OptionScope::Table,
        );
        assert_eq!(store.exports()["csv"].label, "CSV file");
        assert_eq!(store.exports()["xls"].label, "Excel");
        let json = store.to_json();
        assert_eq!(json["export"]["csv"]["label"], "CSV file");
        assert_eq!(json["export.enabled.formats"], serde_json::json!(["csv", "xls"]));
    }
}
