//! Per-locale cache of resolved option groups.
//!
//! On the first request for a locale every group of that locale is resolved
//! in one build and inserted together. Later requests only take a short read
//! lock and clone the template, so mutating a returned store never reaches
//! the cache.
//!
//! ```rust,ignore
//! let cache = ConfigurationTemplateCache::new(catalog.clone(), ConfigLoader::new());
//! let store = cache.resolve("en", "global")?;
//! let table = TableConfiguration::new("myTable", "en", "global", catalog, store);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tessera_core::{ConfigurationStore, OptionCatalog, OptionScope};
use tracing::{debug, info, warn};

use crate::config::OptionSource;
use crate::error::{TemplateError, TemplateResult};

type LocaleTemplates = HashMap<String, Arc<ConfigurationStore>>;

/// Resolved templates keyed by locale, then group.
pub struct ConfigurationTemplateCache {
    catalog: Arc<OptionCatalog>,
    source: Arc<dyn OptionSource>,
    dev_mode: bool,
    templates: RwLock<HashMap<String, Arc<LocaleTemplates>>>,
    /// Serializes builds so a locale is never resolved twice concurrently.
    build_lock: Mutex<()>,
}

impl ConfigurationTemplateCache {
    /// Creates an empty cache reading its options from `source`.
    pub fn new(catalog: Arc<OptionCatalog>, source: impl OptionSource + 'static) -> Self {
        Self {
            catalog,
            source: Arc::new(source),
            dev_mode: false,
            templates: RwLock::new(HashMap::new()),
            build_lock: Mutex::new(()),
        }
    }

    /// Rebuilds templates on every resolution, picking up configuration
    /// changes without a restart.
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    pub fn catalog(&self) -> &Arc<OptionCatalog> {
        &self.catalog
    }

    /// Returns a private copy of the template for `(locale, group)`.
    pub fn resolve(&self, locale: &str, group: &str) -> TemplateResult<ConfigurationStore> {
        Ok(self.template(locale, group)?.as_ref().clone())
    }

    /// Returns the shared template for `(locale, group)`.
    pub fn template(&self, locale: &str, group: &str) -> TemplateResult<Arc<ConfigurationStore>> {
        let locale = normalize_locale(locale);
        let templates = self.locale_templates(&locale)?;
        templates.get(group).cloned().ok_or_else(|| {
            let mut available: Vec<String> = templates.keys().cloned().collect();
            available.sort();
            TemplateError::unknown_group(group, available)
        })
    }

    /// Drops every cached template.
    pub fn clear(&self) {
        let mut templates = self.templates.write();
        debug!(locales = templates.len(), "Clearing configuration templates");
        templates.clear();
    }

    /// Locales with cached templates.
    pub fn locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.templates.read().keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Cached groups of `locale`; empty until the locale has been resolved.
    pub fn groups(&self, locale: &str) -> Vec<String> {
        let mut groups: Vec<String> = self
            .templates
            .read()
            .get(&normalize_locale(locale))
            .map(|templates| templates.keys().cloned().collect())
            .unwrap_or_default();
        groups.sort();
        groups
    }

    /// Every cached template as `{locale: {group: {option: value}}}`.
    pub fn debug_snapshot(&self) -> serde_json::Value {
        let templates = self.templates.read();
        let snapshot: BTreeMap<&str, BTreeMap<&str, serde_json::Value>> = templates
            .iter()
            .map(|(locale, groups)| {
                let groups = groups
                    .iter()
                    .map(|(group, store)| (group.as_str(), store.to_json()))
                    .collect();
                (locale.as_str(), groups)
            })
            .collect();
        serde_json::to_value(snapshot).unwrap_or(serde_json::Value::Null)
    }

    fn locale_templates(&self, locale: &str) -> TemplateResult<Arc<LocaleTemplates>> {
        if self.dev_mode {
            return self.build(locale).map(Arc::new);
        }
        if let Some(templates) = self.templates.read().get(locale) {
            return Ok(templates.clone());
        }

        let _guard = self.build_lock.lock();
        if let Some(templates) = self.templates.read().get(locale) {
            return Ok(templates.clone());
        }
        let templates = Arc::new(self.build(locale)?);
        self.templates
            .write()
            .insert(locale.to_string(), templates.clone());
        Ok(templates)
    }

    /// Resolves every group of `locale`.
    fn build(&self, locale: &str) -> TemplateResult<LocaleTemplates> {
        let config = self.source.load(locale)?;

        let mut templates = LocaleTemplates::new();
        for group in config.group_names() {
            let mut raw = Vec::new();
            for (name, value) in config.options_for(&group) {
                let key = self
                    .catalog
                    .find(&name)
                    .map_err(|source| TemplateError::InvalidOption {
                        group: group.clone(),
                        source,
                    })?;
                raw.push((key, value));
            }

            let mut store = ConfigurationStore::new();
            let report = store.resolve(&self.catalog, raw, OptionScope::Table);
            if !report.is_ok() {
                warn!(
                    locale,
                    group = %group,
                    rejected = report.errors.len(),
                    "Template built with rejected options"
                );
            }
            templates.insert(group, Arc::new(store));
        }

        info!(locale, groups = templates.len(), "Configuration templates built");
        Ok(templates)
    }
}

/// Canonical cache key: lower-case language, upper-case region, `_`
/// separated (`FR-ca` becomes `fr_CA`).
fn normalize_locale(locale: &str) -> String {
    let mut parts = locale
        .trim()
        .split(['_', '-'])
        .filter(|part| !part.is_empty());
    let mut normalized = parts.next().map(str::to_lowercase).unwrap_or_default();
    if let Some(region) = parts.next() {
        normalized.push('_');
        normalized.push_str(&region.to_uppercase());
    }
    for variant in parts {
        normalized.push('_');
        normalized.push_str(variant);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use serde_json::json;
    use tessera_core::{
        OptionKey, OptionValue, ProcessingContext, ProcessingResult, ValueProcessor, standard,
    };

    use crate::config::{GLOBAL_GROUP, RuntimeConfig};

    struct CountingProcessor {
        calls: Arc<AtomicUsize>,
    }

    impl ValueProcessor for CountingProcessor {
        fn process(
            &self,
            raw: &str,
            _ctx: &mut ProcessingContext<'_>,
        ) -> ProcessingResult<Option<OptionValue>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(OptionValue::Text(raw.to_string())))
        }
    }

    fn counted_cache(dev_mode: bool) -> (ConfigurationTemplateCache, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut catalog = OptionCatalog::new();
        catalog
            .register(OptionKey::new(
                "counter.value",
                CountingProcessor {
                    calls: calls.clone(),
                },
            ))
            .unwrap();

        let mut config = RuntimeConfig {
            defaults: json!({ "counter": { "value": "default" } }),
            ..RuntimeConfig::default()
        };
        config
            .groups
            .insert("admin".to_string(), json!({ "counter": { "value": "admin" } }));

        let cache = ConfigurationTemplateCache::new(Arc::new(catalog), config)
            .with_dev_mode(dev_mode);
        (cache, calls)
    }

    fn standard_cache(config: RuntimeConfig) -> ConfigurationTemplateCache {
        let catalog = Arc::new(OptionCatalog::standard().unwrap());
        ConfigurationTemplateCache::new(catalog, config)
    }

    #[test]
    fn test_second_resolve_hits_cache() {
        let (cache, calls) = counted_cache(false);
        cache.resolve("en", "admin").unwrap();
        // One call per group: `admin` and `global`.
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.resolve("en", "admin").unwrap();
        cache.resolve("en", GLOBAL_GROUP).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.resolve("fr", "admin").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(cache.locales(), ["en", "fr"]);
        assert_eq!(cache.groups("en"), ["admin", "global"]);
    }

    #[test]
    fn test_concurrent_first_resolve_builds_once() {
        const THREADS: usize = 8;
        let (cache, calls) = counted_cache(false);
        let barrier = Barrier::new(THREADS);

        thread::scope(|scope| {
            for _ in 0..THREADS {
                scope.spawn(|| {
                    barrier.wait();
                    let store = cache.resolve("en", "admin").unwrap();
                    assert_eq!(store.to_json(), json!({ "counter.value": "admin" }));
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.locales(), ["en"]);
    }

    #[test]
    fn test_locale_spellings_share_templates() {
        let (cache, calls) = counted_cache(false);
        cache.resolve("fr_CA", "admin").unwrap();
        cache.resolve("FR-ca", "admin").unwrap();
        cache.resolve(" fr-CA ", GLOBAL_GROUP).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.locales(), ["fr_CA"]);
        assert_eq!(cache.groups("fr-ca"), ["admin", "global"]);
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("FR-ca"), "fr_CA");
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("de-de-1996"), "de_DE_1996");
        assert_eq!(normalize_locale(""), "");
    }

    #[test]
    fn test_mixed_case_override_reaches_template() {
        let mut config = RuntimeConfig::default();
        config.groups.insert(
            GLOBAL_GROUP.to_string(),
            json!({ "Feature": { "Pageable": false } }),
        );
        let cache = standard_cache(config);
        let global = cache.resolve("en", GLOBAL_GROUP).unwrap();
        assert_eq!(global.value(standard::FEATURE_PAGEABLE), Some(false));
    }

    #[test]
    fn test_dev_mode_rebuilds() {
        let (cache, calls) = counted_cache(true);
        cache.resolve("en", "admin").unwrap();
        cache.resolve("en", "admin").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(cache.locales().is_empty());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (cache, calls) = counted_cache(false);
        let before = cache.resolve("en", "admin").unwrap();
        cache.clear();
        assert!(cache.locales().is_empty());
        let after = cache.resolve("en", "admin").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(before.to_json(), after.to_json());
        assert_eq!(after.to_json(), json!({ "counter.value": "admin" }));
    }

    #[test]
    fn test_unknown_group() {
        let cache = standard_cache(RuntimeConfig::default());
        let err = cache.resolve("en", "nonexistent").unwrap_err();
        match &err {
            TemplateError::UnknownGroup { group, available } => {
                assert_eq!(group, "nonexistent");
                assert_eq!(available, &["global"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("global"));
    }

    #[test]
    fn test_group_inheritance() {
        let mut config = RuntimeConfig::default();
        config.groups.insert(
            GLOBAL_GROUP.to_string(),
            json!({ "feature": { "pageable": false, "dom": "lfrtip" } }),
        );
        config
            .groups
            .insert("admin".to_string(), json!({ "feature": { "dom": "frtip" } }));
        let cache = standard_cache(config);

        let admin = cache.resolve("en", "admin").unwrap();
        assert_eq!(admin.value(standard::FEATURE_PAGEABLE), Some(false));
        assert_eq!(admin.value(standard::FEATURE_DOM).as_deref(), Some("frtip"));
        assert_eq!(admin.value(standard::FEATURE_INFO), Some(true));

        let global = cache.resolve("en", GLOBAL_GROUP).unwrap();
        assert_eq!(global.value(standard::FEATURE_DOM).as_deref(), Some("lfrtip"));
    }

    #[test]
    fn test_resolved_copy_is_private() {
        let cache = standard_cache(RuntimeConfig::default());
        let mut copy = cache.resolve("en", GLOBAL_GROUP).unwrap();
        copy.remove(standard::FEATURE_INFO.name());

        let template = cache.template("en", GLOBAL_GROUP).unwrap();
        assert_eq!(template.value(standard::FEATURE_INFO), Some(true));
        assert_eq!(copy.value(standard::FEATURE_INFO), None);
    }

    #[test]
    fn test_unknown_option_fails_the_build() {
        let mut config = RuntimeConfig::default();
        config
            .groups
            .insert("admin".to_string(), json!({ "feature": { "bogus": "x" } }));
        let cache = standard_cache(config);
        assert!(matches!(
            cache.resolve("en", GLOBAL_GROUP),
            Err(TemplateError::InvalidOption { .. })
        ));
        assert!(cache.locales().is_empty());
    }

    #[test]
    fn test_debug_snapshot() {
        let (cache, _) = counted_cache(false);
        cache.resolve("en-US", "admin").unwrap();
        assert_eq!(
            cache.debug_snapshot(),
            json!({
                "en_US": {
                    "admin": { "counter.value": "admin" },
                    "global": { "counter.value": "default" }
                }
            })
        );
    }
}
